use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::error::ApiError;

/// Directory under the media root that cat images are written to.
pub const CAT_UPLOAD_DIR: &str = "uploads/cat";

const NOT_AN_IMAGE: &str =
    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";

/// Image formats accepted for upload, by extension and leading bytes.
const IMAGE_FORMATS: [(&str, &[u8]); 5] = [
    ("png", b"\x89PNG\r\n\x1a\n"),
    ("jpg", b"\xff\xd8\xff"),
    ("jpeg", b"\xff\xd8\xff"),
    ("gif", b"GIF8"),
    ("webp", b"RIFF"),
];

/// Lowercased extension of an uploaded file name, if it is an accepted image type.
fn image_extension(file_name: &str) -> Option<String> {
    let extension = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    IMAGE_FORMATS
        .iter()
        .any(|(known, _)| *known == extension)
        .then_some(extension)
}

fn has_image_signature(extension: &str, data: &[u8]) -> bool {
    IMAGE_FORMATS
        .iter()
        .filter(|(known, _)| *known == extension)
        .any(|(_, magic)| data.starts_with(magic))
}

/// Relative path a cat image is stored under: `uploads/cat/<uuid>.<ext>`.
pub fn cat_image_path(extension: &str) -> String {
    format!("{}/{}.{}", CAT_UPLOAD_DIR, Uuid::new_v4(), extension)
}

/// Check the upload and write it below `media_root` under a fresh unique name.
/// Returns the path relative to the media root.
#[instrument(skip(media_root, data), fields(size = data.len()))]
pub async fn store_cat_image(
    media_root: &Path,
    file_name: &str,
    data: &[u8],
) -> Result<String, ApiError> {
    let extension = image_extension(file_name).ok_or_else(|| ApiError::field("image", NOT_AN_IMAGE))?;
    if !has_image_signature(&extension, data) {
        return Err(ApiError::field("image", NOT_AN_IMAGE));
    }

    let relative = cat_image_path(&extension);
    let target: PathBuf = media_root.join(&relative);
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&target, data).await?;

    debug!("Stored upload at {}", target.display());
    Ok(relative)
}

/// Delete a stored upload. A file that is already gone is not an error.
pub async fn remove_stored(media_root: &Path, relative: &str) {
    let target = media_root.join(relative);
    match tokio::fs::remove_file(&target).await {
        Ok(()) => debug!("Removed {}", target.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove {}: {}", target.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_image_extension() {
        assert_eq!(image_extension("cat.PNG").as_deref(), Some("png"));
        assert_eq!(image_extension("cat.jpeg").as_deref(), Some("jpeg"));
        assert_eq!(image_extension("cat.txt"), None);
        assert_eq!(image_extension("cat"), None);
    }

    #[test]
    fn test_cat_image_path_is_unique() {
        let first = cat_image_path("png");
        let second = cat_image_path("png");

        assert!(first.starts_with("uploads/cat/"));
        assert!(first.ends_with(".png"));
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_store_cat_image_writes_file() {
        let root = std::env::temp_dir().join(format!("catapi-media-{}", Uuid::new_v4()));

        let relative = store_cat_image(&root, "photo.png", PNG).await.unwrap();

        let written = tokio::fs::read(root.join(&relative)).await.unwrap();
        assert_eq!(written, PNG);
        tokio::fs::remove_dir_all(&root).await.ok();
    }

    #[tokio::test]
    async fn test_store_cat_image_rejects_text() {
        let root = std::env::temp_dir().join(format!("catapi-media-{}", Uuid::new_v4()));

        for (name, data) in [("notes.txt", b"hello".as_slice()), ("fake.png", b"hello".as_slice())] {
            match store_cat_image(&root, name, data).await {
                Err(ApiError::Validation(fields)) => assert!(fields.contains_key("image")),
                other => panic!("Expected validation error for {}, got {:?}", name, other),
            }
        }
    }

    #[tokio::test]
    async fn test_remove_stored_deletes_file() {
        let root = std::env::temp_dir().join(format!("catapi-media-{}", Uuid::new_v4()));
        let relative = store_cat_image(&root, "photo.png", PNG).await.unwrap();

        remove_stored(&root, &relative).await;
        assert!(!root.join(&relative).exists());

        // Second removal is a no-op
        remove_stored(&root, &relative).await;
        tokio::fs::remove_dir_all(&root).await.ok();
    }
}
