use axum::{
    extract::{
        multipart::{Multipart, MultipartError, MultipartRejection},
        State,
    },
    http::StatusCode,
    response::Json,
};
use tracing::{debug, info, instrument, trace, warn};

use crate::auth::AuthUser;
use crate::error::{ApiError, FieldErrors};
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::media;
use crate::repository::cats;
use crate::repository::filters::{CatFilter, CatListQuery};
use crate::schemas::{ApiResponse, AppState};
// Referenced from the OpenAPI annotations only
#[allow(unused_imports)]
use crate::schemas::{CatDetailResponse, CatImageResponse, CatSummaryList, ErrorResponse};
use crate::serializers::cats::{
    CatDetail, CatImage, CatSummary, CreateCatRequest, ReplaceCatRequest, UpdateCatRequest,
};

/// List the caller's cats
#[utoipa::path(
    get,
    path = "/api/v1/cats/",
    params(CatListQuery),
    responses(
        (status = 200, description = "Cats owned by the caller", body = CatSummaryList),
        (status = 400, description = "Malformed filter", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "cats"
)]
#[instrument(skip(state))]
pub async fn list_cats(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<CatListQuery>,
) -> Result<Json<ApiResponse<Vec<CatSummary>>>, ApiError> {
    let filter = CatFilter::try_from(query)?;
    trace!("Listing cats with filter {:?}", filter);

    let records = cats::list(&state.db, user.id, &filter).await?;
    let data: Vec<CatSummary> = records.into_iter().map(CatSummary::from).collect();

    Ok(Json(ApiResponse::new(data, "Cats retrieved successfully")))
}

/// Create a cat, resolving nested abilities and fighting styles
#[utoipa::path(
    post,
    path = "/api/v1/cats/",
    request_body = CreateCatRequest,
    responses(
        (status = 201, description = "Cat created", body = CatDetailResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "cats"
)]
#[instrument(skip(state, request))]
pub async fn create_cat(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCatRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CatDetail>>), ApiError> {
    debug!("Creating cat {} for user {}", request.name, user.id);

    let record = cats::create(&state.db, user.id, request).await?;
    info!("Created cat {}", record.cat.id);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(CatDetail::from(record), "Cat created successfully")),
    ))
}

/// Get one of the caller's cats
#[utoipa::path(
    get,
    path = "/api/v1/cats/{id}/",
    params(("id" = i32, Path, description = "Cat ID")),
    responses(
        (status = 200, description = "Cat found", body = CatDetailResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Cat not found", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "cats"
)]
#[instrument(skip(state))]
pub async fn get_cat(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<CatDetail>>, ApiError> {
    let record = cats::get(&state.db, user.id, id).await?;
    Ok(Json(ApiResponse::new(CatDetail::from(record), "Cat retrieved successfully")))
}

/// Replace a cat. `name` and `weight` are required; omitted optional fields keep their value.
#[utoipa::path(
    put,
    path = "/api/v1/cats/{id}/",
    params(("id" = i32, Path, description = "Cat ID")),
    request_body = ReplaceCatRequest,
    responses(
        (status = 200, description = "Cat updated", body = CatDetailResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Cat not found", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "cats"
)]
#[instrument(skip(state, request))]
pub async fn replace_cat(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<ReplaceCatRequest>,
) -> Result<Json<ApiResponse<CatDetail>>, ApiError> {
    let record = cats::update(&state.db, user.id, id, UpdateCatRequest::from(request)).await?;
    info!("Replaced cat {}", id);
    Ok(Json(ApiResponse::new(CatDetail::from(record), "Cat updated successfully")))
}

/// Partially update a cat
#[utoipa::path(
    patch,
    path = "/api/v1/cats/{id}/",
    params(("id" = i32, Path, description = "Cat ID")),
    request_body = UpdateCatRequest,
    responses(
        (status = 200, description = "Cat updated", body = CatDetailResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Cat not found", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "cats"
)]
#[instrument(skip(state, request))]
pub async fn update_cat(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateCatRequest>,
) -> Result<Json<ApiResponse<CatDetail>>, ApiError> {
    let record = cats::update(&state.db, user.id, id, request).await?;
    info!("Updated cat {}", id);
    Ok(Json(ApiResponse::new(CatDetail::from(record), "Cat updated successfully")))
}

/// Delete a cat. Its abilities and fighting styles are kept.
#[utoipa::path(
    delete,
    path = "/api/v1/cats/{id}/",
    params(("id" = i32, Path, description = "Cat ID")),
    responses(
        (status = 204, description = "Cat deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Cat not found", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "cats"
)]
#[instrument(skip(state))]
pub async fn delete_cat(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    cats::delete(&state.db, user.id, id).await?;
    info!("Deleted cat {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Upload an image for a cat
#[utoipa::path(
    post,
    path = "/api/v1/cats/{id}/upload-image/",
    params(("id" = i32, Path, description = "Cat ID")),
    request_body(content = crate::serializers::cats::ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = CatImageResponse),
        (status = 400, description = "Missing or invalid image", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Cat not found", body = ErrorResponse),
        (status = 413, description = "Image exceeds the upload limit", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "cats"
)]
#[instrument(skip(state, multipart))]
pub async fn upload_image(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<CatImage>>, ApiError> {
    let mut multipart = multipart?;
    cats::ensure_owned(&state.db, user.id, id).await?;

    let mut stored = None;
    while let Some(field) = multipart.next_field().await.map_err(image_read_error)? {
        if field.name() != Some("image") {
            trace!("Skipping multipart field {:?}", field.name());
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(image_read_error)?;
        stored = Some(media::store_cat_image(&state.media_root, &file_name, &data).await?);
        break;
    }

    let path = stored.ok_or_else(|| ApiError::field("image", "No file was submitted."))?;
    let cat = match cats::set_image(&state.db, user.id, id, path.clone()).await {
        Ok(cat) => cat,
        Err(e) => {
            warn!("Discarding image {} for cat {}", path, id);
            media::remove_stored(&state.media_root, &path).await;
            return Err(e);
        }
    };
    info!("Stored image for cat {}", id);

    Ok(Json(ApiResponse::new(CatImage::from(cat), "Image uploaded successfully")))
}

/// Report an oversized upload against the `image` field.
fn image_read_error(error: MultipartError) -> ApiError {
    match ApiError::from(error) {
        ApiError::PayloadTooLarge(_) => {
            let mut fields = FieldErrors::new();
            fields.insert(
                "image".to_string(),
                vec!["The submitted file exceeds the upload size limit.".to_string()],
            );
            ApiError::PayloadTooLarge(fields)
        }
        other => other,
    }
}
