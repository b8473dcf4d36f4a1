use model::entities::{ability, cat, fighting_style};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::abilities::AbilityResponse;
use super::fighting_styles::FightingStyleResponse;

/// URL prefix uploaded files are served under.
pub const MEDIA_URL: &str = "/media";

/// A cat together with its associated rows, as loaded by the repository.
#[derive(Debug, Clone)]
pub struct CatRecord {
    pub cat: cat::Model,
    pub abilities: Vec<ability::Model>,
    pub fighting_styles: Vec<fighting_style::Model>,
}

/// Nested ability in a cat payload, resolved by name
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct AbilityInput {
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, max = 255, message = "Ensure this field has between 1 and 255 characters."))]
    pub name: String,
}

/// Nested fighting style in a cat payload, resolved by code
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct FightingStyleInput {
    /// One of BX, KB, MT, WR, BJJ
    #[serde(deserialize_with = "super::trimmed")]
    pub name: String,
    /// Also matched when given; new rows default to false
    pub ground_allowed: Option<bool>,
}

/// Request body for creating a cat
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateCatRequest {
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, max = 50, message = "Ensure this field has between 1 and 50 characters."))]
    pub name: String,
    #[serde(default, deserialize_with = "super::trimmed")]
    pub description: String,
    pub weight: f64,
    #[serde(default, deserialize_with = "super::trimmed")]
    #[validate(length(max = 50, message = "Ensure this field has no more than 50 characters."))]
    pub color: String,
    #[serde(default = "default_dangerous")]
    pub dangerous: bool,
    #[validate(nested)]
    pub abilities: Option<Vec<AbilityInput>>,
    #[validate(nested)]
    pub fighting_styles: Option<Vec<FightingStyleInput>>,
}

fn default_dangerous() -> bool {
    true
}

/// Request body for replacing a cat. Omitted optional fields keep their value.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct ReplaceCatRequest {
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, max = 50, message = "Ensure this field has between 1 and 50 characters."))]
    pub name: String,
    #[serde(default, deserialize_with = "super::trimmed_option")]
    pub description: Option<String>,
    pub weight: f64,
    #[serde(default, deserialize_with = "super::trimmed_option")]
    #[validate(length(max = 50, message = "Ensure this field has no more than 50 characters."))]
    pub color: Option<String>,
    pub dangerous: Option<bool>,
    #[validate(nested)]
    pub abilities: Option<Vec<AbilityInput>>,
    #[validate(nested)]
    pub fighting_styles: Option<Vec<FightingStyleInput>>,
}

/// Request body for partially updating a cat.
///
/// A present `abilities` or `fighting_styles` list (even empty) replaces the
/// whole association set. Unknown keys such as `user` are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateCatRequest {
    #[serde(default, deserialize_with = "super::trimmed_option")]
    #[validate(length(min = 1, max = 50, message = "Ensure this field has between 1 and 50 characters."))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::trimmed_option")]
    pub description: Option<String>,
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "super::trimmed_option")]
    #[validate(length(max = 50, message = "Ensure this field has no more than 50 characters."))]
    pub color: Option<String>,
    pub dangerous: Option<bool>,
    #[validate(nested)]
    pub abilities: Option<Vec<AbilityInput>>,
    #[validate(nested)]
    pub fighting_styles: Option<Vec<FightingStyleInput>>,
}

impl From<ReplaceCatRequest> for UpdateCatRequest {
    fn from(request: ReplaceCatRequest) -> Self {
        Self {
            name: Some(request.name),
            description: request.description,
            weight: Some(request.weight),
            color: request.color,
            dangerous: request.dangerous,
            abilities: request.abilities,
            fighting_styles: request.fighting_styles,
        }
    }
}

/// Cat projection used by list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatSummary {
    pub id: i32,
    pub name: String,
    pub dangerous: bool,
    pub abilities: Vec<AbilityResponse>,
    pub fighting_styles: Vec<FightingStyleResponse>,
}

/// Cat projection used by retrieve, create and update endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatDetail {
    #[serde(flatten)]
    pub summary: CatSummary,
    pub description: String,
    pub weight: f64,
    pub color: String,
    /// URL of the uploaded image
    pub image: Option<String>,
}

/// Cat projection returned by the image upload action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatImage {
    pub id: i32,
    pub image: Option<String>,
}

/// Multipart form accepted by the image upload action
#[derive(Debug, ToSchema)]
pub struct ImageUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

/// Public URL of a stored media path.
pub fn media_url(path: &str) -> String {
    format!("{}/{}", MEDIA_URL, path.trim_start_matches('/'))
}

fn summary(cat: &cat::Model, abilities: Vec<ability::Model>, styles: Vec<fighting_style::Model>) -> CatSummary {
    CatSummary {
        id: cat.id,
        name: cat.name.clone(),
        dangerous: cat.dangerous,
        abilities: abilities.into_iter().map(AbilityResponse::from).collect(),
        fighting_styles: styles.into_iter().map(FightingStyleResponse::from).collect(),
    }
}

impl From<CatRecord> for CatSummary {
    fn from(record: CatRecord) -> Self {
        summary(&record.cat, record.abilities, record.fighting_styles)
    }
}

impl From<CatRecord> for CatDetail {
    fn from(record: CatRecord) -> Self {
        let CatRecord {
            cat,
            abilities,
            fighting_styles,
        } = record;
        Self {
            summary: summary(&cat, abilities, fighting_styles),
            description: cat.description,
            weight: cat.weight,
            color: cat.color,
            image: cat.image.as_deref().map(media_url),
        }
    }
}

impl From<cat::Model> for CatImage {
    fn from(cat: cat::Model) -> Self {
        Self {
            id: cat.id,
            image: cat.image.as_deref().map(media_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CatRecord {
        CatRecord {
            cat: cat::Model {
                id: 7,
                user_id: 1,
                name: "Water Cat".to_string(),
                description: "He will get you in five seconds!".to_string(),
                weight: 6.0,
                color: "Red".to_string(),
                dangerous: true,
                image: Some("uploads/cat/abc.png".to_string()),
            },
            abilities: vec![ability::Model {
                id: 3,
                name: "Fly".to_string(),
                user_id: 1,
            }],
            fighting_styles: vec![fighting_style::Model {
                id: 2,
                name: "BJJ".to_string(),
                ground_allowed: true,
            }],
        }
    }

    #[test]
    fn test_detail_extends_summary_fields() {
        let detail = serde_json::to_value(CatDetail::from(record())).unwrap();
        let summary = serde_json::to_value(CatSummary::from(record())).unwrap();

        for (key, value) in summary.as_object().unwrap() {
            assert_eq!(&detail[key], value, "detail should carry summary field {}", key);
        }
        assert_eq!(detail["description"], "He will get you in five seconds!");
        assert_eq!(detail["weight"], 6.0);
        assert_eq!(detail["color"], "Red");
        assert_eq!(detail["image"], "/media/uploads/cat/abc.png");
        assert!(summary.get("description").is_none());
    }

    #[test]
    fn test_update_request_ignores_user_field() {
        let request: UpdateCatRequest =
            serde_json::from_value(serde_json::json!({"weight": 8, "user": 42})).unwrap();

        assert_eq!(request.weight, Some(8.0));
        assert!(request.abilities.is_none());
    }

    #[test]
    fn test_empty_abilities_list_is_kept_distinct_from_missing() {
        let request: UpdateCatRequest =
            serde_json::from_value(serde_json::json!({"abilities": []})).unwrap();

        assert_eq!(request.abilities.map(|a| a.len()), Some(0));
        assert!(request.fighting_styles.is_none());
    }

    #[test]
    fn test_create_request_defaults() {
        let request: CreateCatRequest =
            serde_json::from_value(serde_json::json!({"name": "Tom", "weight": 4.5})).unwrap();

        assert!(request.dangerous);
        assert_eq!(request.description, "");
        assert_eq!(request.color, "");
    }

    #[test]
    fn test_string_inputs_are_trimmed() {
        let request: UpdateCatRequest = serde_json::from_value(serde_json::json!({
            "name": "  Tom ",
            "abilities": [{"name": " Fly "}],
            "fighting_styles": [{"name": "BX "}],
        }))
        .unwrap();

        assert_eq!(request.name.as_deref(), Some("Tom"));
        assert!(request.description.is_none());
        assert_eq!(request.abilities.unwrap()[0].name, "Fly");
        assert_eq!(request.fighting_styles.unwrap()[0].name, "BX");
    }

    #[test]
    fn test_blank_name_fails_validation_after_trim() {
        let request: AbilityInput = serde_json::from_value(serde_json::json!({"name": "   "})).unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_long_name() {
        let request = CreateCatRequest {
            name: "x".repeat(51),
            description: String::new(),
            weight: 1.0,
            color: String::new(),
            dangerous: true,
            abilities: None,
            fighting_styles: None,
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }
}
