use model::entities::ability;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Ability response model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AbilityResponse {
    pub id: i32,
    pub name: String,
}

impl From<ability::Model> for AbilityResponse {
    fn from(model: ability::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// Request body for replacing an ability
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct ReplaceAbilityRequest {
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, max = 255, message = "Ensure this field has between 1 and 255 characters."))]
    pub name: String,
}

/// Request body for partially updating an ability
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateAbilityRequest {
    #[serde(default, deserialize_with = "super::trimmed_option")]
    #[validate(length(min = 1, max = 255, message = "Ensure this field has between 1 and 255 characters."))]
    pub name: Option<String>,
}

impl From<ReplaceAbilityRequest> for UpdateAbilityRequest {
    fn from(request: ReplaceAbilityRequest) -> Self {
        Self {
            name: Some(request.name),
        }
    }
}
