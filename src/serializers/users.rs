use model::entities::user;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for registering an account
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, max = 255, message = "Ensure this field has between 1 and 255 characters."))]
    pub email: String,
    #[validate(length(min = 5, message = "Ensure this field has at least 5 characters."))]
    pub password: String,
    #[serde(default, deserialize_with = "super::trimmed")]
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub name: String,
}

/// Request body for updating the caller's profile
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "super::trimmed_option")]
    #[validate(length(min = 1, max = 255, message = "Ensure this field has between 1 and 255 characters."))]
    pub email: Option<String>,
    #[validate(length(min = 5, message = "Ensure this field has at least 5 characters."))]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "super::trimmed_option")]
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub name: Option<String>,
}

/// Credentials exchanged for an API token
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct TokenRequest {
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub email: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}

/// User response model. The password is never returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub email: String,
    pub name: String,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            email: model.email,
            name: model.name,
        }
    }
}

/// API token response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}
