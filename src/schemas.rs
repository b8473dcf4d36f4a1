use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::serializers::{
    abilities::{AbilityResponse, ReplaceAbilityRequest, UpdateAbilityRequest},
    cats::{
        AbilityInput, CatDetail, CatImage, CatSummary, CreateCatRequest, FightingStyleInput,
        ImageUploadForm, ReplaceCatRequest, UpdateCatRequest,
    },
    fighting_styles::{
        FightingStyleResponse, ReplaceFightingStyleRequest, UpdateFightingStyleRequest,
    },
    users::{CreateUserRequest, TokenRequest, TokenResponse, UpdateUserRequest, UserResponse},
};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Resolved API tokens, token key to user id
    pub token_cache: Cache<String, i32>,
    /// Directory uploaded images are stored in
    pub media_root: PathBuf,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
#[aliases(
    CatSummaryList = ApiResponse<Vec<CatSummary>>,
    CatDetailResponse = ApiResponse<CatDetail>,
    CatImageResponse = ApiResponse<CatImage>,
    AbilityList = ApiResponse<Vec<AbilityResponse>>,
    AbilityItem = ApiResponse<AbilityResponse>,
    FightingStyleList = ApiResponse<Vec<FightingStyleResponse>>,
    FightingStyleItem = ApiResponse<FightingStyleResponse>,
    UserItem = ApiResponse<UserResponse>,
    TokenItem = ApiResponse<TokenResponse>,
)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
    /// Field-level validation messages, keyed by field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Registers the `Authorization: Token <key>` scheme.
struct TokenSecurity;

impl Modify for TokenSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "Authorization",
                    "Token <key> or Bearer <key>",
                ))),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::cats::list_cats,
        crate::handlers::cats::create_cat,
        crate::handlers::cats::get_cat,
        crate::handlers::cats::replace_cat,
        crate::handlers::cats::update_cat,
        crate::handlers::cats::delete_cat,
        crate::handlers::cats::upload_image,
        crate::handlers::abilities::list_abilities,
        crate::handlers::abilities::replace_ability,
        crate::handlers::abilities::update_ability,
        crate::handlers::abilities::delete_ability,
        crate::handlers::fighting_styles::list_fighting_styles,
        crate::handlers::fighting_styles::replace_fighting_style,
        crate::handlers::fighting_styles::update_fighting_style,
        crate::handlers::fighting_styles::delete_fighting_style,
        crate::handlers::users::create_user,
        crate::handlers::users::create_token,
        crate::handlers::users::get_me,
        crate::handlers::users::update_me,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            CatSummary,
            CatDetail,
            CatImage,
            ImageUploadForm,
            CreateCatRequest,
            ReplaceCatRequest,
            UpdateCatRequest,
            AbilityInput,
            FightingStyleInput,
            AbilityResponse,
            ReplaceAbilityRequest,
            UpdateAbilityRequest,
            FightingStyleResponse,
            ReplaceFightingStyleRequest,
            UpdateFightingStyleRequest,
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            TokenRequest,
            TokenResponse,
            CatSummaryList,
            CatDetailResponse,
            CatImageResponse,
            AbilityList,
            AbilityItem,
            FightingStyleList,
            FightingStyleItem,
            UserItem,
            TokenItem,
        )
    ),
    modifiers(&TokenSecurity),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "cats", description = "Cat management endpoints"),
        (name = "abilities", description = "Ability management endpoints"),
        (name = "fighting_styles", description = "Fighting style management endpoints"),
        (name = "users", description = "Account and token endpoints"),
    ),
    info(
        title = "Cat API",
        description = "Manage cats together with their abilities and fighting styles",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
