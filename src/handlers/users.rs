use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{debug, info, instrument};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::repository::users;
use crate::schemas::{ApiResponse, AppState};
#[allow(unused_imports)]
use crate::schemas::{ErrorResponse, TokenItem, UserItem};
use crate::serializers::users::{
    CreateUserRequest, TokenRequest, TokenResponse, UpdateUserRequest, UserResponse,
};

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/v1/users/",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = UserItem),
        (status = 400, description = "Invalid data or email already taken", body = ErrorResponse)
    ),
    tag = "users"
)]
#[instrument(skip(state, request))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let created = users::register(&state.db, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(created.into(), "User created successfully")),
    ))
}

/// Exchange email and password for an API token
#[utoipa::path(
    post,
    path = "/api/v1/users/token/",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenItem),
        (status = 400, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "users"
)]
#[instrument(skip(state, request))]
pub async fn create_token(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TokenRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let token = users::obtain_token(&state.db, request).await?;
    info!("Token issued for user {}", token.user_id);
    Ok(Json(ApiResponse::new(
        TokenResponse { token: token.key },
        "Token created successfully",
    )))
}

/// Get the caller's profile
#[utoipa::path(
    get,
    path = "/api/v1/users/me/",
    responses(
        (status = 200, description = "Profile of the caller", body = UserItem),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "users"
)]
#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let profile = users::get(&state.db, user.id).await?;
    debug!("Retrieved profile of user {}", profile.id);
    Ok(Json(ApiResponse::new(profile.into(), "User retrieved successfully")))
}

/// Update the caller's profile. Served for both PUT and PATCH.
#[utoipa::path(
    patch,
    path = "/api/v1/users/me/",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserItem),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "users"
)]
#[instrument(skip(state, request))]
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let profile = users::update(&state.db, user.id, request).await?;
    info!("Updated profile of user {}", user.id);
    Ok(Json(ApiResponse::new(profile.into(), "User updated successfully")))
}
