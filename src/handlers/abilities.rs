use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{info, instrument, trace};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::repository::abilities;
use crate::repository::filters::{parse_assigned_only, AssignedQuery};
use crate::schemas::{ApiResponse, AppState};
#[allow(unused_imports)]
use crate::schemas::{AbilityItem, AbilityList, ErrorResponse};
use crate::serializers::abilities::{AbilityResponse, ReplaceAbilityRequest, UpdateAbilityRequest};

/// List the caller's abilities
#[utoipa::path(
    get,
    path = "/api/v1/abilities/",
    params(AssignedQuery),
    responses(
        (status = 200, description = "Abilities owned by the caller", body = AbilityList),
        (status = 400, description = "Malformed filter", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "abilities"
)]
#[instrument(skip(state))]
pub async fn list_abilities(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<AssignedQuery>,
) -> Result<Json<ApiResponse<Vec<AbilityResponse>>>, ApiError> {
    let assigned_only = parse_assigned_only(query.assigned_only.as_deref())?;
    trace!("Listing abilities, assigned_only={}", assigned_only);

    let data = abilities::list(&state.db, user.id, assigned_only)
        .await?
        .into_iter()
        .map(AbilityResponse::from)
        .collect();
    Ok(Json(ApiResponse::new(data, "Abilities retrieved successfully")))
}

/// Replace an ability
#[utoipa::path(
    put,
    path = "/api/v1/abilities/{id}/",
    params(("id" = i32, Path, description = "Ability ID")),
    request_body = ReplaceAbilityRequest,
    responses(
        (status = 200, description = "Ability updated", body = AbilityItem),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Ability not found", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "abilities"
)]
#[instrument(skip(state))]
pub async fn replace_ability(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<ReplaceAbilityRequest>,
) -> Result<Json<ApiResponse<AbilityResponse>>, ApiError> {
    let ability = abilities::update(&state.db, user.id, id, request.into()).await?;
    info!("Replaced ability {}", id);
    Ok(Json(ApiResponse::new(ability.into(), "Ability updated successfully")))
}

/// Partially update an ability
#[utoipa::path(
    patch,
    path = "/api/v1/abilities/{id}/",
    params(("id" = i32, Path, description = "Ability ID")),
    request_body = UpdateAbilityRequest,
    responses(
        (status = 200, description = "Ability updated", body = AbilityItem),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Ability not found", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "abilities"
)]
#[instrument(skip(state))]
pub async fn update_ability(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateAbilityRequest>,
) -> Result<Json<ApiResponse<AbilityResponse>>, ApiError> {
    let ability = abilities::update(&state.db, user.id, id, request).await?;
    info!("Updated ability {}", id);
    Ok(Json(ApiResponse::new(ability.into(), "Ability updated successfully")))
}

/// Delete an ability. Cats linked to it lose the association.
#[utoipa::path(
    delete,
    path = "/api/v1/abilities/{id}/",
    params(("id" = i32, Path, description = "Ability ID")),
    responses(
        (status = 204, description = "Ability deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Ability not found", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "abilities"
)]
#[instrument(skip(state))]
pub async fn delete_ability(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    abilities::delete(&state.db, user.id, id).await?;
    info!("Deleted ability {}", id);
    Ok(StatusCode::NO_CONTENT)
}
