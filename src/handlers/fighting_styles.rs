use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{info, instrument, trace};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::repository::fighting_styles;
use crate::repository::filters::{parse_assigned_only, AssignedQuery};
use crate::schemas::{ApiResponse, AppState};
#[allow(unused_imports)]
use crate::schemas::{ErrorResponse, FightingStyleItem, FightingStyleList};
use crate::serializers::fighting_styles::{
    FightingStyleResponse, ReplaceFightingStyleRequest, UpdateFightingStyleRequest,
};

// Fighting styles are shared: any authenticated caller sees and edits every row.

/// List fighting styles
#[utoipa::path(
    get,
    path = "/api/v1/fighting_styles/",
    params(AssignedQuery),
    responses(
        (status = 200, description = "All fighting styles", body = FightingStyleList),
        (status = 400, description = "Malformed filter", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "fighting_styles"
)]
#[instrument(skip(state))]
pub async fn list_fighting_styles(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<AssignedQuery>,
) -> Result<Json<ApiResponse<Vec<FightingStyleResponse>>>, ApiError> {
    let assigned_only = parse_assigned_only(query.assigned_only.as_deref())?;
    trace!("User {} listing fighting styles, assigned_only={}", user.id, assigned_only);

    let data = fighting_styles::list(&state.db, assigned_only)
        .await?
        .into_iter()
        .map(FightingStyleResponse::from)
        .collect();
    Ok(Json(ApiResponse::new(data, "Fighting styles retrieved successfully")))
}

/// Replace a fighting style
#[utoipa::path(
    put,
    path = "/api/v1/fighting_styles/{id}/",
    params(("id" = i32, Path, description = "Fighting style ID")),
    request_body = ReplaceFightingStyleRequest,
    responses(
        (status = 200, description = "Fighting style updated", body = FightingStyleItem),
        (status = 400, description = "Invalid fighting style", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Fighting style not found", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "fighting_styles"
)]
#[instrument(skip(state))]
pub async fn replace_fighting_style(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<ReplaceFightingStyleRequest>,
) -> Result<Json<ApiResponse<FightingStyleResponse>>, ApiError> {
    let style = fighting_styles::update(&state.db, id, request.into()).await?;
    info!("User {} replaced fighting style {}", user.id, id);
    Ok(Json(ApiResponse::new(style.into(), "Fighting style updated successfully")))
}

/// Partially update a fighting style
#[utoipa::path(
    patch,
    path = "/api/v1/fighting_styles/{id}/",
    params(("id" = i32, Path, description = "Fighting style ID")),
    request_body = UpdateFightingStyleRequest,
    responses(
        (status = 200, description = "Fighting style updated", body = FightingStyleItem),
        (status = 400, description = "Invalid fighting style", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Fighting style not found", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "fighting_styles"
)]
#[instrument(skip(state))]
pub async fn update_fighting_style(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateFightingStyleRequest>,
) -> Result<Json<ApiResponse<FightingStyleResponse>>, ApiError> {
    let style = fighting_styles::update(&state.db, id, request).await?;
    info!("User {} updated fighting style {}", user.id, id);
    Ok(Json(ApiResponse::new(style.into(), "Fighting style updated successfully")))
}

/// Delete a fighting style
#[utoipa::path(
    delete,
    path = "/api/v1/fighting_styles/{id}/",
    params(("id" = i32, Path, description = "Fighting style ID")),
    responses(
        (status = 204, description = "Fighting style deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Fighting style not found", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "fighting_styles"
)]
#[instrument(skip(state))]
pub async fn delete_fighting_style(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    fighting_styles::delete(&state.db, id).await?;
    info!("User {} deleted fighting style {}", user.id, id);
    Ok(StatusCode::NO_CONTENT)
}
