use crate::handlers::{
    abilities::{delete_ability, list_abilities, replace_ability, update_ability},
    cats::{create_cat, delete_cat, get_cat, list_cats, replace_cat, update_cat, upload_image},
    fighting_styles::{
        delete_fighting_style, list_fighting_styles, replace_fighting_style,
        update_fighting_style,
    },
    health::health_check,
    authenticated_method_not_allowed, method_not_allowed, not_found,
    users::{create_token, create_user, get_me, update_me},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Routes under `/api/v1`. Every path answers unknown methods with 405,
/// after authentication where the path requires a token.
fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        // Cats
        .route(
            "/cats/",
            get(list_cats).post(create_cat).fallback(authenticated_method_not_allowed),
        )
        .route(
            "/cats/:id/",
            get(get_cat)
                .put(replace_cat)
                .patch(update_cat)
                .delete(delete_cat)
                .fallback(authenticated_method_not_allowed),
        )
        .route(
            "/cats/:id/upload-image/",
            post(upload_image)
                .fallback(authenticated_method_not_allowed)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        // Abilities have no create or retrieve endpoint
        .route(
            "/abilities/",
            get(list_abilities).fallback(authenticated_method_not_allowed),
        )
        .route(
            "/abilities/:id/",
            put(replace_ability)
                .patch(update_ability)
                .delete(delete_ability)
                .fallback(authenticated_method_not_allowed),
        )
        // Fighting styles
        .route(
            "/fighting_styles/",
            get(list_fighting_styles).fallback(authenticated_method_not_allowed),
        )
        .route(
            "/fighting_styles/:id/",
            put(replace_fighting_style)
                .patch(update_fighting_style)
                .delete(delete_fighting_style)
                .fallback(authenticated_method_not_allowed),
        )
        // Users
        .route("/users/", post(create_user).fallback(method_not_allowed))
        .route("/users/token/", post(create_token).fallback(method_not_allowed))
        .route(
            "/users/me/",
            get(get_me)
                .put(update_me)
                .patch(update_me)
                .fallback(authenticated_method_not_allowed),
        )
}

/// Create application router with all routes and middleware
pub fn create_router(state: AppState, request_timeout: Duration, max_upload_bytes: usize) -> Router {
    let media = ServeDir::new(&state.media_root);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes(max_upload_bytes))
        // Uploaded images
        .nest_service("/media", media)
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
