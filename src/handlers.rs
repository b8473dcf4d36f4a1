use axum::http::{Method, Uri};
use tracing::debug;

use crate::auth::AuthUser;
use crate::error::ApiError;

pub mod abilities;
pub mod cats;
pub mod fighting_styles;
pub mod health;
pub mod users;

/// Fallback for a known path requested with a method it does not serve.
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method.to_string())
}

/// Same as [`method_not_allowed`] for paths that require a token, so callers
/// without credentials get 401 first.
pub async fn authenticated_method_not_allowed(_user: AuthUser, method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method.to_string())
}

/// Fallback for unknown paths.
pub async fn not_found(uri: Uri) -> ApiError {
    debug!("No route for {}", uri);
    ApiError::NotFound("Not found.".to_string())
}
