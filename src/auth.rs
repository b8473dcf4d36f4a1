use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use model::entities::{auth_token, user};
use sea_orm::{EntityTrait, QuerySelect, RelationTrait, JoinType, QueryFilter, ColumnTrait};
use tracing::{debug, trace, warn};

use crate::error::ApiError;
use crate::schemas::AppState;

/// Schemes accepted in the `Authorization` header.
const AUTH_SCHEMES: [&str; 2] = ["Token", "Bearer"];

/// The authenticated caller, resolved from the request's API token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i32,
}

/// Extract the token key from an `Authorization` header value.
fn parse_authorization(value: &str) -> Result<&str, ApiError> {
    let mut parts = value.split_whitespace();
    let scheme = parts.next().unwrap_or_default();
    if !AUTH_SCHEMES
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(scheme))
    {
        return Err(ApiError::Unauthorized(
            "Authentication credentials were not provided.".to_string(),
        ));
    }

    match (parts.next(), parts.next()) {
        (Some(key), None) => Ok(key),
        (None, _) => Err(ApiError::Unauthorized(
            "Invalid token header. No credentials provided.".to_string(),
        )),
        (Some(_), Some(_)) => Err(ApiError::Unauthorized(
            "Invalid token header. Token string should not contain spaces.".to_string(),
        )),
    }
}

/// Resolve a token key to the id of an active user.
async fn resolve_token(state: &AppState, key: &str) -> Result<i32, ApiError> {
    if let Some(user_id) = state.token_cache.get(key).await {
        trace!("Token cache hit for user {}", user_id);
        return Ok(user_id);
    }

    let owner = user::Entity::find()
        .join(JoinType::InnerJoin, user::Relation::AuthToken.def())
        .filter(auth_token::Column::Key.eq(key))
        .one(&state.db)
        .await?;

    match owner {
        Some(owner) if owner.is_active => {
            debug!("Authenticated user {}", owner.id);
            state.token_cache.insert(key.to_string(), owner.id).await;
            Ok(owner.id)
        }
        Some(owner) => {
            warn!("Token of inactive user {} rejected", owner.id);
            Err(ApiError::Unauthorized("User inactive or deleted.".to_string()))
        }
        None => {
            warn!("Unknown token presented");
            Err(ApiError::Unauthorized("Invalid token.".to_string()))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                ApiError::Unauthorized("Authentication credentials were not provided.".to_string())
            })?
            .to_str()
            .map_err(|_| {
                ApiError::Unauthorized(
                    "Invalid token header. Token string should not contain invalid characters."
                        .to_string(),
                )
            })?;

        let key = parse_authorization(header)?;
        let id = resolve_token(&state, key).await?;
        Ok(AuthUser { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_and_bearer_schemes() {
        assert_eq!(parse_authorization("Token abc").unwrap(), "abc");
        assert_eq!(parse_authorization("Bearer abc").unwrap(), "abc");
        assert_eq!(parse_authorization("bearer abc").unwrap(), "abc");
    }

    #[test]
    fn test_parse_rejects_malformed_headers() {
        assert!(parse_authorization("Basic abc").is_err());
        assert!(parse_authorization("Token").is_err());
        assert!(parse_authorization("Token a b").is_err());
        assert!(parse_authorization("").is_err());
    }
}
