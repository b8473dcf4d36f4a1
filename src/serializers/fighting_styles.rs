use model::entities::fighting_style::{self, FightingStyleCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::ApiError;

/// Fighting style response model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FightingStyleResponse {
    pub id: i32,
    /// One of BX, KB, MT, WR, BJJ
    pub name: String,
    /// Display name of the code
    pub label: String,
    pub ground_allowed: bool,
}

impl From<fighting_style::Model> for FightingStyleResponse {
    fn from(model: fighting_style::Model) -> Self {
        let label = model
            .code()
            .map(|code| code.label().to_string())
            .unwrap_or_default();
        Self {
            id: model.id,
            name: model.name,
            label,
            ground_allowed: model.ground_allowed,
        }
    }
}

/// Request body for replacing a fighting style
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct ReplaceFightingStyleRequest {
    #[serde(deserialize_with = "super::trimmed")]
    pub name: String,
    pub ground_allowed: Option<bool>,
}

/// Request body for partially updating a fighting style
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateFightingStyleRequest {
    #[serde(default, deserialize_with = "super::trimmed_option")]
    pub name: Option<String>,
    pub ground_allowed: Option<bool>,
}

impl From<ReplaceFightingStyleRequest> for UpdateFightingStyleRequest {
    fn from(request: ReplaceFightingStyleRequest) -> Self {
        Self {
            name: Some(request.name),
            ground_allowed: request.ground_allowed,
        }
    }
}

/// Parse a fighting style code, reporting failures against `field`.
pub fn parse_code(field: &str, name: &str) -> Result<FightingStyleCode, ApiError> {
    name.parse::<FightingStyleCode>()
        .map_err(|e| ApiError::field(field, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code_reports_field() {
        assert_eq!(parse_code("name", "MT").unwrap(), FightingStyleCode::MuayThai);

        match parse_code("fighting_styles[1].name", "Karate") {
            Err(ApiError::Validation(fields)) => {
                assert!(fields.contains_key("fighting_styles[1].name"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_response_carries_label() {
        let response = FightingStyleResponse::from(fighting_style::Model {
            id: 1,
            name: "BJJ".to_string(),
            ground_allowed: true,
        });

        assert_eq!(response.name, "BJJ");
        assert_eq!(response.label, "Brazilian Jiu-Jitsu");
    }
}
