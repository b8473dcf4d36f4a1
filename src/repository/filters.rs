use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;

/// Query parameters for listing cats
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatListQuery {
    /// Comma separated list of ability IDs to filter
    pub abilities: Option<String>,
    /// Comma separated list of fighting style IDs to filter
    pub fighting_styles: Option<String>,
}

/// Query parameters for listing abilities and fighting styles
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssignedQuery {
    /// Filter by items assigned to cats (0 or 1)
    pub assigned_only: Option<String>,
}

/// Parsed cat list filter. `None` means the filter is not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatFilter {
    pub abilities: Option<Vec<i32>>,
    pub fighting_styles: Option<Vec<i32>>,
}

impl TryFrom<CatListQuery> for CatFilter {
    type Error = ApiError;

    fn try_from(query: CatListQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            abilities: parse_id_list("abilities", query.abilities.as_deref())?,
            fighting_styles: parse_id_list("fighting_styles", query.fighting_styles.as_deref())?,
        })
    }
}

/// Parse a comma separated list of integer IDs.
///
/// A missing or empty parameter disables the filter; any item that is not an
/// integer fails the whole request.
pub fn parse_id_list(field: &str, raw: Option<&str>) -> Result<Option<Vec<i32>>, ApiError> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(None),
    };

    raw.split(',')
        .map(|item| {
            item.trim().parse::<i32>().map_err(|_| {
                ApiError::field(field, format!("\"{}\" is not a valid integer ID.", item))
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Parse the `assigned_only` flag. Any non-zero integer enables it.
pub fn parse_assigned_only(raw: Option<&str>) -> Result<bool, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(false),
        Some(value) => value
            .parse::<i64>()
            .map(|flag| flag != 0)
            .map_err(|_| ApiError::field("assigned_only", "A valid integer is required.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("abilities", None).unwrap(), None);
        assert_eq!(parse_id_list("abilities", Some("")).unwrap(), None);
        assert_eq!(parse_id_list("abilities", Some("3")).unwrap(), Some(vec![3]));
        assert_eq!(
            parse_id_list("abilities", Some("1, 2,3")).unwrap(),
            Some(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_parse_id_list_rejects_malformed_items() {
        for raw in ["a", "1,b", "1,,2", "1.5"] {
            match parse_id_list("fighting_styles", Some(raw)) {
                Err(ApiError::Validation(fields)) => assert!(fields.contains_key("fighting_styles")),
                other => panic!("Expected validation error for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_parse_assigned_only() {
        assert!(!parse_assigned_only(None).unwrap());
        assert!(!parse_assigned_only(Some("0")).unwrap());
        assert!(parse_assigned_only(Some("1")).unwrap());
        assert!(parse_assigned_only(Some("2")).unwrap());
        assert!(parse_assigned_only(Some("yes")).is_err());
    }

    #[test]
    fn test_cat_filter_from_query() {
        let filter = CatFilter::try_from(CatListQuery {
            abilities: Some("4,5".to_string()),
            fighting_styles: None,
        })
        .unwrap();

        assert_eq!(filter.abilities, Some(vec![4, 5]));
        assert_eq!(filter.fighting_styles, None);
    }
}
