//! Request payloads and response projections.
//!
//! Each handler picks its projection explicitly: list endpoints return
//! summaries, single-item endpoints return details.

use serde::{Deserialize, Deserializer};

pub mod abilities;
pub mod cats;
pub mod fighting_styles;
pub mod users;

/// Deserialize a string with surrounding whitespace removed.
pub(crate) fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|value| value.trim().to_string())
}

/// [`trimmed`] for optional fields. Pair with `#[serde(default)]`.
pub(crate) fn trimmed_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|value| value.map(|v| v.trim().to_string()))
}
