//! Per-request data access.
//!
//! Every function takes the connection and the caller's identity explicitly
//! and returns rows already scoped to that caller. Mutations that touch
//! several tables run inside one transaction.

pub mod abilities;
pub mod cats;
pub mod fighting_styles;
pub mod filters;
pub mod users;
