//! Shared serde helpers.

pub mod rfc3339;
