//! HTTP request handlers, one module per entity
//!
//! Handlers translate verbs + validated input into repository calls
//! and map the closed set of repository failures onto the fixed HTTP
//! responses. No business logic lives here beyond shape translation.

pub mod albums;
pub mod comments;
pub mod health;
pub mod photos;
pub mod posts;
pub mod todos;
pub mod users;

use crate::error::{AppError, Result};

/// Parse a numeric path id; a non-numeric value is a client error,
/// not an ambiguous 404.
pub(crate) fn parse_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| AppError::BadRequest("Invalid id".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_id("1.5"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_id(""), Err(AppError::BadRequest(_))));
    }
}
