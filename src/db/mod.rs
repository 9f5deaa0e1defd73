//! Database access layer
//!
//! Connection pool construction plus one repository module per entity.
//! Repository functions return [`RepoError`], a closed set of failure
//! kinds classified from the raw PostgreSQL error codes so handlers
//! can match exhaustively.

pub mod album_repo;
pub mod comment_repo;
pub mod photo_repo;
pub mod post_repo;
pub mod todo_repo;
pub mod user_repo;

use crate::config::DatabaseConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-layer failure kinds
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("record not found")]
    NotFound,

    #[error("referenced record not found")]
    ForeignKeyViolation,

    #[error("unique constraint violated")]
    UniqueViolation,

    #[error("database error: {0}")]
    Other(sqlx::Error),
}

// PostgreSQL error codes for referential integrity failures
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";
const PG_UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => return RepoError::NotFound,
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some(PG_FOREIGN_KEY_VIOLATION) => return RepoError::ForeignKeyViolation,
                Some(PG_UNIQUE_VIOLATION) => return RepoError::UniqueViolation,
                _ => {}
            },
            _ => {}
        }
        RepoError::Other(err)
    }
}

/// Create the PostgreSQL connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.url)
        .await
}

/// Run pending migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_classifies_as_not_found() {
        let err = RepoError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepoError::NotFound));
    }

    #[test]
    fn pool_errors_classify_as_other() {
        let err = RepoError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, RepoError::Other(_)));
    }
}
