//! Todos API
//!
//! A CRUD REST API over six related entities (users, posts, comments,
//! albums, photos, todos) backed by PostgreSQL.
//!
//! # Modules
//!
//! - `handlers`: HTTP request handlers, one module per entity
//! - `models`: Entity structs and request/response types
//! - `db`: Database access layer and per-entity repositories
//! - `pagination`: Shared page/limit/meta contract for list endpoints
//! - `routes`: Centralized route configuration
//! - `error`: Error types and HTTP mapping
//! - `config`: Configuration management
//! - `validators`: Input format validation helpers

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod validators;

pub use config::Config;
pub use error::{AppError, Result};
