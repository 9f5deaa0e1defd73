use crate::db::{user_repo, RepoError};
use crate::error::{AppError, Result};
use crate::handlers::parse_id;
use crate::models::{CreateUserRequest, UpdateUserRequest};
use crate::pagination::{ListResponse, Page};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

/// GET /api/users
pub async fn list_users(
    pool: web::Data<PgPool>,
    query: web::Query<ListUsersQuery>,
) -> Result<HttpResponse> {
    let page = Page::new(query.page, query.limit);
    let search = query.search.as_deref();

    let users = user_repo::list_users(pool.get_ref(), search, page.limit, page.offset())
        .await
        .map_err(fetch_err)?;
    let total = user_repo::count_users(pool.get_ref(), search)
        .await
        .map_err(fetch_err)?;

    Ok(HttpResponse::Ok().json(ListResponse::new(users, page, total)))
}

/// GET /api/users/{id} - user with owned posts, albums, todos and comments
pub async fn get_user(pool: web::Data<PgPool>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = parse_id(&path)?;

    match user_repo::find_detail(pool.get_ref(), id).await.map_err(fetch_err)? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(AppError::NotFound("User not found".to_string())),
    }
}

/// POST /api/users
pub async fn create_user(
    pool: web::Data<PgPool>,
    req: web::Json<CreateUserRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    match user_repo::create_user(pool.get_ref(), &req).await {
        Ok(user) => Ok(HttpResponse::Created().json(user)),
        Err(RepoError::UniqueViolation) => Err(AppError::BadRequest(
            "Username or email already exists".to_string(),
        )),
        Err(e) => {
            tracing::error!("create user failed: {e}");
            Err(AppError::Internal("Failed to create user".to_string()))
        }
    }
}

/// PUT /api/users/{id} - partial update
pub async fn update_user(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    req: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;
    req.validate()?;

    match user_repo::update_user(pool.get_ref(), id, &req).await {
        Ok(user) => Ok(HttpResponse::Ok().json(user)),
        Err(RepoError::NotFound) => Err(AppError::NotFound("User not found".to_string())),
        Err(RepoError::UniqueViolation) => Err(AppError::BadRequest(
            "Username or email already exists".to_string(),
        )),
        Err(e) => {
            tracing::error!("update user failed: {e}");
            Err(AppError::Internal("Failed to update user".to_string()))
        }
    }
}

/// DELETE /api/users/{id}
pub async fn delete_user(pool: web::Data<PgPool>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = parse_id(&path)?;

    match user_repo::delete_user(pool.get_ref(), id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "User deleted successfully",
        }))),
        Err(RepoError::NotFound) => Err(AppError::NotFound("User not found".to_string())),
        Err(e) => {
            tracing::error!("delete user failed: {e}");
            Err(AppError::Internal("Failed to delete user".to_string()))
        }
    }
}

fn fetch_err(e: RepoError) -> AppError {
    tracing::error!("fetch users failed: {e}");
    AppError::Internal("Failed to fetch users".to_string())
}
