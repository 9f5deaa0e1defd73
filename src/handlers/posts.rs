use crate::db::{post_repo, RepoError};
use crate::error::{AppError, Result};
use crate::handlers::parse_id;
use crate::models::{CreatePostRequest, UpdatePostRequest};
use crate::pagination::{ListResponse, Page};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub user_id: Option<i64>,
    pub search: Option<String>,
}

/// GET /api/posts
pub async fn list_posts(
    pool: web::Data<PgPool>,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse> {
    let page = Page::new(query.page, query.limit);
    let search = query.search.as_deref();

    let posts = post_repo::list_posts(
        pool.get_ref(),
        query.user_id,
        search,
        page.limit,
        page.offset(),
    )
    .await
    .map_err(fetch_err)?;
    let total = post_repo::count_posts(pool.get_ref(), query.user_id, search)
        .await
        .map_err(fetch_err)?;

    Ok(HttpResponse::Ok().json(ListResponse::new(posts, page, total)))
}

/// GET /api/posts/{id} - post with author and comment thread
pub async fn get_post(pool: web::Data<PgPool>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = parse_id(&path)?;

    match post_repo::find_detail(pool.get_ref(), id).await.map_err(fetch_err)? {
        Some(post) => Ok(HttpResponse::Ok().json(post)),
        None => Err(AppError::NotFound("Post not found".to_string())),
    }
}

/// POST /api/posts
pub async fn create_post(
    pool: web::Data<PgPool>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    match post_repo::create_post(pool.get_ref(), &req).await {
        Ok(post) => Ok(HttpResponse::Created().json(post)),
        Err(RepoError::ForeignKeyViolation) => {
            Err(AppError::BadRequest("User not found".to_string()))
        }
        Err(e) => {
            tracing::error!("create post failed: {e}");
            Err(AppError::Internal("Failed to create post".to_string()))
        }
    }
}

/// PUT /api/posts/{id} - partial update
pub async fn update_post(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;
    req.validate()?;

    match post_repo::update_post(pool.get_ref(), id, &req).await {
        Ok(post) => Ok(HttpResponse::Ok().json(post)),
        Err(RepoError::NotFound) => Err(AppError::NotFound("Post not found".to_string())),
        Err(e) => {
            tracing::error!("update post failed: {e}");
            Err(AppError::Internal("Failed to update post".to_string()))
        }
    }
}

/// DELETE /api/posts/{id}
pub async fn delete_post(pool: web::Data<PgPool>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = parse_id(&path)?;

    match post_repo::delete_post(pool.get_ref(), id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Post deleted successfully",
        }))),
        Err(RepoError::NotFound) => Err(AppError::NotFound("Post not found".to_string())),
        Err(e) => {
            tracing::error!("delete post failed: {e}");
            Err(AppError::Internal("Failed to delete post".to_string()))
        }
    }
}

fn fetch_err(e: RepoError) -> AppError {
    tracing::error!("fetch posts failed: {e}");
    AppError::Internal("Failed to fetch posts".to_string())
}
