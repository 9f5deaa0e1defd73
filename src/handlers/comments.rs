use crate::db::{comment_repo, RepoError};
use crate::error::{AppError, Result};
use crate::handlers::parse_id;
use crate::models::{CreateCommentRequest, UpdateCommentRequest};
use crate::pagination::{ListResponse, Page};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub post_id: Option<i64>,
    pub user_id: Option<i64>,
    pub search: Option<String>,
}

/// GET /api/comments
pub async fn list_comments(
    pool: web::Data<PgPool>,
    query: web::Query<ListCommentsQuery>,
) -> Result<HttpResponse> {
    let page = Page::new(query.page, query.limit);
    let search = query.search.as_deref();

    let comments = comment_repo::list_comments(
        pool.get_ref(),
        query.post_id,
        query.user_id,
        search,
        page.limit,
        page.offset(),
    )
    .await
    .map_err(fetch_err)?;
    let total = comment_repo::count_comments(pool.get_ref(), query.post_id, query.user_id, search)
        .await
        .map_err(fetch_err)?;

    Ok(HttpResponse::Ok().json(ListResponse::new(comments, page, total)))
}

/// GET /api/comments/{id} - comment with parent post and optional commenter
pub async fn get_comment(pool: web::Data<PgPool>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = parse_id(&path)?;

    match comment_repo::find_by_id(pool.get_ref(), id).await.map_err(fetch_err)? {
        Some(comment) => Ok(HttpResponse::Ok().json(comment)),
        None => Err(AppError::NotFound("Comment not found".to_string())),
    }
}

/// POST /api/comments
pub async fn create_comment(
    pool: web::Data<PgPool>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    match comment_repo::create_comment(pool.get_ref(), &req).await {
        Ok(comment) => Ok(HttpResponse::Created().json(comment)),
        Err(RepoError::ForeignKeyViolation) => {
            Err(AppError::BadRequest("Post or User not found".to_string()))
        }
        Err(e) => {
            tracing::error!("create comment failed: {e}");
            Err(AppError::Internal("Failed to create comment".to_string()))
        }
    }
}

/// PUT /api/comments/{id} - partial update
pub async fn update_comment(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    req: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;
    req.validate()?;

    match comment_repo::update_comment(pool.get_ref(), id, &req).await {
        Ok(comment) => Ok(HttpResponse::Ok().json(comment)),
        Err(RepoError::NotFound) => Err(AppError::NotFound("Comment not found".to_string())),
        Err(e) => {
            tracing::error!("update comment failed: {e}");
            Err(AppError::Internal("Failed to update comment".to_string()))
        }
    }
}

/// DELETE /api/comments/{id}
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;

    match comment_repo::delete_comment(pool.get_ref(), id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Comment deleted successfully",
        }))),
        Err(RepoError::NotFound) => Err(AppError::NotFound("Comment not found".to_string())),
        Err(e) => {
            tracing::error!("delete comment failed: {e}");
            Err(AppError::Internal("Failed to delete comment".to_string()))
        }
    }
}

fn fetch_err(e: RepoError) -> AppError {
    tracing::error!("fetch comments failed: {e}");
    AppError::Internal("Failed to fetch comments".to_string())
}
