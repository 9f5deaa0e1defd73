use crate::db::{album_repo, RepoError};
use crate::error::{AppError, Result};
use crate::handlers::parse_id;
use crate::models::{CreateAlbumRequest, UpdateAlbumRequest};
use crate::pagination::{ListResponse, Page};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAlbumsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub user_id: Option<i64>,
    pub search: Option<String>,
}

/// GET /api/albums
pub async fn list_albums(
    pool: web::Data<PgPool>,
    query: web::Query<ListAlbumsQuery>,
) -> Result<HttpResponse> {
    let page = Page::new(query.page, query.limit);
    let search = query.search.as_deref();

    let albums = album_repo::list_albums(
        pool.get_ref(),
        query.user_id,
        search,
        page.limit,
        page.offset(),
    )
    .await
    .map_err(fetch_err)?;
    let total = album_repo::count_albums(pool.get_ref(), query.user_id, search)
        .await
        .map_err(fetch_err)?;

    Ok(HttpResponse::Ok().json(ListResponse::new(albums, page, total)))
}

/// GET /api/albums/{id} - album with owner and photos
pub async fn get_album(pool: web::Data<PgPool>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = parse_id(&path)?;

    match album_repo::find_detail(pool.get_ref(), id).await.map_err(fetch_err)? {
        Some(album) => Ok(HttpResponse::Ok().json(album)),
        None => Err(AppError::NotFound("Album not found".to_string())),
    }
}

/// POST /api/albums
pub async fn create_album(
    pool: web::Data<PgPool>,
    req: web::Json<CreateAlbumRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    match album_repo::create_album(pool.get_ref(), &req).await {
        Ok(album) => Ok(HttpResponse::Created().json(album)),
        Err(RepoError::ForeignKeyViolation) => {
            Err(AppError::BadRequest("User not found".to_string()))
        }
        Err(e) => {
            tracing::error!("create album failed: {e}");
            Err(AppError::Internal("Failed to create album".to_string()))
        }
    }
}

/// PUT /api/albums/{id} - partial update
pub async fn update_album(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    req: web::Json<UpdateAlbumRequest>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;
    req.validate()?;

    match album_repo::update_album(pool.get_ref(), id, &req).await {
        Ok(album) => Ok(HttpResponse::Ok().json(album)),
        Err(RepoError::NotFound) => Err(AppError::NotFound("Album not found".to_string())),
        Err(e) => {
            tracing::error!("update album failed: {e}");
            Err(AppError::Internal("Failed to update album".to_string()))
        }
    }
}

/// DELETE /api/albums/{id}
pub async fn delete_album(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;

    match album_repo::delete_album(pool.get_ref(), id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Album deleted successfully",
        }))),
        Err(RepoError::NotFound) => Err(AppError::NotFound("Album not found".to_string())),
        Err(e) => {
            tracing::error!("delete album failed: {e}");
            Err(AppError::Internal("Failed to delete album".to_string()))
        }
    }
}

fn fetch_err(e: RepoError) -> AppError {
    tracing::error!("fetch albums failed: {e}");
    AppError::Internal("Failed to fetch albums".to_string())
}
