use crate::db::{photo_repo, RepoError};
use crate::error::{AppError, Result};
use crate::handlers::parse_id;
use crate::models::{CreatePhotoRequest, UpdatePhotoRequest};
use crate::pagination::{ListResponse, Page};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPhotosQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub album_id: Option<i64>,
    pub search: Option<String>,
}

/// GET /api/photos
pub async fn list_photos(
    pool: web::Data<PgPool>,
    query: web::Query<ListPhotosQuery>,
) -> Result<HttpResponse> {
    let page = Page::new(query.page, query.limit);
    let search = query.search.as_deref();

    let photos = photo_repo::list_photos(
        pool.get_ref(),
        query.album_id,
        search,
        page.limit,
        page.offset(),
    )
    .await
    .map_err(fetch_err)?;
    let total = photo_repo::count_photos(pool.get_ref(), query.album_id, search)
        .await
        .map_err(fetch_err)?;

    Ok(HttpResponse::Ok().json(ListResponse::new(photos, page, total)))
}

/// GET /api/photos/{id} - photo with parent album summary
pub async fn get_photo(pool: web::Data<PgPool>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = parse_id(&path)?;

    match photo_repo::find_by_id(pool.get_ref(), id).await.map_err(fetch_err)? {
        Some(photo) => Ok(HttpResponse::Ok().json(photo)),
        None => Err(AppError::NotFound("Photo not found".to_string())),
    }
}

/// POST /api/photos
pub async fn create_photo(
    pool: web::Data<PgPool>,
    req: web::Json<CreatePhotoRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    match photo_repo::create_photo(pool.get_ref(), &req).await {
        Ok(photo) => Ok(HttpResponse::Created().json(photo)),
        Err(RepoError::ForeignKeyViolation) => {
            Err(AppError::BadRequest("Album not found".to_string()))
        }
        Err(e) => {
            tracing::error!("create photo failed: {e}");
            Err(AppError::Internal("Failed to create photo".to_string()))
        }
    }
}

/// PUT /api/photos/{id} - partial update
pub async fn update_photo(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    req: web::Json<UpdatePhotoRequest>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;
    req.validate()?;

    match photo_repo::update_photo(pool.get_ref(), id, &req).await {
        Ok(photo) => Ok(HttpResponse::Ok().json(photo)),
        Err(RepoError::NotFound) => Err(AppError::NotFound("Photo not found".to_string())),
        Err(e) => {
            tracing::error!("update photo failed: {e}");
            Err(AppError::Internal("Failed to update photo".to_string()))
        }
    }
}

/// DELETE /api/photos/{id}
pub async fn delete_photo(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;

    match photo_repo::delete_photo(pool.get_ref(), id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Photo deleted successfully",
        }))),
        Err(RepoError::NotFound) => Err(AppError::NotFound("Photo not found".to_string())),
        Err(e) => {
            tracing::error!("delete photo failed: {e}");
            Err(AppError::Internal("Failed to delete photo".to_string()))
        }
    }
}

fn fetch_err(e: RepoError) -> AppError {
    tracing::error!("fetch photos failed: {e}");
    AppError::Internal("Failed to fetch photos".to_string())
}
