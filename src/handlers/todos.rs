use crate::db::{todo_repo, RepoError};
use crate::error::{AppError, Result};
use crate::handlers::parse_id;
use crate::models::{CreateTodoRequest, UpdateTodoRequest};
use crate::pagination::{ListResponse, Page};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTodosQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub user_id: Option<i64>,
    pub completed: Option<String>,
    pub search: Option<String>,
}

impl ListTodosQuery {
    /// `completed=true` filters completed todos; any other present
    /// value filters pending ones. Absent means no filter.
    fn completed_filter(&self) -> Option<bool> {
        self.completed.as_deref().map(|v| v == "true")
    }
}

/// GET /api/todos
pub async fn list_todos(
    pool: web::Data<PgPool>,
    query: web::Query<ListTodosQuery>,
) -> Result<HttpResponse> {
    let page = Page::new(query.page, query.limit);
    let search = query.search.as_deref();

    let todos = todo_repo::list_todos(
        pool.get_ref(),
        query.user_id,
        query.completed_filter(),
        search,
        page.limit,
        page.offset(),
    )
    .await
    .map_err(fetch_err)?;
    let total = todo_repo::count_todos(
        pool.get_ref(),
        query.user_id,
        query.completed_filter(),
        search,
    )
    .await
    .map_err(fetch_err)?;

    Ok(HttpResponse::Ok().json(ListResponse::new(todos, page, total)))
}

/// GET /api/todos/{id} - todo with owner summary
pub async fn get_todo(pool: web::Data<PgPool>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = parse_id(&path)?;

    match todo_repo::find_by_id(pool.get_ref(), id).await.map_err(fetch_err)? {
        Some(todo) => Ok(HttpResponse::Ok().json(todo)),
        None => Err(AppError::NotFound("Todo not found".to_string())),
    }
}

/// POST /api/todos
pub async fn create_todo(
    pool: web::Data<PgPool>,
    req: web::Json<CreateTodoRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    match todo_repo::create_todo(pool.get_ref(), &req).await {
        Ok(todo) => Ok(HttpResponse::Created().json(todo)),
        Err(RepoError::ForeignKeyViolation) => {
            Err(AppError::BadRequest("User not found".to_string()))
        }
        Err(e) => {
            tracing::error!("create todo failed: {e}");
            Err(AppError::Internal("Failed to create todo".to_string()))
        }
    }
}

/// PUT /api/todos/{id} - partial update
pub async fn update_todo(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    req: web::Json<UpdateTodoRequest>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;
    req.validate()?;

    match todo_repo::update_todo(pool.get_ref(), id, &req).await {
        Ok(todo) => Ok(HttpResponse::Ok().json(todo)),
        Err(RepoError::NotFound) => Err(AppError::NotFound("Todo not found".to_string())),
        Err(e) => {
            tracing::error!("update todo failed: {e}");
            Err(AppError::Internal("Failed to update todo".to_string()))
        }
    }
}

/// PATCH /api/todos/{id}/toggle - flip the completed flag
pub async fn toggle_todo(pool: web::Data<PgPool>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = parse_id(&path)?;

    match todo_repo::toggle_todo(pool.get_ref(), id).await {
        Ok(todo) => Ok(HttpResponse::Ok().json(todo)),
        Err(RepoError::NotFound) => Err(AppError::NotFound("Todo not found".to_string())),
        Err(e) => {
            tracing::error!("toggle todo failed: {e}");
            Err(AppError::Internal("Failed to toggle todo".to_string()))
        }
    }
}

/// DELETE /api/todos/{id}
pub async fn delete_todo(pool: web::Data<PgPool>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = parse_id(&path)?;

    match todo_repo::delete_todo(pool.get_ref(), id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Todo deleted successfully",
        }))),
        Err(RepoError::NotFound) => Err(AppError::NotFound("Todo not found".to_string())),
        Err(e) => {
            tracing::error!("delete todo failed: {e}");
            Err(AppError::Internal("Failed to delete todo".to_string()))
        }
    }
}

fn fetch_err(e: RepoError) -> AppError {
    tracing::error!("fetch todos failed: {e}");
    AppError::Internal("Failed to fetch todos".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(completed: Option<&str>) -> ListTodosQuery {
        ListTodosQuery {
            page: None,
            limit: None,
            user_id: None,
            completed: completed.map(String::from),
            search: None,
        }
    }

    #[test]
    fn completed_true_filters_completed() {
        assert_eq!(query(Some("true")).completed_filter(), Some(true));
    }

    #[test]
    fn completed_other_values_filter_pending() {
        assert_eq!(query(Some("false")).completed_filter(), Some(false));
        assert_eq!(query(Some("yes")).completed_filter(), Some(false));
    }

    #[test]
    fn completed_absent_means_no_filter() {
        assert_eq!(query(None).completed_filter(), None);
    }
}
