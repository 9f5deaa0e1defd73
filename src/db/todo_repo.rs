use crate::db::{RepoError, RepoResult};
use crate::models::{CreateTodoRequest, Todo, TodoWithUser, UpdateTodoRequest, UserSummary};
use sqlx::{postgres::PgRow, PgPool, Row};

fn todo_from_row(row: &PgRow) -> Todo {
    Todo {
        id: row.get("id"),
        title: row.get("title"),
        completed: row.get("completed"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
    }
}

fn with_user_from_row(row: &PgRow) -> TodoWithUser {
    TodoWithUser {
        todo: todo_from_row(row),
        user: UserSummary {
            id: row.get("user_id"),
            name: row.get("owner_name"),
            username: row.get("owner_username"),
            email: None,
        },
    }
}

const SELECT_WITH_USER: &str = r#"
    SELECT t.id, t.title, t.completed, t.user_id, t.created_at,
           u.name AS owner_name, u.username AS owner_username
    FROM todos t
    JOIN users u ON u.id = t.user_id
"#;

/// List todos with owner summary. Filters: owner id (exact), completed
/// flag (exact) and case-insensitive substring search over the title.
pub async fn list_todos(
    pool: &PgPool,
    user_id: Option<i64>,
    completed: Option<bool>,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<TodoWithUser>> {
    let query = format!(
        r#"
        {SELECT_WITH_USER}
        WHERE ($1::bigint IS NULL OR t.user_id = $1)
          AND ($2::boolean IS NULL OR t.completed = $2)
          AND ($3::text IS NULL OR t.title ILIKE '%' || $3 || '%')
        ORDER BY t.created_at DESC, t.id DESC
        LIMIT $4 OFFSET $5
        "#
    );

    let rows = sqlx::query(&query)
        .bind(user_id)
        .bind(completed)
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(with_user_from_row).collect())
}

/// Count todos matching the same filter as [`list_todos`]
pub async fn count_todos(
    pool: &PgPool,
    user_id: Option<i64>,
    completed: Option<bool>,
    search: Option<&str>,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM todos t
        WHERE ($1::bigint IS NULL OR t.user_id = $1)
          AND ($2::boolean IS NULL OR t.completed = $2)
          AND ($3::text IS NULL OR t.title ILIKE '%' || $3 || '%')
        "#,
    )
    .bind(user_id)
    .bind(completed)
    .bind(search)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Find a todo by ID with owner summary
pub async fn find_by_id(pool: &PgPool, id: i64) -> RepoResult<Option<TodoWithUser>> {
    let query = format!("{SELECT_WITH_USER} WHERE t.id = $1");

    let row = sqlx::query(&query).bind(id).fetch_optional(pool).await?;

    Ok(row.map(|r| with_user_from_row(&r)))
}

/// Create a new todo
pub async fn create_todo(pool: &PgPool, req: &CreateTodoRequest) -> RepoResult<TodoWithUser> {
    let row = sqlx::query(
        r#"
        INSERT INTO todos (title, completed, user_id)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(&req.title)
    .bind(req.completed)
    .bind(req.user_id)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, row.get("id"))
        .await?
        .ok_or(RepoError::NotFound)
}

/// Partially update a todo; absent fields keep their current value
pub async fn update_todo(
    pool: &PgPool,
    id: i64,
    req: &UpdateTodoRequest,
) -> RepoResult<TodoWithUser> {
    let result = sqlx::query(
        r#"
        UPDATE todos
        SET title = COALESCE($2, title),
            completed = COALESCE($3, completed)
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&req.title)
    .bind(req.completed)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }

    find_by_id(pool, id).await?.ok_or(RepoError::NotFound)
}

/// Atomically flip the completed flag. A single statement, so two
/// concurrent toggles cannot lose an update.
pub async fn toggle_todo(pool: &PgPool, id: i64) -> RepoResult<TodoWithUser> {
    let result = sqlx::query("UPDATE todos SET completed = NOT completed WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }

    find_by_id(pool, id).await?.ok_or(RepoError::NotFound)
}

/// Delete a todo
pub async fn delete_todo(pool: &PgPool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM todos WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }

    Ok(())
}
