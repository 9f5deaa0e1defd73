use crate::db::{RepoError, RepoResult};
use crate::models::{
    Comment, CommentWithRefs, CreateCommentRequest, PostSummary, UpdateCommentRequest, UserSummary,
};
use sqlx::{postgres::PgRow, PgPool, Row};

pub(crate) fn comment_from_row(row: &PgRow) -> Comment {
    Comment {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        body: row.get("body"),
        post_id: row.get("post_id"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
    }
}

fn refs_from_row(row: &PgRow) -> CommentWithRefs {
    CommentWithRefs {
        comment: comment_from_row(row),
        post: PostSummary {
            id: row.get("post_id"),
            title: row.get("post_title"),
        },
        user: row.get::<Option<i64>, _>("user_id").map(|uid| UserSummary {
            id: uid,
            name: row.get("commenter_name"),
            username: row.get("commenter_username"),
            email: None,
        }),
    }
}

const SELECT_WITH_REFS: &str = r#"
    SELECT c.id, c.name, c.email, c.body, c.post_id, c.user_id, c.created_at,
           p.title AS post_title,
           u.name AS commenter_name, u.username AS commenter_username
    FROM comments c
    JOIN posts p ON p.id = c.post_id
    LEFT JOIN users u ON u.id = c.user_id
"#;

/// List comments with parent post and optional commenter. Filters:
/// post id, user id (both exact) and case-insensitive substring search
/// over name, email and body.
pub async fn list_comments(
    pool: &PgPool,
    post_id: Option<i64>,
    user_id: Option<i64>,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<CommentWithRefs>> {
    let query = format!(
        r#"
        {SELECT_WITH_REFS}
        WHERE ($1::bigint IS NULL OR c.post_id = $1)
          AND ($2::bigint IS NULL OR c.user_id = $2)
          AND ($3::text IS NULL
               OR c.name ILIKE '%' || $3 || '%'
               OR c.email ILIKE '%' || $3 || '%'
               OR c.body ILIKE '%' || $3 || '%')
        ORDER BY c.created_at DESC, c.id DESC
        LIMIT $4 OFFSET $5
        "#
    );

    let rows = sqlx::query(&query)
        .bind(post_id)
        .bind(user_id)
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(refs_from_row).collect())
}

/// Count comments matching the same filter as [`list_comments`]
pub async fn count_comments(
    pool: &PgPool,
    post_id: Option<i64>,
    user_id: Option<i64>,
    search: Option<&str>,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM comments c
        WHERE ($1::bigint IS NULL OR c.post_id = $1)
          AND ($2::bigint IS NULL OR c.user_id = $2)
          AND ($3::text IS NULL
               OR c.name ILIKE '%' || $3 || '%'
               OR c.email ILIKE '%' || $3 || '%'
               OR c.body ILIKE '%' || $3 || '%')
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(search)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Find a comment by ID with parent post and optional commenter
pub async fn find_by_id(pool: &PgPool, id: i64) -> RepoResult<Option<CommentWithRefs>> {
    let query = format!("{SELECT_WITH_REFS} WHERE c.id = $1");

    let row = sqlx::query(&query).bind(id).fetch_optional(pool).await?;

    Ok(row.map(|r| refs_from_row(&r)))
}

/// Create a new comment
pub async fn create_comment(
    pool: &PgPool,
    req: &CreateCommentRequest,
) -> RepoResult<CommentWithRefs> {
    let row = sqlx::query(
        r#"
        INSERT INTO comments (name, email, body, post_id, user_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&req.name)
    .bind(&req.email)
    .bind(&req.body)
    .bind(req.post_id)
    .bind(req.user_id)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, row.get("id"))
        .await?
        .ok_or(RepoError::NotFound)
}

/// Partially update a comment; absent fields keep their current value
pub async fn update_comment(
    pool: &PgPool,
    id: i64,
    req: &UpdateCommentRequest,
) -> RepoResult<CommentWithRefs> {
    let result = sqlx::query(
        r#"
        UPDATE comments
        SET name = COALESCE($2, name),
            email = COALESCE($3, email),
            body = COALESCE($4, body)
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&req.name)
    .bind(&req.email)
    .bind(&req.body)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }

    find_by_id(pool, id).await?.ok_or(RepoError::NotFound)
}

/// Delete a comment
pub async fn delete_comment(pool: &PgPool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }

    Ok(())
}
