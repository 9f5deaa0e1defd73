use crate::db::{user_repo, RepoError, RepoResult};
use crate::models::{
    CommentWithUser, CreatePostRequest, Post, PostDetail, PostWithAuthor, UpdatePostRequest,
    UserSummary,
};
use sqlx::{postgres::PgRow, PgPool, Row};

fn post_from_row(row: &PgRow) -> Post {
    Post {
        id: row.get("id"),
        title: row.get("title"),
        body: row.get("body"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
    }
}

/// List posts with author summary and comment count. Filters: owner id
/// (exact) and case-insensitive substring search over title and body.
pub async fn list_posts(
    pool: &PgPool,
    user_id: Option<i64>,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<PostWithAuthor>> {
    let rows = sqlx::query(
        r#"
        SELECT p.id, p.title, p.body, p.user_id, p.created_at,
               u.name AS author_name, u.username AS author_username, u.email AS author_email,
               (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count
        FROM posts p
        JOIN users u ON u.id = p.user_id
        WHERE ($1::bigint IS NULL OR p.user_id = $1)
          AND ($2::text IS NULL
               OR p.title ILIKE '%' || $2 || '%'
               OR p.body ILIKE '%' || $2 || '%')
        ORDER BY p.created_at DESC, p.id DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(user_id)
    .bind(search)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|r| PostWithAuthor {
            post: post_from_row(r),
            user: UserSummary {
                id: r.get("user_id"),
                name: r.get("author_name"),
                username: r.get("author_username"),
                email: Some(r.get("author_email")),
            },
            comment_count: r.get("comment_count"),
        })
        .collect())
}

/// Count posts matching the same filter as [`list_posts`]
pub async fn count_posts(
    pool: &PgPool,
    user_id: Option<i64>,
    search: Option<&str>,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM posts p
        WHERE ($1::bigint IS NULL OR p.user_id = $1)
          AND ($2::text IS NULL
               OR p.title ILIKE '%' || $2 || '%'
               OR p.body ILIKE '%' || $2 || '%')
        "#,
    )
    .bind(user_id)
    .bind(search)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Find a post with its author and full comment thread, newest comment first
pub async fn find_detail(pool: &PgPool, id: i64) -> RepoResult<Option<PostDetail>> {
    let row = sqlx::query(
        r#"
        SELECT p.id, p.title, p.body, p.user_id, p.created_at,
               u.name AS author_name, u.username AS author_username, u.email AS author_email
        FROM posts p
        JOIN users u ON u.id = p.user_id
        WHERE p.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let comment_rows = sqlx::query(
        r#"
        SELECT c.id, c.name, c.email, c.body, c.post_id, c.user_id, c.created_at,
               u.name AS commenter_name, u.username AS commenter_username
        FROM comments c
        LEFT JOIN users u ON u.id = c.user_id
        WHERE c.post_id = $1
        ORDER BY c.created_at DESC, c.id DESC
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let comments = comment_rows
        .iter()
        .map(|r| CommentWithUser {
            comment: crate::db::comment_repo::comment_from_row(r),
            user: r.get::<Option<i64>, _>("user_id").map(|uid| UserSummary {
                id: uid,
                name: r.get("commenter_name"),
                username: r.get("commenter_username"),
                email: None,
            }),
        })
        .collect();

    Ok(Some(PostDetail {
        post: post_from_row(&row),
        user: UserSummary {
            id: row.get("user_id"),
            name: row.get("author_name"),
            username: row.get("author_username"),
            email: Some(row.get("author_email")),
        },
        comments,
    }))
}

/// Create a new post
pub async fn create_post(pool: &PgPool, req: &CreatePostRequest) -> RepoResult<PostWithAuthor> {
    let row = sqlx::query(
        r#"
        INSERT INTO posts (title, body, user_id)
        VALUES ($1, $2, $3)
        RETURNING id, title, body, user_id, created_at
        "#,
    )
    .bind(&req.title)
    .bind(&req.body)
    .bind(req.user_id)
    .fetch_one(pool)
    .await?;

    let post = post_from_row(&row);
    with_author(pool, post).await
}

/// Partially update a post; absent fields keep their current value
pub async fn update_post(
    pool: &PgPool,
    id: i64,
    req: &UpdatePostRequest,
) -> RepoResult<PostWithAuthor> {
    let row = sqlx::query(
        r#"
        UPDATE posts
        SET title = COALESCE($2, title),
            body = COALESCE($3, body)
        WHERE id = $1
        RETURNING id, title, body, user_id, created_at
        "#,
    )
    .bind(id)
    .bind(&req.title)
    .bind(&req.body)
    .fetch_optional(pool)
    .await?
    .ok_or(RepoError::NotFound)?;

    let post = post_from_row(&row);
    with_author(pool, post).await
}

/// Delete a post; its comments cascade
pub async fn delete_post(pool: &PgPool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }

    Ok(())
}

async fn with_author(pool: &PgPool, post: Post) -> RepoResult<PostWithAuthor> {
    let user = user_repo::find_summary(pool, post.user_id, true)
        .await?
        .ok_or(RepoError::NotFound)?;

    let comment_count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE post_id = $1")
            .bind(post.id)
            .fetch_one(pool)
            .await?;

    Ok(PostWithAuthor {
        post,
        user,
        comment_count,
    })
}
