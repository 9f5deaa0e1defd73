use crate::db::{RepoError, RepoResult};
use crate::models::{
    Album, Comment, CreateUserRequest, Post, Todo, UpdateUserRequest, User, UserDetail,
    UserSummary,
};
use sqlx::{PgPool, Row};

/// List users ordered by creation time, newest first. `search` matches
/// name, username or email case-insensitively.
pub async fn list_users(
    pool: &PgPool,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, username, email, phone, website, street, suite, city, zipcode,
               lat, lng, company_name, company_catch_phrase, company_bs, created_at
        FROM users
        WHERE $1::text IS NULL
           OR name ILIKE '%' || $1 || '%'
           OR username ILIKE '%' || $1 || '%'
           OR email ILIKE '%' || $1 || '%'
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(search)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Count users matching the same filter as [`list_users`]
pub async fn count_users(pool: &PgPool, search: Option<&str>) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM users
        WHERE $1::text IS NULL
           OR name ILIKE '%' || $1 || '%'
           OR username ILIKE '%' || $1 || '%'
           OR email ILIKE '%' || $1 || '%'
        "#,
    )
    .bind(search)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Find a user by ID
pub async fn find_by_id(pool: &PgPool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, username, email, phone, website, street, suite, city, zipcode,
               lat, lng, company_name, company_catch_phrase, company_bs, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Find a user with all owned child collections
pub async fn find_detail(pool: &PgPool, id: i64) -> RepoResult<Option<UserDetail>> {
    let Some(user) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, body, user_id, created_at
        FROM posts
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let albums = sqlx::query_as::<_, Album>(
        r#"
        SELECT id, title, user_id, created_at
        FROM albums
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let todos = sqlx::query_as::<_, Todo>(
        r#"
        SELECT id, title, completed, user_id, created_at
        FROM todos
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, name, email, body, post_id, user_id, created_at
        FROM comments
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(UserDetail {
        user,
        posts,
        albums,
        todos,
        comments,
    }))
}

/// Fetch the short owner reference embedded in child responses
pub async fn find_summary(
    pool: &PgPool,
    id: i64,
    include_email: bool,
) -> RepoResult<Option<UserSummary>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, username, email
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| UserSummary {
        id: r.get("id"),
        name: r.get("name"),
        username: r.get("username"),
        email: include_email.then(|| r.get("email")),
    }))
}

/// Create a new user
pub async fn create_user(pool: &PgPool, req: &CreateUserRequest) -> RepoResult<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, username, email, phone, website, street, suite, city,
                           zipcode, lat, lng, company_name, company_catch_phrase, company_bs)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING id, name, username, email, phone, website, street, suite, city, zipcode,
                  lat, lng, company_name, company_catch_phrase, company_bs, created_at
        "#,
    )
    .bind(&req.name)
    .bind(&req.username)
    .bind(&req.email)
    .bind(&req.phone)
    .bind(&req.website)
    .bind(&req.street)
    .bind(&req.suite)
    .bind(&req.city)
    .bind(&req.zipcode)
    .bind(&req.lat)
    .bind(&req.lng)
    .bind(&req.company_name)
    .bind(&req.company_catch_phrase)
    .bind(&req.company_bs)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Partially update a user; absent fields keep their current value
pub async fn update_user(pool: &PgPool, id: i64, req: &UpdateUserRequest) -> RepoResult<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET name = COALESCE($2, name),
            username = COALESCE($3, username),
            email = COALESCE($4, email),
            phone = COALESCE($5, phone),
            website = COALESCE($6, website),
            street = COALESCE($7, street),
            suite = COALESCE($8, suite),
            city = COALESCE($9, city),
            zipcode = COALESCE($10, zipcode),
            lat = COALESCE($11, lat),
            lng = COALESCE($12, lng),
            company_name = COALESCE($13, company_name),
            company_catch_phrase = COALESCE($14, company_catch_phrase),
            company_bs = COALESCE($15, company_bs)
        WHERE id = $1
        RETURNING id, name, username, email, phone, website, street, suite, city, zipcode,
                  lat, lng, company_name, company_catch_phrase, company_bs, created_at
        "#,
    )
    .bind(id)
    .bind(&req.name)
    .bind(&req.username)
    .bind(&req.email)
    .bind(&req.phone)
    .bind(&req.website)
    .bind(&req.street)
    .bind(&req.suite)
    .bind(&req.city)
    .bind(&req.zipcode)
    .bind(&req.lat)
    .bind(&req.lng)
    .bind(&req.company_name)
    .bind(&req.company_catch_phrase)
    .bind(&req.company_bs)
    .fetch_optional(pool)
    .await?
    .ok_or(RepoError::NotFound)?;

    Ok(user)
}

/// Delete a user; owned posts, albums and todos cascade
pub async fn delete_user(pool: &PgPool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }

    Ok(())
}
