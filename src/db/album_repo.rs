use crate::db::{user_repo, RepoError, RepoResult};
use crate::models::{
    Album, AlbumDetail, AlbumWithUser, CreateAlbumRequest, Photo, UpdateAlbumRequest, UserSummary,
};
use sqlx::{postgres::PgRow, PgPool, Row};

fn album_from_row(row: &PgRow) -> Album {
    Album {
        id: row.get("id"),
        title: row.get("title"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
    }
}

/// List albums with owner summary and photo count. Filters: owner id
/// (exact) and case-insensitive substring search over the title.
pub async fn list_albums(
    pool: &PgPool,
    user_id: Option<i64>,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<AlbumWithUser>> {
    let rows = sqlx::query(
        r#"
        SELECT a.id, a.title, a.user_id, a.created_at,
               u.name AS owner_name, u.username AS owner_username,
               (SELECT COUNT(*) FROM photos ph WHERE ph.album_id = a.id) AS photo_count
        FROM albums a
        JOIN users u ON u.id = a.user_id
        WHERE ($1::bigint IS NULL OR a.user_id = $1)
          AND ($2::text IS NULL OR a.title ILIKE '%' || $2 || '%')
        ORDER BY a.created_at DESC, a.id DESC
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
        .map(|r| AlbumWithUser {
            album: album_from_row(r),
            user: UserSummary {
                id: r.get("user_id"),
                name: r.get("owner_name"),
                username: r.get("owner_username"),
                email: None,
            },
            photo_count: r.get("photo_count"),
        })
        .collect())
}

/// Count albums matching the same filter as [`list_albums`]
pub async fn count_albums(
    pool: &PgPool,
    user_id: Option<i64>,
    search: Option<&str>,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM albums a
        WHERE ($1::bigint IS NULL OR a.user_id = $1)
          AND ($2::text IS NULL OR a.title ILIKE '%' || $2 || '%')
        "#,
    )
    .bind(user_id)
    .bind(search)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Find an album with its owner and photos, newest photo first
pub async fn find_detail(pool: &PgPool, id: i64) -> RepoResult<Option<AlbumDetail>> {
    let row = sqlx::query(
        r#"
        SELECT a.id, a.title, a.user_id, a.created_at,
               u.name AS owner_name, u.username AS owner_username
        FROM albums a
        JOIN users u ON u.id = a.user_id
        WHERE a.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let photos = sqlx::query_as::<_, Photo>(
        r#"
        SELECT id, title, url, thumbnail_url, album_id, created_at
        FROM photos
        WHERE album_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(AlbumDetail {
        album: album_from_row(&row),
        user: UserSummary {
            id: row.get("user_id"),
            name: row.get("owner_name"),
            username: row.get("owner_username"),
            email: None,
        },
        photos,
    }))
}

/// Create a new album
pub async fn create_album(pool: &PgPool, req: &CreateAlbumRequest) -> RepoResult<AlbumWithUser> {
    let row = sqlx::query(
        r#"
        INSERT INTO albums (title, user_id)
        VALUES ($1, $2)
        RETURNING id, title, user_id, created_at
        "#,
    )
    .bind(&req.title)
    .bind(req.user_id)
    .fetch_one(pool)
    .await?;

    let album = album_from_row(&row);
    with_owner(pool, album).await
}

/// Partially update an album; absent fields keep their current value
pub async fn update_album(
    pool: &PgPool,
    id: i64,
    req: &UpdateAlbumRequest,
) -> RepoResult<AlbumWithUser> {
    let row = sqlx::query(
        r#"
        UPDATE albums
        SET title = COALESCE($2, title)
        WHERE id = $1
        RETURNING id, title, user_id, created_at
        "#,
    )
    .bind(id)
    .bind(&req.title)
    .fetch_optional(pool)
    .await?
    .ok_or(RepoError::NotFound)?;

    let album = album_from_row(&row);
    with_owner(pool, album).await
}

/// Delete an album; its photos cascade
pub async fn delete_album(pool: &PgPool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM albums WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }

    Ok(())
}

async fn with_owner(pool: &PgPool, album: Album) -> RepoResult<AlbumWithUser> {
    let user = user_repo::find_summary(pool, album.user_id, false)
        .await?
        .ok_or(RepoError::NotFound)?;

    let photo_count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM photos WHERE album_id = $1")
            .bind(album.id)
            .fetch_one(pool)
            .await?;

    Ok(AlbumWithUser {
        album,
        user,
        photo_count,
    })
}
