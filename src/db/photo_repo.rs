use crate::db::{RepoError, RepoResult};
use crate::models::{
    AlbumSummary, CreatePhotoRequest, Photo, PhotoWithAlbum, UpdatePhotoRequest, UserSummary,
};
use sqlx::{postgres::PgRow, PgPool, Row};

fn photo_from_row(row: &PgRow) -> Photo {
    Photo {
        id: row.get("id"),
        title: row.get("title"),
        url: row.get("url"),
        thumbnail_url: row.get("thumbnail_url"),
        album_id: row.get("album_id"),
        created_at: row.get("created_at"),
    }
}

fn with_album_from_row(row: &PgRow) -> PhotoWithAlbum {
    PhotoWithAlbum {
        photo: photo_from_row(row),
        album: AlbumSummary {
            id: row.get("album_id"),
            title: row.get("album_title"),
            user: Some(UserSummary {
                id: row.get("owner_id"),
                name: row.get("owner_name"),
                username: row.get("owner_username"),
                email: None,
            }),
        },
    }
}

const SELECT_WITH_ALBUM: &str = r#"
    SELECT ph.id, ph.title, ph.url, ph.thumbnail_url, ph.album_id, ph.created_at,
           a.title AS album_title,
           u.id AS owner_id, u.name AS owner_name, u.username AS owner_username
    FROM photos ph
    JOIN albums a ON a.id = ph.album_id
    JOIN users u ON u.id = a.user_id
"#;

/// List photos with parent album summary. Filters: album id (exact)
/// and case-insensitive substring search over the title.
pub async fn list_photos(
    pool: &PgPool,
    album_id: Option<i64>,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<PhotoWithAlbum>> {
    let query = format!(
        r#"
        {SELECT_WITH_ALBUM}
        WHERE ($1::bigint IS NULL OR ph.album_id = $1)
          AND ($2::text IS NULL OR ph.title ILIKE '%' || $2 || '%')
        ORDER BY ph.created_at DESC, ph.id DESC
        LIMIT $3 OFFSET $4
        "#
    );

    let rows = sqlx::query(&query)
        .bind(album_id)
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(with_album_from_row).collect())
}

/// Count photos matching the same filter as [`list_photos`]
pub async fn count_photos(
    pool: &PgPool,
    album_id: Option<i64>,
    search: Option<&str>,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM photos ph
        WHERE ($1::bigint IS NULL OR ph.album_id = $1)
          AND ($2::text IS NULL OR ph.title ILIKE '%' || $2 || '%')
        "#,
    )
    .bind(album_id)
    .bind(search)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Find a photo by ID with parent album summary
pub async fn find_by_id(pool: &PgPool, id: i64) -> RepoResult<Option<PhotoWithAlbum>> {
    let query = format!("{SELECT_WITH_ALBUM} WHERE ph.id = $1");

    let row = sqlx::query(&query).bind(id).fetch_optional(pool).await?;

    Ok(row.map(|r| with_album_from_row(&r)))
}

/// Create a new photo
pub async fn create_photo(pool: &PgPool, req: &CreatePhotoRequest) -> RepoResult<PhotoWithAlbum> {
    let row = sqlx::query(
        r#"
        INSERT INTO photos (title, url, thumbnail_url, album_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&req.title)
    .bind(&req.url)
    .bind(&req.thumbnail_url)
    .bind(req.album_id)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, row.get("id"))
        .await?
        .ok_or(RepoError::NotFound)
}

/// Partially update a photo; absent fields keep their current value
pub async fn update_photo(
    pool: &PgPool,
    id: i64,
    req: &UpdatePhotoRequest,
) -> RepoResult<PhotoWithAlbum> {
    let result = sqlx::query(
        r#"
        UPDATE photos
        SET title = COALESCE($2, title),
            url = COALESCE($3, url),
            thumbnail_url = COALESCE($4, thumbnail_url)
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&req.title)
    .bind(&req.url)
    .bind(&req.thumbnail_url)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }

    find_by_id(pool, id).await?.ok_or(RepoError::NotFound)
}

/// Delete a photo
pub async fn delete_photo(pool: &PgPool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM photos WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }

    Ok(())
}
