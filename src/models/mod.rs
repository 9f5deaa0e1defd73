//! Entity structs and request/response types
//!
//! JSON uses camelCase field names (`userId`, `createdAt`,
//! `thumbnailUrl`); database columns stay snake_case, which is what
//! `FromRow` maps against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub street: Option<String>,
    pub suite: Option<String>,
    pub city: Option<String>,
    pub zipcode: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub company_name: Option<String>,
    pub company_catch_phrase: Option<String>,
    pub company_bs: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
    pub post_id: i64,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: i64,
    pub title: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
    pub album_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

// ============================================
// Related-record summaries
// ============================================

/// Short owner reference embedded in child responses. The email is
/// only exposed where the API includes it (post authors).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummary {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

// ============================================
// Composite response shapes
// ============================================

/// User with all owned child collections (detail endpoint)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    pub posts: Vec<Post>,
    pub albums: Vec<Album>,
    pub todos: Vec<Todo>,
    pub comments: Vec<Comment>,
}

/// Post with author summary and comment count (list endpoint)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    pub user: UserSummary,
    pub comment_count: i64,
}

/// Post with author and full comment thread (detail endpoint)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub user: UserSummary,
    pub comments: Vec<CommentWithUser>,
}

/// Comment with its optional commenter
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithUser {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: Option<UserSummary>,
}

/// Comment with parent post and optional commenter
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithRefs {
    #[serde(flatten)]
    pub comment: Comment,
    pub post: PostSummary,
    pub user: Option<UserSummary>,
}

/// Album with owner summary and photo count (list endpoint)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumWithUser {
    #[serde(flatten)]
    pub album: Album,
    pub user: UserSummary,
    pub photo_count: i64,
}

/// Album with owner and photos (detail endpoint)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDetail {
    #[serde(flatten)]
    pub album: Album,
    pub user: UserSummary,
    pub photos: Vec<Photo>,
}

/// Photo with parent album summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoWithAlbum {
    #[serde(flatten)]
    pub photo: Photo,
    pub album: AlbumSummary,
}

/// Todo with owner summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoWithUser {
    #[serde(flatten)]
    pub todo: Todo,
    pub user: UserSummary,
}

// ============================================
// Request types
// ============================================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(custom(function = crate::validators::validate_email_field))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(custom(function = crate::validators::validate_url_field))]
    pub website: Option<String>,
    pub street: Option<String>,
    pub suite: Option<String>,
    pub city: Option<String>,
    pub zipcode: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub company_name: Option<String>,
    pub company_catch_phrase: Option<String>,
    pub company_bs: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub username: Option<String>,
    #[validate(custom(function = crate::validators::validate_email_field))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(custom(function = crate::validators::validate_url_field))]
    pub website: Option<String>,
    pub street: Option<String>,
    pub suite: Option<String>,
    pub city: Option<String>,
    pub zipcode: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub company_name: Option<String>,
    pub company_catch_phrase: Option<String>,
    pub company_bs: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
    #[validate(range(min = 1))]
    pub user_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub body: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(custom(function = crate::validators::validate_email_field))]
    pub email: String,
    #[validate(length(min = 1))]
    pub body: String,
    #[validate(range(min = 1))]
    pub post_id: i64,
    #[validate(range(min = 1))]
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(custom(function = crate::validators::validate_email_field))]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub body: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 1))]
    pub user_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlbumRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePhotoRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(custom(function = crate::validators::validate_url_field))]
    pub url: String,
    #[validate(custom(function = crate::validators::validate_url_field))]
    pub thumbnail_url: String,
    #[validate(range(min = 1))]
    pub album_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhotoRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(custom(function = crate::validators::validate_url_field))]
    pub url: Option<String>,
    #[validate(custom(function = crate::validators::validate_url_field))]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[validate(range(min = 1))]
    pub user_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_user() -> User {
        User {
            id: 1,
            name: "Alice Smith".into(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            phone: None,
            website: None,
            street: None,
            suite: None,
            city: None,
            zipcode: None,
            lat: None,
            lng: None,
            company_name: Some("Acme".into()),
            company_catch_phrase: None,
            company_bs: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn user_serializes_camel_case() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(json["companyName"], "Acme");
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
        assert!(json.get("company_name").is_none());
    }

    #[test]
    fn todo_with_user_flattens_entity_fields() {
        let shaped = TodoWithUser {
            todo: Todo {
                id: 7,
                title: "water plants".into(),
                completed: false,
                user_id: 1,
                created_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            },
            user: UserSummary {
                id: 1,
                name: "Alice Smith".into(),
                username: "alice".into(),
                email: None,
            },
        };
        let json = serde_json::to_value(shaped).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["userId"], 1);
        assert_eq!(json["user"]["username"], "alice");
        assert!(json["user"].get("email").is_none());
    }

    #[test]
    fn comment_with_refs_serializes_missing_user_as_null() {
        let shaped = CommentWithRefs {
            comment: Comment {
                id: 3,
                name: "Bob".into(),
                email: "bob@example.com".into(),
                body: "nice post".into(),
                post_id: 2,
                user_id: None,
                created_at: Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap(),
            },
            post: PostSummary {
                id: 2,
                title: "Hello".into(),
            },
            user: None,
        };
        let json = serde_json::to_value(shaped).unwrap();
        assert_eq!(json["post"]["title"], "Hello");
        assert!(json["user"].is_null());
        assert!(json["userId"].is_null());
    }

    #[test]
    fn create_user_request_rejects_bad_email() {
        let req: CreateUserRequest = serde_json::from_value(serde_json::json!({
            "name": "Alice",
            "username": "alice",
            "email": "not-an-email"
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_todo_request_defaults_completed_to_false() {
        let req: CreateTodoRequest = serde_json::from_value(serde_json::json!({
            "title": "buy milk",
            "userId": 4
        }))
        .unwrap();
        assert!(!req.completed);
        assert_eq!(req.user_id, 4);
    }

    #[test]
    fn update_request_tracks_absent_fields() {
        let req: UpdateTodoRequest =
            serde_json::from_value(serde_json::json!({"completed": true})).unwrap();
        assert!(req.title.is_none());
        assert_eq!(req.completed, Some(true));
    }
}
