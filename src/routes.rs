//! Route configuration
//!
//! Wires every handler to the `/api` surface in one place.

use crate::handlers::{albums, comments, photos, posts, todos, users};
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/users")
                    .route("", web::get().to(users::list_users))
                    .route("", web::post().to(users::create_user))
                    .route("/{id}", web::get().to(users::get_user))
                    .route("/{id}", web::put().to(users::update_user))
                    .route("/{id}", web::delete().to(users::delete_user)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post)),
            )
            .service(
                web::scope("/comments")
                    .route("", web::get().to(comments::list_comments))
                    .route("", web::post().to(comments::create_comment))
                    .route("/{id}", web::get().to(comments::get_comment))
                    .route("/{id}", web::put().to(comments::update_comment))
                    .route("/{id}", web::delete().to(comments::delete_comment)),
            )
            .service(
                web::scope("/albums")
                    .route("", web::get().to(albums::list_albums))
                    .route("", web::post().to(albums::create_album))
                    .route("/{id}", web::get().to(albums::get_album))
                    .route("/{id}", web::put().to(albums::update_album))
                    .route("/{id}", web::delete().to(albums::delete_album)),
            )
            .service(
                web::scope("/photos")
                    .route("", web::get().to(photos::list_photos))
                    .route("", web::post().to(photos::create_photo))
                    .route("/{id}", web::get().to(photos::get_photo))
                    .route("/{id}", web::put().to(photos::update_photo))
                    .route("/{id}", web::delete().to(photos::delete_photo)),
            )
            .service(
                web::scope("/todos")
                    .route("", web::get().to(todos::list_todos))
                    .route("", web::post().to(todos::create_todo))
                    .route("/{id}", web::get().to(todos::get_todo))
                    .route("/{id}", web::put().to(todos::update_todo))
                    .route("/{id}/toggle", web::patch().to(todos::toggle_todo))
                    .route("/{id}", web::delete().to(todos::delete_todo)),
            ),
    );
}
