//! HTTP handlers and route configuration.

mod comments;
mod discussions;
mod hashtags;
mod health;
mod likes;
mod users;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/users")
                        .route("", web::post().to(users::create))
                        .route("", web::get().to(users::list))
                        .route("/search", web::get().to(users::search))
                        .route("/{id}", web::get().to(users::get))
                        .route("/{id}", web::put().to(users::update))
                        .route("/{id}", web::delete().to(users::delete))
                        .route("/{id}/discussions", web::get().to(users::discussions))
                        .route("/{id}/comments", web::get().to(users::comments))
                        .route("/{id}/likes", web::get().to(users::likes)),
                )
                .service(
                    web::scope("/discussions")
                        .route("", web::post().to(discussions::create))
                        .route("", web::get().to(discussions::list))
                        .route("/{id}", web::get().to(discussions::get))
                        .route("/{id}", web::put().to(discussions::update))
                        .route("/{id}", web::delete().to(discussions::delete))
                        .route("/{id}/comments", web::get().to(discussions::comments))
                        .route("/{id}/likes", web::get().to(discussions::likes))
                        .route("/{id}/hashtags", web::post().to(discussions::add_hashtag))
                        .route(
                            "/{id}/hashtags/{hashtag_id}",
                            web::delete().to(discussions::remove_hashtag),
                        ),
                )
                .service(
                    web::scope("/comments")
                        .route("", web::post().to(comments::create))
                        .route("", web::get().to(comments::list))
                        .route("/{id}", web::get().to(comments::get))
                        .route("/{id}", web::put().to(comments::update))
                        .route("/{id}", web::delete().to(comments::delete)),
                )
                .service(
                    web::scope("/likes")
                        .route("", web::post().to(likes::create))
                        .route("", web::get().to(likes::list))
                        .route("/{id}", web::get().to(likes::get))
                        .route("/{id}", web::delete().to(likes::delete)),
                )
                .service(
                    web::scope("/hashtags")
                        .route("", web::post().to(hashtags::create))
                        .route("", web::get().to(hashtags::list))
                        .route("/{id}", web::get().to(hashtags::get))
                        .route("/{id}", web::put().to(hashtags::update))
                        .route("/{id}", web::delete().to(hashtags::delete))
                        .route("/{id}/discussions", web::get().to(hashtags::discussions)),
                ),
        );
}

// Extractor failures share the 400 problem body.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
