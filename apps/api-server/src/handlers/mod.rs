//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Posts and their comments (all require authentication)
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::get().to(posts::get_one))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::remove))
                    .route("/{id}/comments", web::get().to(comments::list_for_post))
                    .route("/{id}/comments", web::post().to(comments::create)),
            )
            // Comment mutation by comment id
            .service(
                web::scope("/comments")
                    .route("/{id}", web::put().to(comments::update))
                    .route("/{id}", web::delete().to(comments::remove)),
            ),
    );
}
