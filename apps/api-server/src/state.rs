//! Application state - shared across all handlers.

use std::sync::Arc;

use forum_core::ports::{CommentRepository, PostRepository, UserRepository};
use forum_core::service::{CommentService, PostService};
use forum_infra::database::{
    DatabaseConfig, InMemoryCommentRepository, InMemoryPostRepository, InMemoryUserRepository,
};

/// Shared application state: the forum services plus the user store the
/// auth handlers talk to directly.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// With a database configured, repositories run against PostgreSQL;
    /// otherwise everything lives in process memory, which is enough for
    /// local development and tests.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let (users, posts, comments) = Self::build_repositories(db_config).await;

        let post_service = Arc::new(PostService::new(posts.clone()));
        let comment_service = Arc::new(CommentService::new(comments, posts));

        tracing::info!("Application state initialized");

        Self {
            posts: post_service,
            comments: comment_service,
            users,
        }
    }

    async fn build_repositories(
        db_config: Option<&DatabaseConfig>,
    ) -> (
        Arc<dyn UserRepository>,
        Arc<dyn PostRepository>,
        Arc<dyn CommentRepository>,
    ) {
        if let Some(config) = db_config {
            use forum_infra::database::{
                DatabaseConnection, PostgresCommentRepository, PostgresPostRepository,
                PostgresUserRepository,
            };

            match DatabaseConnection::init(config).await {
                Ok(db) => {
                    return (
                        Arc::new(PostgresUserRepository::new(db.conn.clone())),
                        Arc::new(PostgresPostRepository::new(db.conn.clone())),
                        Arc::new(PostgresCommentRepository::new(db.conn)),
                    );
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        (
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryCommentRepository::new()),
        )
    }
}
