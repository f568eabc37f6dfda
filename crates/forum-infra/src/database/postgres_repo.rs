//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use forum_core::domain::{Comment, Post, User};
use forum_core::error::RepoError;
use forum_core::ports::{CommentRepository, PostRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::Entity as PostEntity;
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresRepository<CommentEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask the local part when logging to keep PII out of logs
        let masked = match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                format!("{}***@{}", &local[..1], domain)
            }
            _ => "***".to_string(),
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
