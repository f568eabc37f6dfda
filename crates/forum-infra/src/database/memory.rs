//! In-memory repository implementations.
//!
//! Used when no `DATABASE_URL` is configured and as lightweight stand-ins
//! in tests. Data lives only as long as the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use forum_core::domain::{Comment, Post, User};
use forum_core::error::RepoError;
use forum_core::ports::{
    BaseRepository, CommentRepository, PostRepository, UserRepository,
};

/// In-memory user repository.
#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        self.rows.write().await.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

/// In-memory post repository.
#[derive(Default)]
pub struct InMemoryPostRepository {
    rows: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        self.rows.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.rows.read().await.values().cloned().collect())
    }
}

/// In-memory comment repository.
#[derive(Default)]
pub struct InMemoryCommentRepository {
    rows: RwLock<HashMap<Uuid, Comment>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        self.rows.write().await.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }
}
