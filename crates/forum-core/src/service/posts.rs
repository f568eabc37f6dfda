//! Post CRUD with author-only mutation.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Approval, Post};
use crate::error::DomainError;
use crate::ports::PostRepository;

use super::storage_error;

/// Fields supplied when creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub subject: String,
    pub content: String,
    pub tag: String,
    pub approval: Approval,
}

/// Partial update; omitted fields keep their stored value. Approval and
/// author are never part of an update.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub subject: Option<String>,
    pub content: Option<String>,
    pub tag: Option<String>,
}

/// Post operations over the repository port.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// All posts, in whatever order the store returns them.
    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        self.posts.find_all().await.map_err(storage_error)
    }

    /// A single post, or `NotFound` if the id does not resolve.
    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(storage_error)?
            .ok_or(DomainError::not_found("post", id))
    }

    /// Create a post authored by `author_id`. There is no uniqueness
    /// constraint; any valid input succeeds.
    pub async fn create(&self, author_id: Uuid, new: NewPost) -> Result<Post, DomainError> {
        let post = Post::new(author_id, new.subject, new.content, new.tag, new.approval);
        self.posts.save(post).await.map_err(storage_error)
    }

    /// Overwrite the patched fields and the modification timestamp.
    /// Only the author may update; approval and author are untouched.
    pub async fn update(
        &self,
        id: Uuid,
        caller_id: Uuid,
        patch: PostPatch,
    ) -> Result<Post, DomainError> {
        let mut post = self.get(id).await?;

        if post.author_id != caller_id {
            return Err(DomainError::Forbidden(
                "You can't edit a post you don't own.",
            ));
        }

        if let Some(subject) = patch.subject {
            post.subject = subject;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(tag) = patch.tag {
            post.tag = tag;
        }
        post.modified_at = Utc::now();

        self.posts.save(post).await.map_err(storage_error)
    }

    /// Remove the post. Only the author may delete. Comments referencing
    /// the post are left in place (no cascade).
    pub async fn delete(&self, id: Uuid, caller_id: Uuid) -> Result<(), DomainError> {
        let post = self.get(id).await?;

        if post.author_id != caller_id {
            return Err(DomainError::Forbidden(
                "You can't delete a post you don't own.",
            ));
        }

        self.posts.delete(id).await.map_err(storage_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testutil::MemoryPosts;

    fn service() -> PostService {
        PostService::new(Arc::new(MemoryPosts::default()))
    }

    fn sample() -> NewPost {
        NewPost {
            subject: "A".to_string(),
            content: "B".to_string(),
            tag: "C".to_string(),
            approval: Approval::Given,
        }
    }

    #[tokio::test]
    async fn create_stamps_author_from_caller() {
        let svc = service();
        let author = Uuid::new_v4();

        let post = svc.create(author, sample()).await.unwrap();

        assert_eq!(post.author_id, author);
        assert_eq!(post.subject, "A");
        assert_eq!(post.content, "B");
        assert_eq!(post.tag, "C");
        assert_eq!(post.approval, Approval::Given);

        let fetched = svc.get(post.id).await.unwrap();
        assert_eq!(fetched.author_id, author);
        assert_eq!(fetched.subject, "A");
    }

    #[tokio::test]
    async fn get_missing_post_is_not_found() {
        let svc = service();
        let err = svc.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "post", .. }));
    }

    #[tokio::test]
    async fn update_by_non_author_is_forbidden_and_leaves_post_unchanged() {
        let svc = service();
        let author = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let post = svc.create(author, sample()).await.unwrap();

        let patch = PostPatch {
            subject: Some("hijacked".to_string()),
            ..Default::default()
        };
        let err = svc.update(post.id, intruder, patch).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let unchanged = svc.get(post.id).await.unwrap();
        assert_eq!(unchanged.subject, "A");
        assert_eq!(unchanged.author_id, author);
    }

    #[tokio::test]
    async fn update_overwrites_only_supplied_fields() {
        let svc = service();
        let author = Uuid::new_v4();
        let post = svc.create(author, sample()).await.unwrap();

        let patch = PostPatch {
            subject: Some("A2".to_string()),
            ..Default::default()
        };
        let updated = svc.update(post.id, author, patch).await.unwrap();

        assert_eq!(updated.subject, "A2");
        assert_eq!(updated.content, "B");
        assert_eq!(updated.tag, "C");
        assert_eq!(updated.approval, Approval::Given);
        assert_eq!(updated.author_id, author);
        assert!(updated.modified_at >= post.modified_at);
    }

    #[tokio::test]
    async fn delete_by_non_author_is_forbidden_and_post_survives() {
        let svc = service();
        let author = Uuid::new_v4();
        let post = svc.create(author, sample()).await.unwrap();

        let err = svc.delete(post.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let listed = svc.list().await.unwrap();
        assert!(listed.iter().any(|p| p.id == post.id));
    }

    #[tokio::test]
    async fn delete_by_author_removes_post() {
        let svc = service();
        let author = Uuid::new_v4();
        let post = svc.create(author, sample()).await.unwrap();

        svc.delete(post.id, author).await.unwrap();

        assert!(svc.list().await.unwrap().is_empty());
        let err = svc.get(post.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
