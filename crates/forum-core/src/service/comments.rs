//! Comment CRUD. Editing is author-only; deletion deliberately is not
//! (any authenticated caller may delete any comment), and deleting a post
//! does not cascade here.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::Comment;
use crate::error::DomainError;
use crate::ports::{CommentRepository, PostRepository};

use super::storage_error;

/// Comment operations over the repository ports. Holds the post port too,
/// because creating or listing comments requires the parent post to exist.
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { comments, posts }
    }

    async fn require_post(&self, post_id: Uuid) -> Result<(), DomainError> {
        self.posts
            .find_by_id(post_id)
            .await
            .map_err(storage_error)?
            .map(|_| ())
            .ok_or(DomainError::not_found("post", post_id))
    }

    /// A single comment, or `NotFound` if the id does not resolve.
    pub async fn get(&self, id: Uuid) -> Result<Comment, DomainError> {
        self.comments
            .find_by_id(id)
            .await
            .map_err(storage_error)?
            .ok_or(DomainError::not_found("comment", id))
    }

    /// Comments belonging to `post_id`, nothing from other posts.
    pub async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        self.require_post(post_id).await?;
        self.comments
            .find_by_post_id(post_id)
            .await
            .map_err(storage_error)
    }

    /// Attach a new comment to an existing post.
    pub async fn create(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        content: String,
    ) -> Result<Comment, DomainError> {
        self.require_post(post_id).await?;
        let comment = Comment::new(author_id, post_id, content);
        self.comments.save(comment).await.map_err(storage_error)
    }

    /// Overwrite the content and modification timestamp. Author-only.
    pub async fn update(
        &self,
        id: Uuid,
        caller_id: Uuid,
        content: String,
    ) -> Result<Comment, DomainError> {
        let mut comment = self.get(id).await?;

        if comment.author_id != caller_id {
            return Err(DomainError::Forbidden(
                "You can't edit a comment you didn't write.",
            ));
        }

        comment.content = content;
        comment.modified_at = Utc::now();
        self.comments.save(comment).await.map_err(storage_error)
    }

    /// Remove the comment. No ownership check: any authenticated caller may
    /// delete any comment, unlike post deletion.
    pub async fn delete(&self, id: Uuid) -> Result<Comment, DomainError> {
        let comment = self.get(id).await?;
        self.comments.delete(id).await.map_err(storage_error)?;
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Approval;
    use crate::service::testutil::{MemoryComments, MemoryPosts};
    use crate::service::{NewPost, PostService};

    struct Fixture {
        posts: PostService,
        comments: CommentService,
    }

    fn fixture() -> Fixture {
        let post_repo = Arc::new(MemoryPosts::default());
        let comment_repo = Arc::new(MemoryComments::default());
        Fixture {
            posts: PostService::new(post_repo.clone()),
            comments: CommentService::new(comment_repo, post_repo),
        }
    }

    async fn make_post(fx: &Fixture, author: Uuid) -> Uuid {
        fx.posts
            .create(
                author,
                NewPost {
                    subject: "subject".to_string(),
                    content: "content".to_string(),
                    tag: "tag".to_string(),
                    approval: Approval::NotGiven,
                },
            )
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn create_requires_existing_post() {
        let fx = fixture();
        let err = fx
            .comments
            .create(Uuid::new_v4(), Uuid::new_v4(), "hi".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "post", .. }));
    }

    #[tokio::test]
    async fn list_returns_only_comments_of_that_post() {
        let fx = fixture();
        let author = Uuid::new_v4();
        let post_a = make_post(&fx, author).await;
        let post_b = make_post(&fx, author).await;

        let on_a = fx
            .comments
            .create(author, post_a, "on a".to_string())
            .await
            .unwrap();
        fx.comments
            .create(author, post_b, "on b".to_string())
            .await
            .unwrap();

        let listed = fx.comments.list_for_post(post_a).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, on_a.id);
        assert_eq!(listed[0].content, "on a");
    }

    #[tokio::test]
    async fn update_by_non_author_is_forbidden() {
        let fx = fixture();
        let author = Uuid::new_v4();
        let post_id = make_post(&fx, author).await;
        let comment = fx
            .comments
            .create(author, post_id, "original".to_string())
            .await
            .unwrap();

        let err = fx
            .comments
            .update(comment.id, Uuid::new_v4(), "edited".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let unchanged = fx.comments.get(comment.id).await.unwrap();
        assert_eq!(unchanged.content, "original");
    }

    #[tokio::test]
    async fn delete_ignores_caller_identity() {
        // Deletion is open to any authenticated user, unlike post deletion.
        let fx = fixture();
        let author = Uuid::new_v4();
        let post_id = make_post(&fx, author).await;
        let comment = fx
            .comments
            .create(author, post_id, "anyone can remove this".to_string())
            .await
            .unwrap();

        fx.comments.delete(comment.id).await.unwrap();

        let err = fx.comments.get(comment.id).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound {
                entity: "comment",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn deleting_post_leaves_comments_behind() {
        let fx = fixture();
        let author = Uuid::new_v4();
        let post_id = make_post(&fx, author).await;
        let comment = fx
            .comments
            .create(author, post_id, "orphan-to-be".to_string())
            .await
            .unwrap();

        fx.posts.delete(post_id, author).await.unwrap();

        // The comment row survives, but is unreachable through its post.
        assert!(fx.comments.get(comment.id).await.is_ok());
        let err = fx.comments.list_for_post(post_id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "post", .. }));
    }
}
