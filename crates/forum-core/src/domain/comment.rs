use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - a reply attached to exactly one post.
///
/// `post_id` is fixed at creation; a comment cannot be moved to another post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub modified_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment by `author_id` on `post_id`.
    pub fn new(author_id: Uuid, post_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            post_id,
            content,
            modified_at: Utc::now(),
        }
    }
}
