use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a post has been approved for general display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Approval {
    Given,
    NotGiven,
}

/// Post entity - a user-authored forum entry.
///
/// `author_id` is set at creation and never changes afterwards; updates
/// may only touch subject, content, tag and the modification timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub subject: String,
    pub content: String,
    pub tag: String,
    pub approval: Approval,
    pub modified_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post authored by `author_id`, stamped with the current time.
    pub fn new(
        author_id: Uuid,
        subject: String,
        content: String,
        tag: String,
        approval: Approval,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            subject,
            content,
            tag,
            approval,
            modified_at: Utc::now(),
        }
    }
}
