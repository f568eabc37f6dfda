//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
}

/// Request to create a post. `approval` takes `"given"` or `"not_given"`,
/// mirroring the two-choice select on the original form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub subject: String,
    pub content: String,
    pub tag: String,
    pub approval: String,
}

/// Request to update a post. Omitted fields keep their stored value;
/// approval and author cannot be changed through an update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub subject: Option<String>,
    pub content: Option<String>,
    pub tag: Option<String>,
}

/// A post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub subject: String,
    pub content: String,
    pub tag: String,
    pub approval: String,
    pub modified_at: DateTime<Utc>,
}

/// A post together with its comments (the single-post read view).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

/// Request to create or update a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentBodyRequest {
    pub content: String,
}

/// A comment as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub modified_at: DateTime<Utc>,
}
