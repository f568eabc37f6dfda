//! Forum services - the CRUD operations over the repository ports.
//!
//! Every mutating operation takes the caller's identity as an explicit
//! `Uuid` argument; nothing here reads ambient session state. Ownership
//! checks compare author ids by value.

mod comments;
mod posts;

pub use comments::CommentService;
pub use posts::{NewPost, PostPatch, PostService};

use crate::error::{DomainError, RepoError};

/// Repository failures that reach a service are infrastructure trouble,
/// not business outcomes. Lookup misses are handled per call site.
fn storage_error(err: RepoError) -> DomainError {
    DomainError::Internal(err.to_string())
}
