//! Domain entities - the core business objects.

mod comment;
mod post;
mod user;

pub use comment::Comment;
pub use post::{Approval, Post};
pub use user::User;
