//! # Forum Infrastructure
//!
//! Concrete implementations of the ports defined in `forum-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory repositories only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `auth` - JWT + Argon2 authentication

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::{
    DatabaseConfig, InMemoryCommentRepository, InMemoryPostRepository, InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConnection, PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
