//! Persistence adapters: SeaORM/PostgreSQL repositories plus in-memory
//! twins used as fallback and in tests.

mod connections;
pub mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;
pub use memory::{InMemoryCommentRepository, InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use connections::DatabaseConnection;
#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
