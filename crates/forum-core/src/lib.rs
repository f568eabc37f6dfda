//! # Forum Core
//!
//! The domain layer of the forum backend.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
