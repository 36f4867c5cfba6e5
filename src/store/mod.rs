//! Storage layer: the [`UserStore`] seam and its backends.
//!
//! Handlers only ever see `Arc<dyn UserStore>`. The PostgreSQL backend is
//! used in production; the in-memory backend enforces the same uniqueness
//! and foreign-key constraints and backs tests and database-less runs.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{NewUser, Post, User, UserId, UserWithPosts};

pub use memory::InMemoryUserStore;
pub use postgres::PostgresUserStore;

/// Storage failure classified by what the caller can do about it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store rejected the row being written: a constraint, or a value
    /// the column cannot hold. Carries the store's message verbatim.
    #[error("{0}")]
    ConstraintViolation(String),

    /// The requested row does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Connection, protocol or other unexpected failure.
    #[error("{0}")]
    Internal(String),
}

/// Persistence operations for users and their posts.
///
/// Every call goes to the underlying store; nothing is cached.
#[async_trait]
pub trait UserStore: std::fmt::Debug + Send + Sync {
    /// Inserts a user and returns it with its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConstraintViolation`] if the store rejects the
    /// row (for example a taken email), [`StoreError::Internal`] if the
    /// store cannot be reached.
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Returns every user in id order, each with its posts.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Internal`] on store failure.
    async fn list_users_with_posts(&self) -> Result<Vec<UserWithPosts>, StoreError>;

    /// Inserts a post owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConstraintViolation`] if no such user exists.
    async fn create_post(&self, user_id: UserId) -> Result<Post, StoreError>;
}
