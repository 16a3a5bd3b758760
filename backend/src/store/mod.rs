//! User record store.
//!
//! `UserRepository` is the persistence seam: the service only ever talks to
//! a `dyn UserRepository`, and the store alone assigns ids.

mod sqlite;

pub use sqlite::SqliteUserRepository;

use async_trait::async_trait;

use crate::models::user::{NewUser, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("No user row with id {0}")]
    RowNotFound(i64),
}

/// Persistence operations for user rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored user, ordered by id.
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Insert a new row and return it with its assigned id.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// Persist the editable fields and `update_date` of an existing row.
    async fn update(&self, user: &User) -> Result<(), StoreError>;

    async fn remove(&self, user: &User) -> Result<(), StoreError>;
}
