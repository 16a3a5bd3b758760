//! User service: lookups, timestamp stamping and persistence orchestration.

use std::sync::Arc;

use chrono::Utc;

use crate::error::{Error, Result};
use crate::models::user::{NewUser, User, UserFields};
use crate::store::{StoreError, UserRepository};

/// Mediates between the HTTP handlers and the record store.
///
/// The service is the only place timestamps are set.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Every stored user. Unpaginated.
    pub async fn fetch_all_users(&self) -> Result<Vec<User>> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn fetch_user_by_id(&self, id: i64) -> Result<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(Error::user_not_found)
    }

    /// Stamp creation and update dates with the same instant, then insert.
    pub async fn save_user_created(&self, fields: UserFields) -> Result<User> {
        let user = self
            .repository
            .insert(NewUser::stamped(fields, Utc::now()))
            .await?;

        tracing::info!("Created user with id {}", user.id);
        Ok(user)
    }

    /// Reset the update date to now and persist.
    pub async fn save_user_updated(&self, mut user: User) -> Result<User> {
        user.update_date = Utc::now().max(user.creation_date);

        self.repository
            .update(&user)
            .await
            .map_err(missing_row_as_not_found)?;
        Ok(user)
    }

    pub async fn delete_user(&self, user: User) -> Result<()> {
        self.repository
            .remove(&user)
            .await
            .map_err(missing_row_as_not_found)?;

        tracing::info!("Deleted user with id {}", user.id);
        Ok(())
    }
}

/// A row deleted between lookup and write surfaces as a plain miss.
fn missing_row_as_not_found(e: StoreError) -> Error {
    match e {
        StoreError::RowNotFound(_) => Error::user_not_found(),
        other => Error::Store(other),
    }
}
