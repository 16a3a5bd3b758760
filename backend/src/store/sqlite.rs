use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{StoreError, UserRepository};
use crate::models::user::{NewUser, User};

const SELECT_USER: &str =
    "SELECT id, firstname, lastname, creation_date, update_date FROM users";

/// SQLite-backed user store.
pub struct SqliteUserRepository {
    conn: Mutex<Connection>,
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

impl SqliteUserRepository {
    /// Open (or create) the database and make sure the `users` table exists.
    pub fn open(database_url: &str) -> Result<Self, StoreError> {
        // Parse sqlite: prefix if present
        let path = database_url.strip_prefix("sqlite:").unwrap_or(database_url);

        if path != ":memory:" {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
                }
            }
        }

        let conn = Connection::open(path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                firstname TEXT NOT NULL,
                lastname TEXT NOT NULL,
                creation_date TEXT NOT NULL,
                update_date TEXT NOT NULL
            )",
            [],
        )?;

        tracing::info!("User store initialized with database: {}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        firstname: row.get(1)?,
        lastname: row.get(2)?,
        creation_date: timestamp_column(row, 3)?,
        update_date: timestamp_column(row, 4)?,
    })
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{SELECT_USER} ORDER BY id"))?;
        let users = stmt
            .query_map([], user_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let conn = self.lock()?;
        let user = conn
            .query_row(
                &format!("{SELECT_USER} WHERE id = ?1"),
                params![id],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO users (firstname, lastname, creation_date, update_date)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user.firstname,
                user.lastname,
                user.creation_date.to_rfc3339(),
                user.update_date.to_rfc3339(),
            ],
        )?;
        let id = conn.last_insert_rowid();

        tracing::debug!("Inserted user row: {}", id);
        Ok(User {
            id,
            firstname: user.firstname,
            lastname: user.lastname,
            creation_date: user.creation_date,
            update_date: user.update_date,
        })
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        let conn = self.lock()?;
        // creation_date is never rewritten
        let changed = conn.execute(
            "UPDATE users SET firstname = ?1, lastname = ?2, update_date = ?3 WHERE id = ?4",
            params![
                user.firstname,
                user.lastname,
                user.update_date.to_rfc3339(),
                user.id,
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::RowNotFound(user.id));
        }
        Ok(())
    }

    async fn remove(&self, user: &User) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM users WHERE id = ?1", params![user.id])?;

        if changed == 0 {
            return Err(StoreError::RowNotFound(user.id));
        }
        tracing::debug!("Removed user row: {}", user.id);
        Ok(())
    }
}
