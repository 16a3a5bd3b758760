use chrono::{DateTime, Utc};
use user_api_common::UserResource;

/// Validated field values that have not been stamped or stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub firstname: String,
    pub lastname: String,
}

/// A stamped user waiting for the store to assign its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub firstname: String,
    pub lastname: String,
    pub creation_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

impl NewUser {
    /// Stamp both timestamps with the same instant.
    pub fn stamped(fields: UserFields, now: DateTime<Utc>) -> Self {
        Self {
            firstname: fields.firstname,
            lastname: fields.lastname,
            creation_date: now,
            update_date: now,
        }
    }
}

/// Persisted user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Assigned by the store, never changes
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    /// Set once at creation
    pub creation_date: DateTime<Utc>,
    /// Reset on every successful update
    pub update_date: DateTime<Utc>,
}

impl User {
    /// Overwrite the editable fields, keeping id and timestamps.
    pub fn apply(&mut self, fields: UserFields) {
        self.firstname = fields.firstname;
        self.lastname = fields.lastname;
    }
}

impl From<&User> for UserResource {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            creation_date: user.creation_date,
            update_date: user.update_date,
        }
    }
}

impl From<User> for UserResource {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname,
            lastname: user.lastname,
            creation_date: user.creation_date,
            update_date: user.update_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(first: &str, last: &str) -> UserFields {
        UserFields {
            firstname: first.to_string(),
            lastname: last.to_string(),
        }
    }

    #[test]
    fn test_stamped_uses_same_instant() {
        let now = Utc::now();
        let user = NewUser::stamped(fields("Ada", "Lovelace"), now);
        assert_eq!(user.creation_date, now);
        assert_eq!(user.update_date, now);
    }

    #[test]
    fn test_apply_keeps_identity_and_timestamps() {
        let now = Utc::now();
        let mut user = User {
            id: 3,
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            creation_date: now,
            update_date: now,
        };

        user.apply(fields("Augusta", "King"));

        assert_eq!(user.id, 3);
        assert_eq!(user.firstname, "Augusta");
        assert_eq!(user.lastname, "King");
        assert_eq!(user.creation_date, now);
        assert_eq!(user.update_date, now);
    }
}
