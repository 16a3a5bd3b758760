//! Input validation for user payloads.
//!
//! A `UserForm` starts empty for a creation and pre-filled from the stored
//! record for an update. Submitting a JSON body merges the known fields into
//! it, then checks that every required field ends up set.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::models::user::{User, UserFields};

pub const FIRSTNAME: &str = "firstname";
pub const LASTNAME: &str = "lastname";

/// Column width of the name fields.
pub const MAX_NAME_LENGTH: usize = 255;

pub const NOT_BLANK: &str = "This value should not be blank.";
pub const NOT_A_STRING: &str = "This value should be of type string.";

pub fn too_long_message() -> String {
    format!("This value is too long. It should have {MAX_NAME_LENGTH} characters or less.")
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Mutable view of the editable user fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            firstname: Some(user.firstname.clone()),
            lastname: Some(user.lastname.clone()),
        }
    }
}

impl UserForm {
    /// Merge `input` into the form and validate the result.
    ///
    /// Present scalar fields overwrite, `null` and `false` clear, absent
    /// fields keep the current value and unknown keys are ignored. A body
    /// that is not an object clears every field.
    pub fn submit(mut self, input: &Value) -> Result<UserFields, FieldErrors> {
        let mut errors = FieldErrors::default();
        let object = input.as_object();

        for (name, slot) in [
            (FIRSTNAME, &mut self.firstname),
            (LASTNAME, &mut self.lastname),
        ] {
            let Some(object) = object else {
                *slot = None;
                continue;
            };

            match object.get(name) {
                None => {}
                Some(value) => match scalar_text(value) {
                    Ok(text) => *slot = text,
                    Err(()) => errors.add(name, NOT_A_STRING),
                },
            }
        }

        let firstname = required(FIRSTNAME, self.firstname, &mut errors);
        let lastname = required(LASTNAME, self.lastname, &mut errors);

        match (firstname, lastname) {
            (Some(firstname), Some(lastname)) if errors.is_empty() => {
                Ok(UserFields { firstname, lastname })
            }
            _ => Err(errors),
        }
    }
}

/// Text form of a scalar JSON value; `Err` for arrays and objects.
fn scalar_text(value: &Value) -> Result<Option<String>, ()> {
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Bool(true) => Ok(Some("1".to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Array(_) | Value::Object(_) => Err(()),
    }
}

fn required(field: &str, value: Option<String>, errors: &mut FieldErrors) -> Option<String> {
    // a field that already failed its type check gets no further messages
    if errors.get(field).is_some() {
        return None;
    }

    match value {
        None => {
            errors.add(field, NOT_BLANK);
            None
        }
        Some(v) if v.is_empty() => {
            errors.add(field, NOT_BLANK);
            None
        }
        Some(v) if v.chars().count() > MAX_NAME_LENGTH => {
            errors.add(field, too_long_message());
            None
        }
        Some(v) => Some(v),
    }
}
