//! Status and error bodies returned by the User API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `{"status": "ok"}` returned on a successful creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Body of a 400 response: per-field validation messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub status: String,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrorResponse {
    pub fn new(errors: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            status: "error".to_string(),
            errors,
        }
    }
}

/// `{"message": "..."}` used for 404 and 500 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ok_shape() {
        let json = serde_json::to_string(&StatusResponse::ok()).unwrap();
        assert_eq!(json, r#"{"status":"ok"}"#);
    }

    #[test]
    fn test_validation_error_shape() {
        let mut errors = BTreeMap::new();
        errors.insert(
            "firstname".to_string(),
            vec!["This value should not be blank.".to_string()],
        );

        let value = serde_json::to_value(ValidationErrorResponse::new(errors)).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["errors"]["firstname"][0], "This value should not be blank.");
    }

    #[test]
    fn test_message_shape() {
        let json = serde_json::to_string(&MessageResponse::new("gone")).unwrap();
        assert_eq!(json, r#"{"message":"gone"}"#);
    }
}
