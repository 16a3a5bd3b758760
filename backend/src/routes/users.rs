//! `/api/users` endpoints.

use std::sync::Arc;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use user_api_common::{StatusResponse, UserResource};

use crate::audit;
use crate::error::{Error, Result};
use crate::routes::route_not_found;
use crate::validation::UserForm;
use crate::AppState;

pub const COLLECTION_ROUTE: &str = "/users";
pub const CREATE_ROUTE: &str = "/users/new";
pub const ITEM_ROUTE: &str = "/users/:id";

/// Whether a path segment satisfies the `\d+` id requirement.
pub fn is_user_id(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// `{id}` path parameter restricted to digits.
///
/// Anything else is treated as an unmatched route. A digit string too large
/// for an `i64` cannot name a stored user and is reported as a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if !is_user_id(&raw) {
            return Err(route_not_found().await.into_response());
        }

        raw.parse::<i64>()
            .map(UserId)
            .map_err(|_| Error::user_not_found().into_response())
    }
}

/// Raw body as JSON; anything unparseable becomes `null`, which blanks every field.
fn parse_body(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

/// GET /api/users - List every user
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserResource>>> {
    let users = state.user_service.fetch_all_users().await?;
    Ok(Json(users.into_iter().map(UserResource::from).collect()))
}

/// GET /api/users/{id} - Show one user
async fn show_user(
    State(state): State<Arc<AppState>>,
    UserId(id): UserId,
) -> Result<Json<UserResource>> {
    let user = state.user_service.fetch_user_by_id(id).await?;
    Ok(Json(user.into()))
}

/// POST /api/users/new - Create a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<StatusResponse>)> {
    let fields = UserForm::default()
        .submit(&parse_body(&body))
        .map_err(Error::Validation)?;

    state.user_service.save_user_created(fields).await?;

    Ok((StatusCode::CREATED, Json(StatusResponse::ok())))
}

/// PUT /api/users/{id} - Update a user
async fn update_user(
    State(state): State<Arc<AppState>>,
    UserId(id): UserId,
    body: Bytes,
) -> Result<StatusCode> {
    let mut user = state.user_service.fetch_user_by_id(id).await?;

    let fields = UserForm::from(&user)
        .submit(&parse_body(&body))
        .map_err(Error::Validation)?;
    user.apply(fields);

    state.user_service.save_user_updated(user).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/users/{id} - Delete a user
async fn delete_user(
    State(state): State<Arc<AppState>>,
    UserId(id): UserId,
) -> Result<StatusCode> {
    let user = state.user_service.fetch_user_by_id(id).await?;
    state.user_service.delete_user(user).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(COLLECTION_ROUTE, get(list_users))
        .route(CREATE_ROUTE, post(create_user))
        .route(ITEM_ROUTE, get(show_user).put(update_user).delete(delete_user))
        .route_layer(middleware::from_fn(audit::log_user_update))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_requires_digits() {
        assert!(is_user_id("0"));
        assert!(is_user_id("12345678901234567890"));
        assert!(!is_user_id(""));
        assert!(!is_user_id("new"));
        assert!(!is_user_id("-1"));
        assert!(!is_user_id("1.5"));
        assert!(!is_user_id("٣"));
    }

    #[test]
    fn test_parse_body_falls_back_to_null() {
        assert_eq!(parse_body(&Bytes::from_static(b"not json")), Value::Null);
        assert_eq!(parse_body(&Bytes::new()), Value::Null);
        assert!(parse_body(&Bytes::from_static(br#"{"firstname":"Jane"}"#)).is_object());
    }
}
