pub mod health;
pub mod users;

use axum::{http::StatusCode, Json};
use user_api_common::MessageResponse;

/// Fallback for paths no route matches.
pub async fn route_not_found() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse::new("No route found")),
    )
}
