//! Update audit trail.
//!
//! Attached with `route_layer` to the user router, so it sees the matched
//! route before the handler runs. Every PUT on the user item route is logged,
//! whether or not the update goes on to succeed.

use axum::{
    extract::{MatchedPath, Request},
    http::Method,
    middleware::Next,
    response::Response,
};

use crate::routes::users::{is_user_id, ITEM_ROUTE};

/// Id targeted by an auditable request, if this request is one.
pub fn audited_user_id<'a>(
    method: &Method,
    matched_path: Option<&str>,
    path: &'a str,
) -> Option<&'a str> {
    if *method != Method::PUT || !matched_path?.ends_with(ITEM_ROUTE) {
        return None;
    }

    let id = path.trim_end_matches('/').rsplit('/').next()?;
    is_user_id(id).then_some(id)
}

/// Middleware that logs update attempts on a user.
pub async fn log_user_update(request: Request, next: Next) -> Response {
    let matched = request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str);

    if let Some(id) = audited_user_id(request.method(), matched, request.uri().path()) {
        tracing::info!(user_id = %id, "Update of the user with id :{}", id);
    }

    next.run(request).await
}
