use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use http::{Method, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing_subscriber::layer::SubscriberExt;
use user_api_backend::build_app;
use user_api_backend::test_util::create_test_state;
use user_api_common::UserResource;

const AUDIT_LINE: &str = "Update of the user with id :";

/// Log sink shared between the fmt layer and the test.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

async fn send_request(
    app: &axum::Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let mut req_builder = http::Request::builder().method(method).uri(uri);

    if body.is_some() {
        req_builder = req_builder.header("Content-Type", "application/json");
    }

    let req = req_builder
        .body(match body {
            Some(b) => Body::from(b.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_every_put_on_a_user_is_audited() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::registry().with(
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(move || writer.clone()),
    );
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = build_app(create_test_state().unwrap());

    let (status, _) = send_request(
        &app,
        Method::POST,
        "/api/users/new",
        Some(json!({"firstname": "Ada", "lastname": "Lovelace"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, bytes) = send_request(&app, Method::GET, "/api/users", None).await;
    let users: Vec<UserResource> = serde_json::from_slice(&bytes).unwrap();
    let uri = format!("/api/users/{}", users[0].id);

    // missing user: logged even though the update is a 404
    logs.clear();
    let (status, _) = send_request(
        &app,
        Method::PUT,
        "/api/users/999",
        Some(json!({"firstname": "Jane", "lastname": "Doe"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(logs.contents().contains("Update of the user with id :999"));

    // invalid payload: logged even though the update is a 400
    logs.clear();
    let (status, _) =
        send_request(&app, Method::PUT, &uri, Some(json!({"firstname": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(logs
        .contents()
        .contains(&format!("{AUDIT_LINE}{}", users[0].id)));

    logs.clear();
    let (status, _) =
        send_request(&app, Method::PUT, &uri, Some(json!({"lastname": "King"}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(logs
        .contents()
        .contains(&format!("{AUDIT_LINE}{}", users[0].id)));

    // reads, deletes and unmatched ids are not audited
    logs.clear();
    let (status, _) = send_request(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send_request(&app, Method::DELETE, "/api/users/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send_request(
        &app,
        Method::PUT,
        "/api/users/abc",
        Some(json!({"firstname": "Jane", "lastname": "Doe"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let contents = logs.contents();
    assert!(contents.contains("HTTP request"));
    assert!(!contents.contains(AUDIT_LINE));
}
