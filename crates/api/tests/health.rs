mod common;

use axum::http::StatusCode;
use common::{body_json, get, TestApp};

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new();

    let response = get(app.router(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = TestApp::new();

    let response = get(app.router(), "/health").await;

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = TestApp::new();

    let response = get(app.router(), "/nope/").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
