//! Health Check API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{json_body, TestApp};

/// Test basic health check endpoint returns 200 OK
#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
}

/// Test liveness probe endpoint
#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new().await;

    let response = app.get("/health/live").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "alive");
}

/// Readiness reports the hub population
#[tokio::test]
async fn test_readiness_reports_hub() {
    let app = TestApp::new().await;

    let response = app.get("/health/ready").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["hub"]["active_connections"], 0);
}

/// Metrics are exported in the Prometheus text format
#[tokio::test]
async fn test_metrics_endpoint() {
    let app = TestApp::new().await;
    // Generate at least one sample for the request counter
    app.get("/health").await;

    let response = app.get("/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("school_chat_http_requests_total"));
}

/// Unknown URLs are folded into one series instead of one per path
#[tokio::test]
async fn test_unknown_paths_do_not_create_metric_series() {
    let app = TestApp::new().await;

    for uri in ["/no-such-route-a1b2", "/no-such-route-c3d4"] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let text = school_chat_hub::infrastructure::metrics::gather_metrics();
    assert!(!text.contains("no-such-route"));
    assert!(text.contains(r#"path="unmatched""#));
}
