//! Integration tests for the API server.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain::Money;
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::InMemoryOrderStore;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> (
    axum::Router,
    Arc<api::routes::checkout::AppState<InMemoryOrderStore>>,
) {
    let config = api::config::Config::default();
    let (state, worker) = api::create_default_state(&config);
    state.catalog.set_price("SKU-001", Money::from_cents(1000));

    api::spawn_settlement_loop(&state, worker, &config.payment_topic);

    let app = api::create_app(state.clone(), get_metrics_handle());
    (app, state)
}

fn checkout_body(token: Option<&str>) -> String {
    serde_json::json!({
        "product_ids": ["SKU-001"],
        "address_1": "1600 Amphitheatre Pkwy",
        "city": "Mountain View",
        "state": "CA",
        "zip_code": "94043",
        "email": "buyer@example.com",
        "mobile": "555-0100",
        "token": token,
    })
    .to_string()
}

async fn post_checkout(app: &axum::Router, body: String) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/checkout")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn get_order(app: &axum::Router, order_id: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/orders/{order_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Polls until the order leaves `order_created` or the deadline passes.
async fn wait_for_settlement(app: &axum::Router, order_id: &str) -> serde_json::Value {
    for _ in 0..50 {
        let (status, json) = get_order(app, order_id).await;
        assert_eq!(status, StatusCode::OK);
        if json["status"] != "order_created" {
            return json;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("order {order_id} never settled");
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "api");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_metrics_endpoint_renders_counters() {
    let (app, _) = setup();

    // Drive a checkout so at least one counter has been registered.
    post_checkout(&app, checkout_body(None)).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/plain"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("checkout_requests_total"));
}

#[tokio::test]
async fn test_checkout_with_token_settles_asynchronously() {
    let (app, _) = setup();

    let (status, json) = post_checkout(&app, checkout_body(Some("tok_123"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["amount_cents"], 1000);
    assert_eq!(json["status"], "order_created");

    let order_id = json["order_id"].as_str().unwrap().to_string();
    let settled = wait_for_settlement(&app, &order_id).await;
    assert_eq!(settled["status"], "payment_processed");
    assert_eq!(settled["amount_cents"], 1000);
}

#[tokio::test]
async fn test_tokenless_checkout_stays_created() {
    let (app, state) = setup();

    let (status, json) = post_checkout(&app, checkout_body(None)).await;
    assert_eq!(status, StatusCode::CREATED);

    // No payment event was published, so the worker never runs.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let order_id = json["order_id"].as_str().unwrap();
    let (status, json) = get_order(&app, order_id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "order_created");
    assert_eq!(state.broker.publish_count("payment-process"), 0);
}

#[tokio::test]
async fn test_completion_event_published_after_settlement() {
    let (app, state) = setup();

    let (_, json) = post_checkout(&app, checkout_body(Some("tok_123"))).await;
    let order_id = json["order_id"].as_str().unwrap().to_string();
    wait_for_settlement(&app, &order_id).await;

    let completions = state.broker.published("payment-completion");
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].event_context["order_id"], order_id);
    assert_eq!(completions[0].event_context["email"], "buyer@example.com");
}

#[tokio::test]
async fn test_invalid_checkout_rejected() {
    let (app, state) = setup();

    let body = serde_json::json!({
        "product_ids": [],
        "address_1": "1600 Amphitheatre Pkwy",
        "city": "Mountain View",
        "state": "CA",
        "zip_code": "94043",
        "email": "buyer@example.com",
        "mobile": "555-0100",
    })
    .to_string();

    let (status, json) = post_checkout(&app, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
    assert_eq!(state.store.order_count().await, 0);
}

#[tokio::test]
async fn test_invalid_user_id_rejected() {
    let (app, _) = setup();

    let mut body: serde_json::Value = serde_json::from_str(&checkout_body(None)).unwrap();
    body["user_id"] = "not-a-uuid".into();

    let (status, _) = post_checkout(&app, body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_order_returns_404() {
    let (app, _) = setup();

    let (status, _) = get_order(&app, &uuid::Uuid::new_v4().to_string()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_malformed_order_id_returns_400() {
    let (app, _) = setup();

    let (status, _) = get_order(&app, "not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
