//! HTTP checkout frontend for the storefront pipeline.
//!
//! Exposes the checkout and order-lookup endpoints with structured
//! logging (tracing) and Prometheus metrics, and wires the settlement
//! worker onto the broker's payment-process topic.

pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use eventing::InMemoryBroker;
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::{InMemoryOrderStore, OrderStore};
use saga::{
    CheckoutService, InMemoryCatalog, InMemoryPaymentProvider, SettlementWorker,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use routes::checkout::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<R: OrderStore + Clone + 'static>(
    state: Arc<AppState<R>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new().route(
        "/metrics",
        get(move || {
            let handle = metrics_handle.clone();
            async move {
                (
                    [(
                        axum::http::header::CONTENT_TYPE,
                        "text/plain; version=0.0.4; charset=utf-8",
                    )],
                    handle.render(),
                )
            }
        }),
    );

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/checkout", post(routes::checkout::process::<R>))
        .route("/orders/{id}", get(routes::orders::get::<R>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state with in-memory collaborators
/// and the settlement worker consuming from the broker.
pub fn create_default_state(
    config: &Config,
) -> (
    Arc<AppState<InMemoryOrderStore>>,
    SettlementWorker<InMemoryOrderStore, InMemoryPaymentProvider, InMemoryBroker>,
) {
    let store = InMemoryOrderStore::new();
    let catalog = InMemoryCatalog::new();
    let broker = InMemoryBroker::new();
    let provider = InMemoryPaymentProvider::new();

    let checkout = CheckoutService::new(
        store.clone(),
        catalog.clone(),
        broker.clone(),
        config.payment_topic.clone(),
    );
    let worker = SettlementWorker::new(
        store.clone(),
        provider,
        broker.clone(),
        config.completion_topic.clone(),
    );

    let state = Arc::new(AppState {
        checkout,
        store,
        catalog,
        broker,
    });

    (state, worker)
}

/// Spawns the settlement consume loop for the payment-process topic.
///
/// Each delivered envelope is one worker invocation; a failed invocation
/// is logged and dropped here, where a real broker would redeliver it.
pub fn spawn_settlement_loop(
    state: &Arc<AppState<InMemoryOrderStore>>,
    worker: SettlementWorker<InMemoryOrderStore, InMemoryPaymentProvider, InMemoryBroker>,
    payment_topic: &str,
) -> tokio::task::JoinHandle<()> {
    let mut deliveries = state.broker.subscribe(payment_topic);

    tokio::spawn(async move {
        while let Some(envelope) = deliveries.recv().await {
            if let Err(err) = worker.handle(envelope).await {
                tracing::error!(error = %err, "settlement invocation failed");
            }
        }
    })
}
