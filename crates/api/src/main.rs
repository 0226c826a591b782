//! API server entry point.

use api::config::Config;
use domain::Money;
use tokio::signal;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing and (optionally) OTLP span export
    let tracer_provider = api::telemetry::init();

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Build application state and the settlement worker
    let (state, worker) = api::create_default_state(&config);

    // Demo catalog entries for local runs.
    state.catalog.set_price("SKU-001", Money::from_cents(1000));
    state.catalog.set_price("SKU-002", Money::from_cents(2500));
    state.catalog.set_price("SKU-003", Money::from_cents(499));
    tracing::info!(
        products = state.catalog.product_count(),
        "seeded demo catalog"
    );

    // 4. Consume the payment-process topic
    let _settlement_loop = api::spawn_settlement_loop(&state, worker, &config.payment_topic);

    // 5. Build and start the server
    let app = api::create_app(state, metrics_handle);
    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    if let Some(provider) = tracer_provider {
        if let Err(err) = provider.shutdown() {
            tracing::warn!(error = %err, "tracer provider shutdown failed");
        }
    }

    tracing::info!("server shut down gracefully");
}
