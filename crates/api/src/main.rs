//! Stockroom API - REST CRUD service for users, products, orders and
//! inventory.
//!
//! This binary serves the API on port 8080 by default.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - `MongoDB` document store (or an in-memory store for local runs)
//! - Every store call bounded by a configurable deadline

#![cfg_attr(not(test), forbid(unsafe_code))]

use sentry::integrations::tracing as sentry_tracing;
use stockroom_api::config::{ApiConfig, StoreBackend};
use stockroom_api::db::{DocumentStore, InMemoryStore, MongoStore};
use stockroom_api::error::CAPTURED_TARGET;
use stockroom_api::routes;
use stockroom_api::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ApiConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
///
/// Only errors become events; warnings ride along as breadcrumbs. Errors
/// logged by `AppError` are captured there and skipped here.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    if metadata.target() == CAPTURED_TARGET {
        return sentry_tracing::EventFilter::Ignore;
    }
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO | tracing::Level::DEBUG => {
            sentry_tracing::EventFilter::Breadcrumb
        }
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Install the global subscriber: `EnvFilter`, text or JSON output, Sentry.
fn init_tracing(config: &ApiConfig) {
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stockroom_api=info,tower_http=debug".into());

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter));

    if config.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = ApiConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);
    init_tracing(&config);

    match config.store {
        StoreBackend::Mongo => {
            let store = MongoStore::connect(
                &config.mongodb_uri,
                &config.database,
                config.store_timeout,
            )
            .await
            .expect("Failed to create MongoDB client");
            serve(config, store).await;
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on shutdown");
            serve(config, InMemoryStore::new()).await;
        }
    }
}

/// Run the HTTP server against `store` until a shutdown signal arrives.
async fn serve<S: DocumentStore>(config: ApiConfig, store: S) {
    let addr = config.socket_addr();
    let timeout = config.store_timeout;
    let state = AppState::new(config, store);

    // The driver connects lazily; report reachability without blocking startup
    match tokio::time::timeout(timeout, state.store().ping()).await {
        Ok(Ok(())) => tracing::info!("Store reachable"),
        Ok(Err(e)) => tracing::warn!(error = %e, "Store ping failed"),
        Err(_) => tracing::warn!(?timeout, "Store ping timed out"),
    }

    let app = routes::app(state);

    tracing::info!("stockroom-api listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
