//! Reference plate repository for the dashboard.
//!
//! Serves the `foods` resource the dashboard talks to, backed by an in-memory
//! store. Good enough for local development and end-to-end tests, not a database.
//!
//!
//!
//! # Routes
//!
//! - `GET /foods`: every plate, in insertion order
//! - `POST /foods`: create, responds `201` with the stored plate
//! - `PUT /foods/{id}`: replace name, image, price, description
//! - `DELETE /foods/{id}`: remove, responds `200` with `{}`
//!
//! Unknown ids are `404`. Drafts with a blank name or a price that is not
//! plain digits with an optional fraction are `400`.
//!
//!
//!
//! # Notes
//!
//! ## Ids
//! Ids are handed out as `max(id) + 1`, the same rule the mock server the
//! dashboard was first written against used. Deleting the newest plate frees
//! its id for the next insert. Once `u64::MAX` is taken, creates answer `500`.
//!
//! ## Availability
//! `available` is only ever set on create. Updates leave it alone.
//!
//!
//!
//! # Setup
//!
//! Start on the default port with the bundled menu.
//! ```sh
//! SEED_PATH=fixtures/foods.json RUST_LOG=info cargo run -p server
//! ```
//!
//! Environment
//! - `RUST_PORT`: listen port, default `3333`
//! - `SEED_PATH`: optional fixture file, `{"foods": [...]}`
//! - `RUST_LOG`: `tracing` filter
use std::{io, sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, put},
};

use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use config::Config;
use routes::{create_handler, delete_handler, list_handler, update_handler};
use state::State;

pub fn router(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/foods", get(list_handler).post(create_handler))
        .route("/foods/{id}", put(update_handler).delete(delete_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = State::new(Config::load()?)?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    serve(listener, state, shutdown_signal()).await?;

    info!("Server shutting down...");

    Ok(())
}

/// Serves the plate routes on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: Arc<State>, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
