use std::sync::Arc;

use actix_web::{App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod model;
mod service;

use app::AppState;
use model::Config;
use service::queue::QueueEvent;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let state = match AppState::new(&config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize application");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    // Audit trail of queue transitions
    let mut events = state.queue.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(QueueEvent::ScanStarted { id }) => {
                    tracing::debug!(doc_id = %id, "Queue event: scan started");
                }
                Ok(QueueEvent::Updated(doc)) => {
                    tracing::info!(
                        doc_id = %doc.id,
                        state = %doc.state,
                        reason = doc.reason.as_deref().unwrap_or(""),
                        "Queue event: document updated"
                    );
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped = skipped, "Queue event logger lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let summary = state.queue.summary();
    tracing::info!(
        documents = summary.total,
        pending = summary.pending,
        "Starting compliance screening server on {}",
        bind_addr
    );

    HttpServer::new(move || {
        let state = Arc::clone(&state);
        App::new()
            .configure(|cfg| state.configure(cfg))
            .configure(api::document::configure)
            .configure(api::screening::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
