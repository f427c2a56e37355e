pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod summarizer;
pub mod telemetry;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;

pub use config::{Config, ConfigError, UpstreamConfig};
pub use error::{ApiError, SummarizeError};
pub use models::{SummaryRequest, SummaryResponse};
pub use summarizer::Summarizer;

#[derive(Clone)]
pub struct AppState {
    pub summarizer: Summarizer,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let summarizer = Summarizer::new(config.upstream.clone())?;
        Ok(Self { summarizer })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/summarize", post(handlers::summarize::summarize))
        // Middleware stack (order matters!)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::trace_layer())
                .layer(middleware::cors_layer()),
        )
        .with_state(state)
}
