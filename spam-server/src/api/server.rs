//! HTTP server for the page and the JSON API

use axum::{
    routing::{get, post},
    Router,
};
use spam_core::SpamClassifier;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::{self, AppState};
use crate::api::web;
use crate::error::Result;

/// API Server configuration
pub struct ApiServer {
    state: Arc<AppState>,
    addr: String,
}

impl ApiServer {
    /// Create a new server around a ready classifier
    pub fn new(classifier: SpamClassifier, addr: String) -> Self {
        let state = Arc::new(AppState { classifier });
        Self { state, addr }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        // CORS for the JSON API only
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let api_routes = Router::new()
            .route("/classify", post(handlers::classify))
            .layer(cors);

        Router::new()
            .route("/", get(web::index).post(web::check))
            .route("/health", get(handlers::health))
            .nest("/api", api_routes)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the server
    pub async fn run(&self) -> Result<()> {
        let router = self.router();

        info!("Starting spam-server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
