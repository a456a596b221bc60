//! Main webserver implementation
//!
//! The WebServer struct owns the shared state and builds the axum router,
//! with the provider client injected through the relay.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use relay::{ChatRelay, ProviderClient};
use shared::{ProcessId, process_info};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::web::handlers::{chat_handler, dual_handler, health_check, route_handler, status_handler};

/// Main webserver struct with dependency injection
pub struct WebServer<P: ProviderClient + 'static> {
    state: Arc<WebServerState<P>>,
}

impl<P: ProviderClient + 'static> Clone for WebServer<P> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<P: ProviderClient + 'static> WebServer<P> {
    pub fn new(bind_address: SocketAddr, relay: ChatRelay<P>) -> Self {
        Self {
            state: Arc::new(WebServerState::new(bind_address, relay)),
        }
    }

    pub fn state(&self) -> &Arc<WebServerState<P>> {
        &self.state
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            // Chat routes
            .route("/api/chat", post(chat_handler::<P>))
            .route("/api/dual", post(dual_handler::<P>))
            .route("/api/route", post(route_handler::<P>))
            .route("/api/status", get(status_handler::<P>))
            // Health check
            .route("/health", get(health_check))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.state.clone())
    }

    /// Serve until `shutdown` resolves
    pub async fn run<F>(&self, shutdown: F) -> WebServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let bind_address = self.state.bind_address;

        let listener = tokio::net::TcpListener::bind(bind_address)
            .await
            .map_err(|e| {
                WebServerError::ServerStartup(format!("Failed to bind to {bind_address}: {e}"))
            })?;

        process_info!(ProcessId::current(), "Web server listening on http://{}", bind_address);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
