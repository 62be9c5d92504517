//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use momo_types::CollectionApi;

use super::handlers::{self, AppState};
use crate::CollectionService;
use crate::openapi::ApiDoc;

/// HTTP facade over the collection API.
pub struct HttpServer<A: CollectionApi> {
    state: Arc<AppState<A>>,
}

impl<A: CollectionApi> HttpServer<A> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: CollectionService<A>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/create-api-user", post(handlers::create_api_user::<A>))
            .route("/create-api-key", post(handlers::create_api_key::<A>))
            .route(
                "/api-user/{reference_id}",
                get(handlers::get_api_user_details::<A>),
            )
            .route("/get-auth-token", post(handlers::get_auth_token::<A>))
            .route(
                "/create-oauth2-token",
                post(handlers::create_oauth2_token::<A>),
            )
            .route(
                "/get-account-balance",
                get(handlers::get_account_balance::<A>),
            )
            .route("/request-to-pay", post(handlers::request_to_pay::<A>))
            .route(
                "/payment-status/{reference_id}",
                get(handlers::get_payment_status::<A>),
            )
            .with_state(self.state.clone())
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
