//! Application startup and lifecycle management.
//!
//! Builds the router (API routes plus the static-asset fallback), binds the
//! listener, and runs the server until shutdown.

use crate::config::CompetitionsConfig;
use crate::handlers::list_competitions;
use crate::services::providers::TextProvider;
use crate::services::providers::workers_ai::{WorkersAiConfig, WorkersAiTextProvider};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{any, get};
use axum::Router;
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, security_headers_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: CompetitionsConfig,
    pub text_provider: Arc<dyn TextProvider>,
}

/// Catch-all for `/api/` paths with no handler.
async fn api_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Build the full router: the competitions endpoint, a 404 catch-all under
/// `/api/`, and the static frontend for everything else. Non-GET methods on
/// the competitions route get axum's automatic 405.
pub fn router(state: AppState) -> Router {
    let assets =
        ServeDir::new(&state.config.assets.dir).append_index_html_on_directories(true);

    Router::new()
        .route("/api/competitions", get(list_competitions))
        .route("/api/*rest", any(api_not_found))
        .fallback_service(assets)
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration and the real
    /// Workers AI provider.
    pub async fn build(config: CompetitionsConfig) -> Result<Self, AppError> {
        let provider_config = WorkersAiConfig {
            account_id: config.cloudflare.account_id.clone(),
            api_token: config.cloudflare.api_token.clone(),
            model: config.models.text_model.clone(),
        };
        let text_provider: Arc<dyn TextProvider> =
            Arc::new(WorkersAiTextProvider::new(provider_config));

        tracing::info!(
            model = %config.models.text_model,
            "Initialized Workers AI text provider"
        );

        Self::with_provider(config, text_provider).await
    }

    /// Build the application with an injected provider. Used by tests to run
    /// against the mock.
    pub async fn with_provider(
        config: CompetitionsConfig,
        text_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        // Bind listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port = port,
            assets_dir = %config.assets.dir,
            "Competitions service bound"
        );

        let state = AppState {
            config,
            text_provider,
        };

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let app = router(self.state);
        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
