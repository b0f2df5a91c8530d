//! Form endpoint for interactive research.
//!
//! ## Endpoints
//!
//! - `GET /`: render the empty form
//! - `POST /`: form field `query`; runs the pipeline synchronously and
//!   re-renders the form with the summary
//! - `GET /health`: liveness probe, returns `ok`
//!
//! No JSON API, no authentication, no rate limiting.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Form, State};
use axum::response::Html;
use axum::routing::get;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{ResearchError, Result};
use crate::render::render_page;
use crate::research::ResearchService;

/// Shared state for axum handlers.
#[derive(Clone)]
struct AppState {
    service: Arc<dyn ResearchService>,
}

/// Body of a `POST /` submission.
#[derive(Debug, Deserialize)]
pub struct QueryForm {
    /// The research query; missing is treated as blank.
    #[serde(default)]
    pub query: String,
}

/// Build the router without binding a socket.
pub fn router(service: Arc<dyn ResearchService>) -> Router {
    Router::new()
        .route("/", get(handle_index).post(handle_submit))
        .route("/health", get(handle_health))
        .with_state(AppState { service })
}

/// The running form endpoint.
pub struct ResearchServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ResearchServer {
    /// Start serving in a background tokio task.
    ///
    /// Binds to `{config.host}:{config.port}` (use port `0` for auto-assign).
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Server`] if the TCP listener cannot bind.
    pub async fn start(service: Arc<dyn ResearchService>, config: &ServerConfig) -> Result<Self> {
        let app = router(service);

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| ResearchError::Server(format!("bind {bind_addr} failed: {e}")))?;

        let addr = listener
            .local_addr()
            .map_err(|e| ResearchError::Server(format!("failed to get local addr: {e}")))?;

        info!("research form listening on http://{addr}/");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("research server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the base URL, e.g. `http://127.0.0.1:5000`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for ResearchServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// `GET /`: the empty form.
async fn handle_index() -> Html<String> {
    Html(render_page(None, ""))
}

/// `POST /`: run the pipeline and render the summary.
async fn handle_submit(State(state): State<AppState>, Form(form): Form<QueryForm>) -> Html<String> {
    let summary = state.service.research(&form.query).await;
    Html(render_page(Some(&form.query), &summary))
}

/// `GET /health`: liveness.
async fn handle_health() -> &'static str {
    "ok"
}
