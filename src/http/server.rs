//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build shared state (backends, audio proxy, upstream client, CORS policy)
//! - Create the Axum Router with a single catch-all handler
//! - Wire up request spans
//! - Dispatch each request through the routing state machine
//! - Record per-request metrics

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Method, Request},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::audio::AudioProxy;
use crate::backends::{forward::forward, BackendRegistry, BuildError};
use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::http::request::{ForwardedHeaders, QueryParams};
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::{metrics, tracing::make_request_span};
use crate::routing::{classify, RouteDecision};
use crate::security::{preflight_response, CorsPolicy};
use crate::upstream::UpstreamClient;

/// Errors constructing the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid backend configuration: {0}")]
    Build(#[from] BuildError),

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub backends: Arc<BackendRegistry>,
    pub audio: Arc<AudioProxy>,
    pub client: UpstreamClient,
    pub cors: Arc<CorsPolicy>,
}

impl AppState {
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ServerError> {
        Ok(Self {
            backends: Arc::new(BackendRegistry::from_config(&config.backends)?),
            audio: Arc::new(AudioProxy::from_config(&config.audio, &config.upstream)?),
            client: UpstreamClient::new(&config.upstream)?,
            cors: Arc::new(CorsPolicy::default()),
        })
    }
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    /// Create a new gateway server with the given configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, ServerError> {
        let state = AppState::from_config(config)?;
        Ok(Self {
            router: Self::build_router(state),
        })
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(gateway_handler))
            .route("/{*path}", any(gateway_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
    }

    /// The router, for serving elsewhere or driving in-process.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until Ctrl-C or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: classify, dispatch, record.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let (parts, _) = request.into_parts();
    let query = QueryParams::from_uri(&parts.uri);
    let decision = classify(&parts.method, &query);
    let route = decision.label();

    let response = match dispatch(&state, decision, &parts.method, &parts.headers, &query).await {
        Ok(response) => response,
        Err(e) => {
            match &e {
                GatewayError::Upstream(_) | GatewayError::UpstreamDiagnostic { .. } => {
                    metrics::record_upstream_error(route);
                }
                _ => tracing::warn!(route, error = %e, "Request rejected"),
            }
            e.into_response()
        }
    };

    metrics::record_request(route, response.status().as_u16(), start);
    response
}

async fn dispatch(
    state: &AppState,
    decision: RouteDecision<'_>,
    method: &Method,
    headers: &HeaderMap,
    query: &QueryParams,
) -> GatewayResult<Response> {
    match decision {
        RouteDecision::Preflight => Ok(preflight_response()),
        RouteDecision::MethodNotAllowed => Err(GatewayError::MethodNotAllowed),
        RouteDecision::Audio { target } => {
            let forwarded = ForwardedHeaders::from_headers(headers);
            state
                .audio
                .proxy(target, method, &forwarded, &state.cors)
                .await
        }
        RouteDecision::Api { selector } => {
            let forwarded = ForwardedHeaders::from_headers(headers);
            let backend = state.backends.select(selector);
            forward(backend.as_ref(), query, &forwarded, &state.client, &state.cors).await
        }
    }
}
