//! HTTP server for the resolver
//!
//! Provides /health and /resolve. `/resolve?uri=<at-uri>` answers with the
//! single payload; `/resolve?uris=<a>&uris=<b>` answers with a JSON array in
//! request order.

use crate::resolver::{Resolver, EMPTY_RESULT};
use crate::types::HealthResponse;
use axum::{
    extract::{RawQuery, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

/// Shared state for the HTTP server
pub struct ServerState {
    pub resolver: Arc<Resolver>,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/resolve", get(resolve))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds() as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
        did_cache: state.resolver.did_cache_stats().await,
        xrpc_cache: state.resolver.xrpc_cache_stats().await,
    })
}

/// URIs requested through `uri` and `uris`
#[derive(Debug, PartialEq, Eq)]
struct ResolveQuery {
    uris: Vec<String>,
    /// Answer with a bare object rather than an array
    single: bool,
}

impl ResolveQuery {
    fn parse(query: Option<&str>) -> Self {
        let mut uris = Vec::new();
        let mut uri = None;

        for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "uris" => uris.push(value.into_owned()),
                "uri" if uri.is_none() => uri = Some(value.into_owned()),
                _ => {}
            }
        }

        let uri = uri.filter(|u| !u.is_empty());
        let single = uri.is_some() && uris.is_empty();
        uris.extend(uri);

        Self { uris, single }
    }
}

/// Resolve one or more AT-URIs
async fn resolve(State(state): State<SharedState>, RawQuery(query): RawQuery) -> Response {
    let request = ResolveQuery::parse(query.as_deref());
    if request.uris.is_empty() {
        return (StatusCode::BAD_REQUEST, "missing uri or uris parameter").into_response();
    }

    debug!(count = request.uris.len(), "Resolving batch");
    let mut results = state.resolver.resolve_batch(&request.uris).await;

    let body = if request.single {
        results.swap_remove(0)
    } else {
        render_array(&results)
    };

    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Join raw payloads into a JSON array; anything that is not JSON becomes `{}`
fn render_array(payloads: &[Bytes]) -> Bytes {
    let mut body = Vec::with_capacity(payloads.iter().map(|p| p.len() + 1).sum::<usize>() + 2);
    body.push(b'[');
    for (i, payload) in payloads.iter().enumerate() {
        if i > 0 {
            body.push(b',');
        }
        if serde_json::from_slice::<IgnoredAny>(payload).is_ok() {
            body.extend_from_slice(payload);
        } else {
            body.extend_from_slice(&EMPTY_RESULT);
        }
    }
    body.push(b']');
    Bytes::from(body)
}
