//! An in-process stand-in for the handle host, PLC directory and PDS

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use atproto_identity::{IdentityConfig, IdentityResolver, DID_DOCUMENT_TTL};
use atproto_repo_client::{CachePolicy, RepoClient};
use axum::{
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use reqwest::Client;
use serde_json::json;
use ttl_lru_cache::LruCache;

use crate::resolver::Resolver;

/// Nothing listens on the discard port
pub(crate) const UNREACHABLE_HANDLE: &str = "127.0.0.1:9";

#[derive(Default)]
pub(crate) struct Hits {
    pub handle: AtomicUsize,
    pub plc: AtomicUsize,
    pub describe_repo: AtomicUsize,
    pub list_records: AtomicUsize,
    pub get_record: AtomicUsize,
}

#[derive(Clone)]
struct Upstream {
    origin: String,
    hits: Arc<Hits>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl Upstream {
    fn count(&self, counter: &AtomicUsize, query: Option<String>) -> usize {
        self.queries.lock().unwrap().push(query.unwrap_or_default());
        counter.fetch_add(1, Ordering::SeqCst) + 1
    }
}

pub(crate) struct MockNetwork {
    pub addr: SocketAddr,
    pub hits: Arc<Hits>,
    origin: String,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockNetwork {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let upstream = Upstream {
            origin: format!("http://{}", addr),
            hits: Arc::default(),
            queries: Arc::default(),
        };

        let router = Router::new()
            .route("/.well-known/atproto-did", get(handle_did))
            .route("/{did}", get(plc_document))
            .route("/xrpc/com.atproto.repo.describeRepo", get(describe_repo))
            .route("/xrpc/com.atproto.repo.listRecords", get(list_records))
            .route("/xrpc/com.atproto.repo.getRecord", get(get_record))
            .with_state(upstream.clone());

        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        Self {
            addr,
            hits: upstream.hits,
            origin: upstream.origin,
            queries: upstream.queries,
        }
    }

    /// A handle served by this network; resolves to `did:plc:alice`
    pub fn handle(&self) -> String {
        self.addr.to_string()
    }

    pub fn resolver(&self) -> Resolver {
        self.resolver_with_policy(CachePolicy::default())
    }

    pub fn resolver_with_policy(&self, policy: CachePolicy) -> Resolver {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        let identity = IdentityResolver::with_config(
            client.clone(),
            LruCache::new(64),
            IdentityConfig {
                plc_directory_url: self.origin.clone(),
                well_known_scheme: "http".to_string(),
                document_ttl: DID_DOCUMENT_TTL,
            },
        );
        let repo = RepoClient::with_policy(client, LruCache::new(64), policy);
        Resolver::new(identity, repo)
    }

    /// Query string of the most recent XRPC call
    pub fn last_query(&self) -> String {
        self.queries
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default()
    }
}

fn pds_document(did: &str, endpoint: &str) -> serde_json::Value {
    json!({
        "id": did,
        "alsoKnownAs": ["at://alice.example"],
        "service": [
            {"id": "#atproto_pds", "type": "AtprotoPersonalDataServer", "serviceEndpoint": endpoint}
        ]
    })
}

async fn handle_did(State(upstream): State<Upstream>) -> &'static str {
    upstream.hits.handle.fetch_add(1, Ordering::SeqCst);
    "did:plc:alice\n"
}

async fn plc_document(State(upstream): State<Upstream>, Path(did): Path<String>) -> Response {
    upstream.hits.plc.fetch_add(1, Ordering::SeqCst);
    match did.as_str() {
        "did:plc:alice" => Json(pds_document(&did, &format!("{}/", upstream.origin))).into_response(),
        "did:plc:deadpds" => Json(pds_document(&did, "http://127.0.0.1:9")).into_response(),
        "did:plc:nopds" => Json(json!({"id": did, "service": []})).into_response(),
        _ => (StatusCode::NOT_FOUND, "DID not registered").into_response(),
    }
}

async fn describe_repo(
    State(upstream): State<Upstream>,
    Query(params): Query<HashMap<String, String>>,
    RawQuery(query): RawQuery,
) -> Json<serde_json::Value> {
    let call = upstream.count(&upstream.hits.describe_repo, query);
    Json(json!({
        "handle": "alice.example",
        "did": params.get("repo"),
        "collections": ["app.bsky.feed.post"],
        "handleIsCorrect": true,
        "call": call
    }))
}

async fn list_records(
    State(upstream): State<Upstream>,
    RawQuery(query): RawQuery,
) -> Json<serde_json::Value> {
    let call = upstream.count(&upstream.hits.list_records, query);
    Json(json!({"records": [], "cursor": call.to_string()}))
}

async fn get_record(
    State(upstream): State<Upstream>,
    Query(params): Query<HashMap<String, String>>,
    RawQuery(query): RawQuery,
) -> Json<serde_json::Value> {
    upstream.count(&upstream.hits.get_record, query);
    let field = |name: &str| params.get(name).cloned().unwrap_or_default();
    let collection = field("collection");
    Json(json!({
        "uri": format!("at://{}/{}/{}", field("repo"), collection, field("rkey")),
        "cid": "bafyreib2rxk3rh6kzwq3rdfnnbcdhxxbgjwuqvbhbkc7tw6ohfl4jdlyxu",
        "value": {"$type": collection, "text": "hello"}
    }))
}
