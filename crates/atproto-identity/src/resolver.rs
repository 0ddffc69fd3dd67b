use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use ttl_lru_cache::{CacheStats, LruCache};

use crate::error::{IdentityError, Result};
use crate::types::{DidDocument, DidMethod};

pub const DEFAULT_PLC_DIRECTORY_URL: &str = "https://plc.directory";
pub const DID_DOCUMENT_TTL: Duration = Duration::from_secs(12 * 60 * 60); // 12 hours

/// Where identity lookups are sent
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL of the PLC directory
    pub plc_directory_url: String,
    /// Scheme for handle and did:web well-known lookups ("http" only makes
    /// sense against a local development host)
    pub well_known_scheme: String,
    pub document_ttl: Duration,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            plc_directory_url: DEFAULT_PLC_DIRECTORY_URL.to_string(),
            well_known_scheme: "https".to_string(),
            document_ttl: DID_DOCUMENT_TTL,
        }
    }
}

/// Resolves handles to DIDs and DIDs to documents
pub struct IdentityResolver {
    client: Client,
    config: IdentityConfig,
    /// Raw DID document bodies keyed by DID
    did_cache: LruCache<String, Bytes>,
}

impl IdentityResolver {
    /// Create a resolver against the public PLC directory
    pub fn new(client: Client, did_cache: LruCache<String, Bytes>) -> Self {
        Self::with_config(client, did_cache, IdentityConfig::default())
    }

    pub fn with_config(
        client: Client,
        did_cache: LruCache<String, Bytes>,
        config: IdentityConfig,
    ) -> Self {
        Self {
            client,
            config,
            did_cache,
        }
    }

    /// Resolve a handle to a DID through `/.well-known/atproto-did`
    ///
    /// There is no DNS TXT fallback and the mapping is not cached.
    pub async fn resolve_handle(&self, handle: &str) -> Result<String> {
        let url = format!(
            "{}://{}/.well-known/atproto-did",
            self.config.well_known_scheme, handle
        );
        debug!(handle, url = %url, "Resolving handle");

        let response = self.client.get(&url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(IdentityError::HandleResolution(format!(
                "{} returned status {}",
                handle,
                response.status()
            )));
        }

        let body = response.text().await?;
        let did = body.trim();
        if !did.starts_with("did:") || did.contains(char::is_whitespace) {
            return Err(IdentityError::HandleResolution(format!(
                "{} did not return a DID",
                handle
            )));
        }

        debug!(handle, did, "Resolved handle");
        Ok(did.to_string())
    }

    /// Resolve a DID to its document, using the DID cache when possible
    pub async fn resolve_did(&self, did: &str) -> Result<DidDocument> {
        if let Some(raw) = self.did_cache.get(did).await {
            match serde_json::from_slice::<DidDocument>(&raw) {
                Ok(doc) => {
                    debug!(did, "DID document cache hit");
                    return Ok(doc);
                }
                Err(e) => warn!(did, error = %e, "Discarding undecodable cached DID document"),
            }
        }

        let url = self.document_url(did)?;
        debug!(did, url = %url, "Fetching DID document");

        let response = self.client.get(&url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(IdentityError::DidResolution(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }

        let raw = response.bytes().await?;
        let doc: DidDocument = serde_json::from_slice(&raw)?;

        self.did_cache
            .put(did.to_string(), raw, self.config.document_ttl)
            .await;

        Ok(doc)
    }

    /// Resolve a DID all the way to its PDS endpoint
    pub async fn resolve_pds_endpoint(&self, did: &str) -> Result<String> {
        let doc = self.resolve_did(did).await?;
        doc.pds_endpoint()
            .map(str::to_string)
            .ok_or_else(|| IdentityError::NoPdsEndpoint(did.to_string()))
    }

    pub async fn did_cache_stats(&self) -> CacheStats {
        self.did_cache.stats().await
    }

    /// URL of the DID document for `did`
    fn document_url(&self, did: &str) -> Result<String> {
        let url = match DidMethod::parse(did)? {
            DidMethod::Plc => format!(
                "{}/{}",
                self.config.plc_directory_url.trim_end_matches('/'),
                did
            ),
            DidMethod::Web { domain } => format!(
                "{}://{}/.well-known/did.json",
                self.config.well_known_scheme,
                domain.replace("%3A", ":")
            ),
        };
        Ok(url)
    }
}
