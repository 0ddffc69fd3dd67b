//! The resolution pipeline: AT-URI -> DID -> DID document -> PDS -> XRPC

use std::sync::Arc;

use at_uri_parser::{AtUri, Authority, Target};
use atproto_identity::IdentityResolver;
use atproto_repo_client::{RepoClient, RepoRequest};
use bytes::Bytes;
use futures::future::join_all;
use reqwest::Client;
use tracing::{debug, error, warn};
use ttl_lru_cache::{CacheStats, LruCache};

use crate::config::Config;
use crate::error::{LodestoneError, Result};

/// Payload emitted for any URI that fails to resolve
pub const EMPTY_RESULT: Bytes = Bytes::from_static(b"{}");

/// Owns both caches and every upstream client
pub struct Resolver {
    identity: IdentityResolver,
    repo: RepoClient,
}

impl Resolver {
    pub fn new(identity: IdentityResolver, repo: RepoClient) -> Self {
        Self { identity, repo }
    }

    /// Build the pipeline with fresh caches sized by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| LodestoneError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let identity = IdentityResolver::with_config(
            client.clone(),
            LruCache::new(config.did_cache_capacity),
            config.identity(),
        );
        let repo = RepoClient::with_policy(
            client,
            LruCache::new(config.xrpc_cache_capacity),
            config.cache_policy,
        );

        Ok(Self::new(identity, repo))
    }

    /// Resolve one AT-URI to the raw body returned by its PDS
    pub async fn resolve(&self, uri: &str) -> Result<Bytes> {
        let uri = AtUri::parse(uri)?;

        let did = match uri.authority() {
            Authority::Did(did) => did.to_string(),
            Authority::Handle(handle) => self.identity.resolve_handle(handle).await?,
        };

        let pds_endpoint = self.identity.resolve_pds_endpoint(&did).await?;
        debug!(did = %did, pds = %pds_endpoint, "Resolved PDS endpoint");

        let request = match uri.target() {
            Target::Repository => RepoRequest::DescribeRepo { repo: &did },
            Target::Collection { collection } => RepoRequest::ListRecords {
                repo: &did,
                collection,
            },
            Target::Record { collection, rkey } => RepoRequest::GetRecord {
                repo: &did,
                collection,
                rkey,
            },
        };

        Ok(self.repo.fetch(&pds_endpoint, request).await?)
    }

    /// Resolve every URI concurrently
    ///
    /// Returns once all lookups have finished. `result[i]` belongs to
    /// `uris[i]`; a URI that fails at any stage yields [`EMPTY_RESULT`].
    pub async fn resolve_batch(self: &Arc<Self>, uris: &[String]) -> Vec<Bytes> {
        let tasks: Vec<_> = uris
            .iter()
            .cloned()
            .map(|uri| {
                let resolver = Arc::clone(self);
                tokio::spawn(async move {
                    match resolver.resolve(&uri).await {
                        Ok(body) => body,
                        Err(e) => {
                            warn!(uri = %uri, error = %e, "Failed to resolve AT-URI");
                            EMPTY_RESULT
                        }
                    }
                })
            })
            .collect();

        let mut results = vec![EMPTY_RESULT; uris.len()];
        for (slot, joined) in results.iter_mut().zip(join_all(tasks).await) {
            match joined {
                Ok(body) => *slot = body,
                Err(e) => error!(error = %e, "Resolution task aborted"),
            }
        }
        results
    }

    pub async fn did_cache_stats(&self) -> CacheStats {
        self.identity.did_cache_stats().await
    }

    pub async fn xrpc_cache_stats(&self) -> CacheStats {
        self.repo.cache_stats().await
    }
}
