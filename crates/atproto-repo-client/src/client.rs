//! Cached XRPC calls against a PDS

use crate::error::Result;
use crate::types::{CachePolicy, RepoRequest};
use bytes::Bytes;
use reqwest::Client;
use tracing::debug;
use ttl_lru_cache::{CacheStats, LruCache};

/// HTTP client for repository reads, with a response cache keyed by URL
pub struct RepoClient {
    client: Client,
    cache: LruCache<String, Bytes>,
    policy: CachePolicy,
}

impl RepoClient {
    /// Create a client with the default cache policy
    pub fn new(client: Client, cache: LruCache<String, Bytes>) -> Self {
        Self::with_policy(client, cache, CachePolicy::default())
    }

    pub fn with_policy(
        client: Client,
        cache: LruCache<String, Bytes>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            client,
            cache,
            policy,
        }
    }

    /// Perform `request` against `pds_endpoint`, returning the raw body
    ///
    /// The body is passed through whatever the status, so PDS error payloads
    /// reach the caller. Only successful responses are cached.
    pub async fn fetch(&self, pds_endpoint: &str, request: RepoRequest<'_>) -> Result<Bytes> {
        let url = request.url(pds_endpoint);
        let ttl = request.ttl(&self.policy);

        if !ttl.is_zero() {
            if let Some(body) = self.cache.get(&url).await {
                debug!(url = %url, "XRPC cache hit");
                return Ok(body);
            }
        }

        debug!(url = %url, "Fetching from PDS");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            self.cache.put(url, body.clone(), ttl).await;
        } else {
            debug!(url = %url, status = %status, "PDS returned error status");
        }

        Ok(body)
    }

    pub async fn describe_repo(&self, pds_endpoint: &str, repo: &str) -> Result<Bytes> {
        self.fetch(pds_endpoint, RepoRequest::DescribeRepo { repo })
            .await
    }

    pub async fn list_records(
        &self,
        pds_endpoint: &str,
        repo: &str,
        collection: &str,
    ) -> Result<Bytes> {
        self.fetch(pds_endpoint, RepoRequest::ListRecords { repo, collection })
            .await
    }

    pub async fn get_record(
        &self,
        pds_endpoint: &str,
        repo: &str,
        collection: &str,
        rkey: &str,
    ) -> Result<Bytes> {
        self.fetch(
            pds_endpoint,
            RepoRequest::GetRecord {
                repo,
                collection,
                rkey,
            },
        )
        .await
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}
