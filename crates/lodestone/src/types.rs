//! Response types for the HTTP boundary

use serde::{Deserialize, Serialize};
use ttl_lru_cache::CacheStats;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub did_cache: CacheStats,
    pub xrpc_cache: CacheStats,
}
