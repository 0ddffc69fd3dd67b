use std::env;
use std::time::Duration;

use atproto_identity::{IdentityConfig, DEFAULT_PLC_DIRECTORY_URL, DID_DOCUMENT_TTL};
use atproto_repo_client::CachePolicy;

use crate::error::{LodestoneError, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DID_CACHE_CAPACITY: usize = 4096;
const DEFAULT_XRPC_CACHE_CAPACITY: usize = 8192;

/// Service configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Deadline for every outbound request
    pub request_timeout: Duration,
    pub plc_directory_url: String,
    /// Scheme for handle and did:web lookups
    pub well_known_scheme: String,
    pub did_cache_capacity: usize,
    pub xrpc_cache_capacity: usize,
    pub did_document_ttl: Duration,
    pub cache_policy: CachePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            plc_directory_url: DEFAULT_PLC_DIRECTORY_URL.to_string(),
            well_known_scheme: "https".to_string(),
            did_cache_capacity: DEFAULT_DID_CACHE_CAPACITY,
            xrpc_cache_capacity: DEFAULT_XRPC_CACHE_CAPACITY,
            did_document_ttl: DID_DOCUMENT_TTL,
            cache_policy: CachePolicy::default(),
        }
    }
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Parse configuration from any key lookup; unparseable values fall back
    /// to defaults
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = var("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let request_timeout = var("REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let plc_directory_url = var("PLC_DIRECTORY_URL").unwrap_or(defaults.plc_directory_url);

        let did_cache_capacity = var("DID_CACHE_CAPACITY")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.did_cache_capacity);

        let xrpc_cache_capacity = var("XRPC_CACHE_CAPACITY")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.xrpc_cache_capacity);

        if did_cache_capacity == 0 {
            return Err(LodestoneError::Config(
                "DID_CACHE_CAPACITY must be positive".to_string(),
            ));
        }
        if xrpc_cache_capacity == 0 {
            return Err(LodestoneError::Config(
                "XRPC_CACHE_CAPACITY must be positive".to_string(),
            ));
        }

        Ok(Self {
            port,
            request_timeout,
            plc_directory_url,
            did_cache_capacity,
            xrpc_cache_capacity,
            ..defaults
        })
    }

    pub fn identity(&self) -> IdentityConfig {
        IdentityConfig {
            plc_directory_url: self.plc_directory_url.clone(),
            well_known_scheme: self.well_known_scheme.clone(),
            document_ttl: self.did_document_ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.plc_directory_url, "https://plc.directory");
        assert_eq!(config.well_known_scheme, "https");
        assert_eq!(config.did_cache_capacity, 4096);
        assert_eq!(config.xrpc_cache_capacity, 8192);
        assert_eq!(config.did_document_ttl, Duration::from_secs(12 * 60 * 60));
        assert_eq!(config.cache_policy, CachePolicy::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("PLC_DIRECTORY_URL", "https://plc.mirror.example"),
            ("DID_CACHE_CAPACITY", "10"),
            ("XRPC_CACHE_CAPACITY", "20"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.plc_directory_url, "https://plc.mirror.example");
        assert_eq!(config.did_cache_capacity, 10);
        assert_eq!(config.xrpc_cache_capacity, 20);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("DID_CACHE_CAPACITY", "-1")]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.did_cache_capacity, 4096);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = config_from(&[("XRPC_CACHE_CAPACITY", "0")]).unwrap_err();
        assert!(matches!(err, LodestoneError::Config(_)));
    }

    #[test]
    fn test_identity_config() {
        let config = config_from(&[("PLC_DIRECTORY_URL", "http://localhost:2582")]).unwrap();
        let identity = config.identity();
        assert_eq!(identity.plc_directory_url, "http://localhost:2582");
        assert_eq!(identity.document_ttl, config.did_document_ttl);
    }
}
