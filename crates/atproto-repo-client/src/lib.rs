//! AT Protocol Repository Client
//!
//! Issues the read-only `com.atproto.repo` XRPC calls (describeRepo,
//! listRecords, getRecord) against a PDS. Responses are cached by full
//! request URL with a per-endpoint TTL; listRecords is never cached.

pub mod client;
pub mod error;
pub mod types;

pub use client::RepoClient;
pub use error::{RepoClientError, Result};
pub use types::{CachePolicy, RepoRequest};
