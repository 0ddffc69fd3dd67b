//! XRPC request shapes and cache policy

use std::time::Duration;

/// How long each kind of response may be served from cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub describe_repo: Duration,
    /// Zero disables caching for listings
    pub list_records: Duration,
    pub get_record: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            describe_repo: Duration::from_secs(30 * 60), // 30 minutes
            list_records: Duration::ZERO,
            get_record: Duration::from_secs(2 * 60), // 2 minutes
        }
    }
}

/// A read against a repository on its PDS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoRequest<'a> {
    DescribeRepo {
        repo: &'a str,
    },
    ListRecords {
        repo: &'a str,
        collection: &'a str,
    },
    GetRecord {
        repo: &'a str,
        collection: &'a str,
        rkey: &'a str,
    },
}

impl RepoRequest<'_> {
    pub fn nsid(&self) -> &'static str {
        match self {
            RepoRequest::DescribeRepo { .. } => "com.atproto.repo.describeRepo",
            RepoRequest::ListRecords { .. } => "com.atproto.repo.listRecords",
            RepoRequest::GetRecord { .. } => "com.atproto.repo.getRecord",
        }
    }

    /// Full request URL; doubles as the cache key
    pub fn url(&self, pds_endpoint: &str) -> String {
        let query = match *self {
            RepoRequest::DescribeRepo { repo } => format!("repo={}", urlencoding::encode(repo)),
            RepoRequest::ListRecords { repo, collection } => format!(
                "repo={}&collection={}",
                urlencoding::encode(repo),
                urlencoding::encode(collection)
            ),
            RepoRequest::GetRecord {
                repo,
                collection,
                rkey,
            } => format!(
                "repo={}&collection={}&rkey={}",
                urlencoding::encode(repo),
                urlencoding::encode(collection),
                urlencoding::encode(rkey)
            ),
        };

        format!(
            "{}/xrpc/{}?{}",
            pds_endpoint.trim_end_matches('/'),
            self.nsid(),
            query
        )
    }

    pub fn ttl(&self, policy: &CachePolicy) -> Duration {
        match self {
            RepoRequest::DescribeRepo { .. } => policy.describe_repo,
            RepoRequest::ListRecords { .. } => policy.list_records,
            RepoRequest::GetRecord { .. } => policy.get_record,
        }
    }
}
