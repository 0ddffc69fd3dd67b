//! Error types for the repository client

use std::fmt;

#[derive(Debug)]
pub enum RepoClientError {
    Http(Box<reqwest::Error>),
}

impl fmt::Display for RepoClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoClientError::Http(err) => write!(f, "XRPC request failed: {}", err),
        }
    }
}

impl std::error::Error for RepoClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RepoClientError::Http(err) => Some(err.as_ref()),
        }
    }
}

impl From<reqwest::Error> for RepoClientError {
    fn from(err: reqwest::Error) -> Self {
        RepoClientError::Http(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, RepoClientError>;
