//! Error types for Lodestone

use std::fmt;

#[derive(Debug)]
pub enum LodestoneError {
    InvalidUri(at_uri_parser::AtUriError),
    Identity(atproto_identity::IdentityError),
    Xrpc(atproto_repo_client::RepoClientError),
    Io(Box<std::io::Error>),
    Config(String),
}

impl fmt::Display for LodestoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LodestoneError::InvalidUri(err) => write!(f, "Invalid AT-URI: {}", err),
            LodestoneError::Identity(err) => write!(f, "Identity error: {}", err),
            LodestoneError::Xrpc(err) => write!(f, "{}", err),
            LodestoneError::Io(err) => write!(f, "IO error: {}", err),
            LodestoneError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for LodestoneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LodestoneError::InvalidUri(err) => Some(err),
            LodestoneError::Identity(err) => Some(err),
            LodestoneError::Xrpc(err) => Some(err),
            LodestoneError::Io(err) => Some(err.as_ref()),
            LodestoneError::Config(_) => None,
        }
    }
}

impl From<at_uri_parser::AtUriError> for LodestoneError {
    fn from(err: at_uri_parser::AtUriError) -> Self {
        LodestoneError::InvalidUri(err)
    }
}

impl From<atproto_identity::IdentityError> for LodestoneError {
    fn from(err: atproto_identity::IdentityError) -> Self {
        LodestoneError::Identity(err)
    }
}

impl From<atproto_repo_client::RepoClientError> for LodestoneError {
    fn from(err: atproto_repo_client::RepoClientError) -> Self {
        LodestoneError::Xrpc(err)
    }
}

impl From<std::io::Error> for LodestoneError {
    fn from(err: std::io::Error) -> Self {
        LodestoneError::Io(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for LodestoneError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        LodestoneError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LodestoneError>;
