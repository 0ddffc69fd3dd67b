//! Error types for identity resolution

use std::fmt;

#[derive(Debug)]
pub enum IdentityError {
    /// Transport failure talking to an identity host
    Http(Box<reqwest::Error>),
    /// The handle's well-known lookup did not yield a DID
    HandleResolution(String),
    /// DID method other than `plc` or `web`
    UnsupportedDidMethod(String),
    /// Non-success status from the DID host
    DidResolution(String),
    /// The DID document did not decode
    Json(serde_json::Error),
    /// The DID document lists no PDS service
    NoPdsEndpoint(String),
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::Http(err) => write!(f, "HTTP error: {}", err),
            IdentityError::HandleResolution(msg) => {
                write!(f, "Handle resolution error: {}", msg)
            }
            IdentityError::UnsupportedDidMethod(did) => {
                write!(f, "Unsupported DID method: {}", did)
            }
            IdentityError::DidResolution(msg) => write!(f, "DID resolution error: {}", msg),
            IdentityError::Json(err) => write!(f, "Invalid DID document: {}", err),
            IdentityError::NoPdsEndpoint(did) => {
                write!(f, "No PDS endpoint found in DID document for {}", did)
            }
        }
    }
}

impl std::error::Error for IdentityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IdentityError::Http(err) => Some(err.as_ref()),
            IdentityError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for IdentityError {
    fn from(err: reqwest::Error) -> Self {
        IdentityError::Http(Box::new(err))
    }
}

impl From<serde_json::Error> for IdentityError {
    fn from(err: serde_json::Error) -> Self {
        IdentityError::Json(err)
    }
}

pub type Result<T> = std::result::Result<T, IdentityError>;
