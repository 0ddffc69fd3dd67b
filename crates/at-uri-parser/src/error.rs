//! Error types for AT-URI parsing

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtUriError {
    /// The input does not start with `at://`
    MissingScheme,
    /// Nothing follows the scheme
    MissingAuthority,
}

impl fmt::Display for AtUriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtUriError::MissingScheme => write!(f, "URI must start with at://"),
            AtUriError::MissingAuthority => write!(f, "URI is missing an authority"),
        }
    }
}

impl std::error::Error for AtUriError {}

pub type Result<T> = std::result::Result<T, AtUriError>;
