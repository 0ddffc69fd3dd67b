//! Parser for AT Protocol URIs
//!
//! Parses URIs of the form `at://authority[/collection[/rkey]]` into their
//! component parts. The authority may be a DID or a handle.
//!
//! Parsing is deliberately loose: nothing is percent-decoded and neither the
//! NSID nor the record key is validated. Segments past the record key are
//! ignored, so `at://did:plc:x/coll/rkey/extra` parses the same as
//! `at://did:plc:x/coll/rkey`.

mod error;

pub use error::{AtUriError, Result};

const SCHEME: &str = "at://";

/// Parsed components of an AT Protocol URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtUri {
    pub authority: String,
    pub collection: Option<String>,
    pub rkey: Option<String>,
}

/// The authority segment, classified by form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority<'a> {
    Did(&'a str),
    Handle(&'a str),
}

/// How deep into a repository a URI points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// `at://authority`
    Repository,
    /// `at://authority/collection`
    Collection { collection: &'a str },
    /// `at://authority/collection/rkey`
    Record { collection: &'a str, rkey: &'a str },
}

impl AtUri {
    /// Parse an AT Protocol URI like "at://did:plc:xxx/collection/rkey"
    pub fn parse(uri: &str) -> Result<Self> {
        let rest = uri.strip_prefix(SCHEME).ok_or(AtUriError::MissingScheme)?;

        let mut segments = rest.split('/').map(non_empty);
        let authority = segments
            .next()
            .flatten()
            .ok_or(AtUriError::MissingAuthority)?;
        let collection = segments.next().flatten();
        // A record key without a collection cannot be addressed.
        let rkey = collection.and(segments.next().flatten());

        Ok(Self {
            authority: authority.to_string(),
            collection: collection.map(str::to_string),
            rkey: rkey.map(str::to_string),
        })
    }

    pub fn authority(&self) -> Authority<'_> {
        if self.authority.starts_with("did:") {
            Authority::Did(&self.authority)
        } else {
            Authority::Handle(&self.authority)
        }
    }

    pub fn target(&self) -> Target<'_> {
        match (self.collection.as_deref(), self.rkey.as_deref()) {
            (None, _) => Target::Repository,
            (Some(collection), None) => Target::Collection { collection },
            (Some(collection), Some(rkey)) => Target::Record { collection, rkey },
        }
    }
}

impl std::str::FromStr for AtUri {
    type Err = AtUriError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn non_empty(segment: &str) -> Option<&str> {
    (!segment.is_empty()).then_some(segment)
}
