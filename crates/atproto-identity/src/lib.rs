//! AT Protocol Identity Resolver
//!
//! Resolves handles to DIDs through the `/.well-known/atproto-did` lookup,
//! resolves DIDs to their documents (`did:plc` via the PLC directory,
//! `did:web` via `/.well-known/did.json`) and locates the PDS endpoint in a
//! document. Raw DID documents are kept in a bounded TTL cache.

mod error;
mod resolver;
mod types;

pub use error::{IdentityError, Result};
pub use resolver::{IdentityConfig, IdentityResolver, DEFAULT_PLC_DIRECTORY_URL, DID_DOCUMENT_TTL};
pub use types::{DidDocument, DidMethod, DidService, PDS_SERVICE_ID_SUFFIX, PDS_SERVICE_TYPE};
