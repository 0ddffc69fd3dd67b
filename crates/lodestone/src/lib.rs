//! Lodestone - AT-URI resolver
//!
//! Resolves `at://` URIs to the record, collection listing or repository
//! description they name, by way of the authority's DID document and PDS.

pub mod config;
pub mod error;
pub mod resolver;
pub mod server;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::{LodestoneError, Result};
pub use resolver::{Resolver, EMPTY_RESULT};
pub use server::{create_router, start_server, ServerState, SharedState};
