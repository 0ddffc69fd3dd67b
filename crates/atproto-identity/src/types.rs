use serde::{Deserialize, Serialize};

use crate::error::{IdentityError, Result};

/// Service type advertised by a Personal Data Server
pub const PDS_SERVICE_TYPE: &str = "AtprotoPersonalDataServer";
/// Fragment that identifies the PDS service entry
pub const PDS_SERVICE_ID_SUFFIX: &str = "#atproto_pds";

/// DID methods this resolver knows how to dereference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DidMethod<'a> {
    /// `did:plc:<id>`, resolved through the PLC directory
    Plc,
    /// `did:web:<domain>`, resolved from the domain itself
    Web { domain: &'a str },
}

impl<'a> DidMethod<'a> {
    pub fn parse(did: &'a str) -> Result<Self> {
        if did.starts_with("did:plc:") {
            Ok(DidMethod::Plc)
        } else if let Some(domain) = did.strip_prefix("did:web:") {
            Ok(DidMethod::Web { domain })
        } else {
            Err(IdentityError::UnsupportedDidMethod(did.to_string()))
        }
    }
}

/// DID Document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    pub id: String,
    #[serde(default)]
    pub also_known_as: Vec<String>,
    #[serde(default)]
    pub service: Vec<DidService>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidService {
    pub id: String,
    pub r#type: String,
    pub service_endpoint: String,
}

impl DidService {
    fn is_pds(&self) -> bool {
        self.r#type == PDS_SERVICE_TYPE || self.id.ends_with(PDS_SERVICE_ID_SUFFIX)
    }
}

impl DidDocument {
    /// Endpoint of the first service that looks like a PDS
    pub fn pds_endpoint(&self) -> Option<&str> {
        self.service
            .iter()
            .find(|s| s.is_pds())
            .map(|s| s.service_endpoint.as_str())
    }
}
