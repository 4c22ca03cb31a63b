//! Identity resolution: handle → DID → PDS service endpoint.

use crate::error::{PubError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Service id suffix that marks the PDS entry in a DID document.
const PDS_SERVICE_ID: &str = "#atproto_pds";

/// Service type of a PDS entry.
const PDS_SERVICE_TYPE: &str = "AtprotoPersonalDataServer";

/// A signed identity document resolved from a DID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    /// The DID this document describes.
    pub id: String,
    /// Alternate identifiers (handles as `at://` URIs).
    #[serde(default)]
    pub also_known_as: Vec<String>,
    /// Declared service endpoints.
    #[serde(default)]
    pub service: Vec<ServiceEntry>,
}

/// One service declaration inside a DID document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntry {
    /// Service id, e.g. `#atproto_pds`.
    pub id: String,
    /// Service type, e.g. `AtprotoPersonalDataServer`.
    #[serde(rename = "type")]
    pub service_type: String,
    /// Base URL of the service.
    pub service_endpoint: String,
}

impl DidDocument {
    /// Extracts the PDS service endpoint declared by this document.
    ///
    /// Matches the entry whose id ends with `#atproto_pds` and whose type
    /// is `AtprotoPersonalDataServer`.
    ///
    /// # Errors
    ///
    /// Returns `PubError::EndpointNotFound` when no matching entry exists.
    pub fn pds_endpoint(&self) -> Result<&str> {
        self.service
            .iter()
            .find(|s| s.id.ends_with(PDS_SERVICE_ID) && s.service_type == PDS_SERVICE_TYPE)
            .map(|s| s.service_endpoint.as_str())
            .ok_or_else(|| PubError::EndpointNotFound(self.id.clone()))
    }
}

/// Checks that a DID uses a resolution method this client understands.
///
/// Only `did:plc` and `did:web` are recognized.
pub fn check_did_method(did: &str) -> Result<()> {
    if did.starts_with("did:plc:") || did.starts_with("did:web:") {
        Ok(())
    } else {
        Err(PubError::UnsupportedDidMethod(did.to_string()))
    }
}

/// External identity directory, injected so login can be tested offline.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Resolves a handle (e.g. `example.com`) to its DID.
    async fn resolve_handle(&self, handle: &str) -> Result<String>;

    /// Fetches the DID document for a DID.
    async fn fetch_did_document(&self, did: &str) -> Result<DidDocument>;
}
