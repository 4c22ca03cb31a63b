//! The remote repository service, as the narrow interface the core needs.
//!
//! A concrete implementation speaks XRPC to a PDS over HTTP; tests inject
//! in-memory fakes. The core never constructs network clients itself.

use crate::address::Collection;
use crate::error::Result;
use crate::tid::Tid;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// An authenticated repository session returned by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSession {
    /// DID of the authenticated account.
    pub did: String,
    /// Bearer token for subsequent calls.
    pub access_jwt: String,
}

/// Reference to a written record: its address and server-assigned CID.
///
/// CIDs are opaque here; the core never computes content hashes locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRef {
    /// at:// URI of the record.
    pub uri: String,
    /// Content hash assigned by the service on write.
    pub cid: String,
}

/// One record as returned by a list call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedRecord {
    /// at:// URI of the record.
    pub uri: String,
    /// Content hash assigned by the service.
    pub cid: String,
    /// The stored record value.
    pub value: serde_json::Value,
}

/// Remote repository service capability.
///
/// All write operations require a [`RepoSession`]; listing is a public
/// read. The service defines the ordering of list results (typically
/// reverse-chronological by write) and applies the limit itself.
#[async_trait]
pub trait RepoService: Send + Sync {
    /// Performs the authentication handshake against a PDS endpoint.
    async fn create_session(
        &self,
        endpoint: &str,
        identifier: &str,
        secret: &str,
    ) -> Result<RepoSession>;

    /// Creates a record under a fresh key.
    async fn create_record(
        &self,
        endpoint: &str,
        session: &RepoSession,
        repo: &str,
        collection: Collection,
        rkey: &Tid,
        value: serde_json::Value,
    ) -> Result<RecordRef>;

    /// Replaces a record at an existing key (full overwrite).
    async fn put_record(
        &self,
        endpoint: &str,
        session: &RepoSession,
        repo: &str,
        collection: Collection,
        rkey: &Tid,
        value: serde_json::Value,
    ) -> Result<RecordRef>;

    /// Deletes a record.
    async fn delete_record(
        &self,
        endpoint: &str,
        session: &RepoSession,
        repo: &str,
        collection: Collection,
        rkey: &Tid,
    ) -> Result<()>;

    /// Lists records in a collection, in service-defined order.
    async fn list_records(
        &self,
        endpoint: &str,
        repo: &str,
        collection: Collection,
        limit: usize,
    ) -> Result<Vec<ListedRecord>>;
}
