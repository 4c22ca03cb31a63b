//! Record publish lifecycle: login, create, update, delete, list.

use crate::address::{Collection, RecordAddress};
use crate::error::{PubError, Result};
use crate::identity::{check_did_method, IdentityDirectory};
use crate::record::{DocumentInput, DocumentRecord, PublicationInput, PublicationRecord};
use crate::repo::{RepoService, RepoSession};
use crate::tid::Tid;
use chrono::Utc;
use tracing::{debug, warn};

/// Ephemeral authenticated state held by a [`Publisher`].
///
/// Created by `login()`, torn down with the publisher. There is no logout
/// or refresh in scope.
#[derive(Debug, Clone)]
pub struct Session {
    did: String,
    endpoint: String,
    repo_session: RepoSession,
}

impl Session {
    /// DID of the authenticated repository.
    pub fn did(&self) -> &str {
        &self.did
    }

    /// Resolved PDS endpoint the session talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// A freshly written record: its address and server-assigned CID.
#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    /// Full at:// address of the record.
    pub address: RecordAddress,
    /// Content hash assigned by the service.
    pub cid: String,
}

/// A document retrieved by a list call.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedDocument {
    /// at:// URI of the record.
    pub uri: String,
    /// Content hash assigned by the service.
    pub cid: String,
    /// Decoded record payload.
    pub record: DocumentRecord,
}

/// A publication retrieved by a list call.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedPublication {
    /// at:// URI of the record.
    pub uri: String,
    /// Content hash assigned by the service.
    pub cid: String,
    /// Decoded record payload.
    pub record: PublicationRecord,
}

/// Manages the lifecycle of document and publication records for one
/// authenticated identity.
///
/// A Publisher starts unauthenticated; every record operation fails with
/// [`PubError::NotAuthenticated`] until `login()` succeeds. One instance
/// serves one identity for its lifetime and holds no internal locking --
/// it is not meant for concurrent use by multiple logical callers.
pub struct Publisher<D, R> {
    directory: D,
    repo: R,
    session: Option<Session>,
}

impl<D: IdentityDirectory, R: RepoService> Publisher<D, R> {
    /// Creates an unauthenticated publisher over the given collaborators.
    pub fn new(directory: D, repo: R) -> Self {
        Self {
            directory,
            repo,
            session: None,
        }
    }

    /// Returns true once `login()` has succeeded.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Returns the active session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Resolves the identifier, discovers the PDS endpoint, and performs
    /// the authentication handshake.
    ///
    /// The identifier may be a DID (`did:plc:...` or `did:web:...`) or a
    /// handle, which is first resolved through the identity directory.
    /// Logging in again replaces any existing session.
    pub async fn login(&mut self, identifier: &str, secret: &str) -> Result<()> {
        let did = if identifier.starts_with("did:") {
            check_did_method(identifier)?;
            identifier.to_string()
        } else {
            let did = self.directory.resolve_handle(identifier).await?;
            check_did_method(&did)?;
            did
        };

        let doc = self.directory.fetch_did_document(&did).await?;
        let endpoint = doc.pds_endpoint()?.to_string();

        let repo_session = self
            .repo
            .create_session(&endpoint, identifier, secret)
            .await?;

        debug!(did = %repo_session.did, %endpoint, "login complete");
        self.session = Some(Session {
            did: repo_session.did.clone(),
            endpoint,
            repo_session,
        });
        Ok(())
    }

    /// Publishes a new document under a freshly generated record key.
    pub async fn publish_document(&self, input: DocumentInput) -> Result<Published> {
        let session = self.require_session()?;
        let record = input.into_record()?;
        let rkey = Tid::now();

        let r = self
            .repo
            .create_record(
                &session.endpoint,
                &session.repo_session,
                &session.did,
                Collection::Document,
                &rkey,
                to_value(&record)?,
            )
            .await?;

        debug!(rkey = %rkey, cid = %r.cid, "published document");
        Ok(Published {
            address: RecordAddress::new(session.did.clone(), Collection::Document, rkey),
            cid: r.cid,
        })
    }

    /// Overwrites an existing document record in full.
    ///
    /// The key must be a valid TID obtained from a prior publish or list.
    /// When the caller leaves `updated_at` unset it defaults to now.
    pub async fn update_document(&self, rkey: &str, mut input: DocumentInput) -> Result<Published> {
        let session = self.require_session()?;
        let rkey: Tid = rkey.parse()?;
        if input.updated_at.is_none() {
            input.updated_at = Some(Utc::now());
        }
        let record = input.into_record()?;

        let r = self
            .repo
            .put_record(
                &session.endpoint,
                &session.repo_session,
                &session.did,
                Collection::Document,
                &rkey,
                to_value(&record)?,
            )
            .await?;

        debug!(rkey = %rkey, cid = %r.cid, "updated document");
        Ok(Published {
            address: RecordAddress::new(session.did.clone(), Collection::Document, rkey),
            cid: r.cid,
        })
    }

    /// Deletes a document record. Surfaces whatever the remote reports;
    /// deleting an already-deleted key is not detected locally.
    pub async fn delete_document(&self, rkey: &str) -> Result<()> {
        let session = self.require_session()?;
        let rkey: Tid = rkey.parse()?;

        self.repo
            .delete_record(
                &session.endpoint,
                &session.repo_session,
                &session.did,
                Collection::Document,
                &rkey,
            )
            .await?;

        debug!(rkey = %rkey, "deleted document");
        Ok(())
    }

    /// Publishes a new publication record under a fresh key.
    pub async fn publish_publication(&self, input: PublicationInput) -> Result<Published> {
        let session = self.require_session()?;
        let record = input.into_record()?;
        let rkey = Tid::now();

        let r = self
            .repo
            .create_record(
                &session.endpoint,
                &session.repo_session,
                &session.did,
                Collection::Publication,
                &rkey,
                to_value(&record)?,
            )
            .await?;

        debug!(rkey = %rkey, cid = %r.cid, "published publication");
        Ok(Published {
            address: RecordAddress::new(session.did.clone(), Collection::Publication, rkey),
            cid: r.cid,
        })
    }

    /// Lists document records in service-defined order.
    ///
    /// Entries whose stored value no longer decodes as a document are
    /// skipped with a warning rather than failing the listing.
    pub async fn list_documents(&self, limit: usize) -> Result<Vec<ListedDocument>> {
        let session = self.require_session()?;
        let listed = self
            .repo
            .list_records(&session.endpoint, &session.did, Collection::Document, limit)
            .await?;

        Ok(listed
            .into_iter()
            .filter_map(|r| match serde_json::from_value(r.value) {
                Ok(record) => Some(ListedDocument {
                    uri: r.uri,
                    cid: r.cid,
                    record,
                }),
                Err(e) => {
                    warn!(uri = %r.uri, error = %e, "skipping undecodable document record");
                    None
                }
            })
            .collect())
    }

    /// Lists publication records in service-defined order.
    pub async fn list_publications(&self, limit: usize) -> Result<Vec<ListedPublication>> {
        let session = self.require_session()?;
        let listed = self
            .repo
            .list_records(
                &session.endpoint,
                &session.did,
                Collection::Publication,
                limit,
            )
            .await?;

        Ok(listed
            .into_iter()
            .filter_map(|r| match serde_json::from_value(r.value) {
                Ok(record) => Some(ListedPublication {
                    uri: r.uri,
                    cid: r.cid,
                    record,
                }),
                Err(e) => {
                    warn!(uri = %r.uri, error = %e, "skipping undecodable publication record");
                    None
                }
            })
            .collect())
    }

    fn require_session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(PubError::NotAuthenticated)
    }
}

fn to_value<T: serde::Serialize>(record: &T) -> Result<serde_json::Value> {
    serde_json::to_value(record).map_err(|e| PubError::Serialization(e.to_string()))
}
