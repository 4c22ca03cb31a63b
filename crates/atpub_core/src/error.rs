//! Error types for atpub_core operations.

use thiserror::Error;

/// Core error type for atpub_core operations.
#[derive(Error, Debug)]
pub enum PubError {
    /// A required input field is missing or malformed.
    ///
    /// Detected before any network call; never worth retrying.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The identifier could not be resolved to a stable DID.
    #[error("identity resolution failed for {identifier}: {reason}")]
    IdentityResolution {
        /// The handle or DID that failed to resolve.
        identifier: String,
        /// Description of the failure.
        reason: String,
    },

    /// The DID uses a resolution method this client does not recognize.
    #[error("unsupported DID method: {0} (only did:plc and did:web are supported)")]
    UnsupportedDidMethod(String),

    /// The DID document declares no usable PDS service endpoint.
    #[error("no atproto_pds service endpoint in DID document for {0}")]
    EndpointNotFound(String),

    /// Credentials rejected by the remote service.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// A record operation was attempted before a successful login.
    #[error("not authenticated: call login() before record operations")]
    NotAuthenticated,

    /// The remote service rejected a record payload.
    ///
    /// Carries the remote's own validation message. Not retried.
    #[error("remote rejected record: {0}")]
    RemoteRejected(String),

    /// Network-level failure during a thread or search fetch.
    ///
    /// The thread aggregator catches these internally and degrades to an
    /// empty partial result; they only escape through collaborator traits.
    #[error("fetch failed: {0}")]
    TransientFetch(String),

    /// A string is not a valid 13-character TID.
    #[error("invalid TID: {0}")]
    InvalidTid(String),

    /// A string is not a valid at:// record address.
    #[error("invalid record address: {0}")]
    InvalidAddress(String),

    /// Record encode/decode failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience Result type for atpub_core operations.
pub type Result<T> = std::result::Result<T, PubError>;
