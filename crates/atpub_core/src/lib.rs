//! atpub core library
//!
//! A thin integration layer between a static site and the AT Protocol:
//! - Sortable timestamp identifiers (TIDs) used as record keys
//! - Publish/update/list/delete lifecycle for document and publication
//!   records against a personal data server
//! - Comment aggregation from the federated social network, rebuilt into
//!   chronologically ordered reply trees
//! - Well-known verification artifacts tying a site to its repository
//!
//! Remote services (the PDS, the identity directory, the social read API)
//! are injected through async traits, so everything here runs against
//! in-memory fakes in tests.
//!
//! # Quick Start
//!
//! ```
//! use atpub_core::{Collection, RecordAddress, Tid};
//!
//! // Generate a record key and form its address.
//! let rkey = Tid::now();
//! let addr = RecordAddress::new("did:plc:abc123", Collection::Document, rkey);
//!
//! // Addresses round-trip through their string form.
//! let parsed: RecordAddress = addr.to_string().parse().unwrap();
//! assert_eq!(parsed, addr);
//! ```

mod address;
mod comments;
mod error;
mod identity;
mod publisher;
mod record;
mod repo;
mod tid;
mod well_known;

pub use address::{Collection, RecordAddress};
pub use comments::{
    build_tree, count_comments, fetch_comments, flatten_comments, Comment, CommentAuthor,
    FeedReader, FetchOptions, PostView, ThreadNode, PLATFORM_BLUESKY,
};
pub use error::{PubError, Result};
pub use identity::{check_did_method, DidDocument, IdentityDirectory, ServiceEntry};
pub use publisher::{ListedDocument, ListedPublication, Published, Publisher, Session};
pub use record::{DocumentInput, DocumentRecord, PublicationInput, PublicationRecord};
pub use repo::{ListedRecord, RecordRef, RepoService, RepoSession};
pub use tid::Tid;
pub use well_known::{document_link_tag, publication_file_body, WELL_KNOWN_PATH};
