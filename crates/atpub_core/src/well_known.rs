//! Verification artifacts served from the published site.
//!
//! Two human-facing strings tie a site back to its repository: a plain-text
//! file at a well-known path whose entire body is the publication record's
//! address, and a `<link>` tag embedded in each document's HTML. Both are
//! pure formatting over a [`RecordAddress`].

use crate::address::{Collection, RecordAddress};

/// The well-known path the publication verification file is served from.
pub const WELL_KNOWN_PATH: &str = "/.well-known/site.standard.publication";

/// Formats the body of the well-known publication verification file.
///
/// The file content is exactly the at:// address string, nothing else.
/// Byte-identical output for identical inputs.
pub fn publication_file_body(address: &RecordAddress) -> String {
    debug_assert_eq!(address.collection, Collection::Publication);
    address.to_string()
}

/// Formats the per-document verification `<link>` tag.
pub fn document_link_tag(address: &RecordAddress) -> String {
    format!(
        "<link rel=\"{}\" href=\"{}\">",
        Collection::Document.nsid(),
        address
    )
}
