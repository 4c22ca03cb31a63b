//! Print well-known verification artifacts.

use anyhow::{Context, Result};
use atpub_core::{
    document_link_tag, publication_file_body, Collection, RecordAddress, Tid,
};

/// Print the verification artifact for a record.
///
/// Without `--link`, prints the body of the well-known publication file.
/// With `--link`, prints the per-document `<link>` tag.
pub fn run(did: &str, rkey: &str, link: bool) -> Result<()> {
    let rkey: Tid = rkey
        .parse()
        .with_context(|| format!("invalid record key {rkey}"))?;

    if link {
        let addr = RecordAddress::new(did, Collection::Document, rkey);
        println!("{}", document_link_tag(&addr));
    } else {
        let addr = RecordAddress::new(did, Collection::Publication, rkey);
        println!("{}", publication_file_body(&addr));
    }
    Ok(())
}
