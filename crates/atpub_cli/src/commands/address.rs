//! Parse and format at:// record addresses.

use anyhow::{Context, Result};
use atpub_core::{Collection, RecordAddress, Tid};

/// Parse an at:// address and print its components.
pub fn parse(address: &str) -> Result<()> {
    let addr: RecordAddress = address
        .parse()
        .with_context(|| format!("failed to parse {address}"))?;

    println!("did:        {}", addr.did);
    println!("collection: {}", addr.collection);
    println!("rkey:       {}", addr.rkey);
    Ok(())
}

/// Format an address from its components and print it.
pub fn format(did: &str, collection: &str, rkey: &str) -> Result<()> {
    let collection: Collection = collection
        .parse()
        .with_context(|| format!("unknown collection {collection}"))?;
    let rkey: Tid = rkey
        .parse()
        .with_context(|| format!("invalid record key {rkey}"))?;

    println!("{}", RecordAddress::new(did, collection, rkey));
    Ok(())
}
