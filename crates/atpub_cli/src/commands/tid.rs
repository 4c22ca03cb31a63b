//! Generate fresh timestamp identifiers.

use anyhow::Result;
use atpub_core::Tid;

/// Print `count` freshly generated TIDs, one per line.
pub fn run(count: usize) -> Result<()> {
    for _ in 0..count {
        println!("{}", Tid::now());
    }
    Ok(())
}
