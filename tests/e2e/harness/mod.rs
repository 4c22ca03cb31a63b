//! E2E test harness: in-memory fakes for the remote collaborators.
//!
//! Some builder methods are unused by the current scenarios and kept for
//! the ones still to be written.

#![allow(dead_code)]


pub use fakes::{FakeDirectory, FakePds};
pub use feed::{post, reply, thread, FakeFeed};

use atpub_core::Publisher;

/// Endpoint every fake account is served from.
pub const TEST_ENDPOINT: &str = "https://pds.test";

/// Builds a publisher over a directory and PDS pre-provisioned with one
/// account: handle `alice.test`, DID `did:plc:alice`, password `hunter2`.
pub fn alice_publisher() -> Publisher<FakeDirectory, FakePds> {
    let directory = FakeDirectory::new().with_account("alice.test", "did:plc:alice", TEST_ENDPOINT);
    let pds = FakePds::new().with_account("alice.test", "did:plc:alice", "hunter2");
    Publisher::new(directory, pds)
}
