//! E2E test entry point.

mod harness;
mod scenarios;
