//! CLI commands.

pub mod address;
pub mod tid;
pub mod well_known;
