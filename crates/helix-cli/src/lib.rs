//! Helix command-line front end.
//!
//! Stands in for the block-validation and gossip layers: it feeds counters,
//! digests and node ids into the Helix crates and prints their outputs as
//! JSON, one document per invocation.

mod commands;
mod config;
mod error;

pub use commands::{usage, Command};
pub use config::{CliConfig, DEFAULT_GENESIS_TIME, DEFAULT_LOG_FILTER};
pub use error::{Error, Result};
