//! Nimbus Core
//!
//! Domain types, configuration, the refresh gate and pipeline, and the
//! port traits implemented by the upstream and blob store adapters.
//! This crate has no HTTP framework dependency and defines the shared
//! vocabulary used across all other crates.

pub mod config;
pub mod error;
pub mod gate;
pub mod ports;
pub mod refresh;
pub mod snapshot;

pub use error::{Error, Result};
