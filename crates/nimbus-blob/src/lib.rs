//! Blob store adapters for Nimbus.
//!
//! `HttpBlobStore` talks to the hosted store's write API and public read
//! address; `MemoryBlobStore` backs tests and local runs.

pub mod http;
pub mod memory;

pub use http::HttpBlobStore;
pub use memory::MemoryBlobStore;
