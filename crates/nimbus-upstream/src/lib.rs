//! Upstream forecast provider client.

pub mod client;

pub use client::ForecastClient;
