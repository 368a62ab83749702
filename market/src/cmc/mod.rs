//! CoinMarketCap-style coin price provider.
//!
//! Wire shapes: every endpoint wraps its payload in a `data` envelope,
//! and per-coin quotes come as a map keyed by currency code. We only
//! ever request the USD quote and convert locally.

pub mod client;
pub mod types;

pub use client::CmcClient;
