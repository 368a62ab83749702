//! Abstract feed contracts consumed by the session layer.
//!
//! The live REST clients ([`crate::cmc`], [`crate::fixer`]) implement
//! these traits; tests substitute in-memory mocks. Every fetch failure,
//! transport or decode, collapses into [`FeedError::Unavailable`]: the
//! coordinator treats them identically (log, keep previous state).

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{CoinId, CoinListing, CoinQuote, DatedPrice, FiatCurrency, RateObservation};

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("feed unavailable: {reason}")]
    Unavailable { reason: String },
}

impl FeedError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        FeedError::Unavailable {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        FeedError::Unavailable {
            reason: e.to_string(),
        }
    }
}

/// Coin-price provider contract.
#[async_trait]
pub trait CoinPriceFeed: Send + Sync + 'static {
    /// One-shot catalog of every coin the provider lists.
    async fn listed_coins(&self) -> Result<Vec<CoinListing>, FeedError>;

    /// One poll tick: latest quotes for the given ids. An empty id set
    /// must return an empty map without touching the network.
    async fn latest_quotes(
        &self,
        ids: &[CoinId],
    ) -> Result<HashMap<CoinId, CoinQuote>, FeedError>;

    /// Daily USD price history for one coin, oldest first.
    async fn price_history(&self, id: CoinId, days: u32) -> Result<Vec<DatedPrice>, FeedError>;
}

/// Fiat exchange-rate provider contract. Rates are relative to USD.
#[async_trait]
pub trait FiatRateFeed: Send + Sync + 'static {
    async fn latest_rates(
        &self,
        currencies: &[FiatCurrency],
    ) -> Result<HashMap<FiatCurrency, RateObservation>, FeedError>;
}
