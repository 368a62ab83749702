//! Latest-quote store, one entry per coin id.
//!
//! Plain in-memory map with no internal locking: the owning session
//! serializes every access (see `manager`), so merges are atomic with
//! respect to reads by construction.

use std::collections::HashMap;

use market::types::{CoinId, CoinQuote};

#[derive(Debug, Default)]
pub struct QuoteStore {
    inner: HashMap<CoinId, CoinQuote>,
}

impl QuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-load an initial snapshot, overwriting everything. Used once
    /// at session start with the provider catalog.
    pub fn replace_all(&mut self, quotes: impl IntoIterator<Item = CoinQuote>) {
        self.inner = quotes.into_iter().map(|q| (q.id, q)).collect();
    }

    /// Merge a poll batch. An incoming entry that lacks the USD
    /// sub-quote never overwrites an existing entry that has one: a
    /// degraded tick must not flicker the UI to "no price".
    pub fn merge(&mut self, updates: HashMap<CoinId, CoinQuote>) {
        for (id, incoming) in updates {
            match self.inner.get(&id) {
                Some(existing) if existing.usd.is_some() && incoming.usd.is_none() => {}
                _ => {
                    self.inner.insert(id, incoming);
                }
            }
        }
    }

    pub fn get(&self, id: CoinId) -> Option<&CoinQuote> {
        self.inner.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CoinQuote> {
        self.inner.values()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
