//! Latest exchange rate per fiat currency, relative to USD.
//!
//! Unlike [`super::quotes::QuoteStore`], updates replace entries
//! wholesale: a rate observation is a single atomic fact (rate plus
//! timestamp), there is no partial field to protect.

use std::collections::HashMap;

use market::types::{FiatCurrency, RateObservation};

#[derive(Debug, Default)]
pub struct RateStore {
    inner: HashMap<FiatCurrency, RateObservation>,
}

impl RateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, updates: HashMap<FiatCurrency, RateObservation>) {
        self.inner.extend(updates);
    }

    pub fn get(&self, currency: FiatCurrency) -> Option<&RateObservation> {
        self.inner.get(&currency)
    }
}
