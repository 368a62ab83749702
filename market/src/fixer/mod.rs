//! Fixer-style fiat exchange-rate provider.
//!
//! The provider quotes every rate against its own base currency (EUR on
//! the free tier). The session works in USD, so each response is rebased
//! before it leaves this module: `rate(c) / rate(USD)`. A response that
//! does not carry a USD rate cannot be rebased and yields no rates.

pub mod client;

pub use client::FixerClient;

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::{FiatCurrency, RateObservation};

#[derive(Debug, Deserialize)]
pub struct RatesResponse {
    /// Observation time, seconds since epoch.
    pub timestamp: i64,
    pub base: String,
    pub rates: HashMap<String, f64>,
}

impl RatesResponse {
    /// Rebase the response to USD. Currency codes the app does not know
    /// are dropped silently.
    pub fn rebased_to_usd(&self) -> HashMap<FiatCurrency, RateObservation> {
        let Some(&usd) = self.rates.get(FiatCurrency::BASE.code()) else {
            return HashMap::new();
        };

        let observed_at: DateTime<Utc> = DateTime::from_timestamp(self.timestamp, 0)
            .unwrap_or_else(Utc::now);

        self.rates
            .iter()
            .filter_map(|(code, &rate)| {
                let currency = FiatCurrency::from_str(code).ok()?;
                Some((
                    currency,
                    RateObservation {
                        rate: rate / usd,
                        observed_at,
                    },
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(rates: &[(&str, f64)]) -> RatesResponse {
        RatesResponse {
            timestamp: 1_700_000_000,
            base: "EUR".to_string(),
            rates: rates.iter().map(|(c, r)| (c.to_string(), *r)).collect(),
        }
    }

    #[test]
    fn rebases_eur_based_rates_to_usd() {
        let resp = response(&[("USD", 1.1), ("SEK", 11.0), ("EUR", 1.0)]);
        let rebased = resp.rebased_to_usd();

        let sek = rebased[&FiatCurrency::Sek];
        assert!((sek.rate - 10.0).abs() < 1e-9);

        let usd = rebased[&FiatCurrency::Usd];
        assert!((usd.rate - 1.0).abs() < 1e-12);
    }

    #[test]
    fn missing_usd_rate_yields_no_rates() {
        let resp = response(&[("SEK", 11.0), ("EUR", 1.0)]);
        assert!(resp.rebased_to_usd().is_empty());
    }

    #[test]
    fn unknown_codes_are_dropped() {
        let resp = response(&[("USD", 1.0), ("XAU", 0.0005)]);
        let rebased = resp.rebased_to_usd();
        assert_eq!(rebased.len(), 1);
        assert!(rebased.contains_key(&FiatCurrency::Usd));
    }

    #[test]
    fn observation_time_comes_from_response_timestamp() {
        let resp = response(&[("USD", 1.0)]);
        let rebased = resp.rebased_to_usd();
        assert_eq!(
            rebased[&FiatCurrency::Usd].observed_at.timestamp(),
            1_700_000_000
        );
    }
}
