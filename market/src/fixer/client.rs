use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::feed::{FeedError, FiatRateFeed};
use crate::fixer::RatesResponse;
use crate::types::{FiatCurrency, RateObservation};

pub const DEFAULT_BASE_URL: &str = "https://data.fixer.io/api";

#[derive(Clone)]
pub struct FixerClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl FixerClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, FeedError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }
}

#[async_trait]
impl FiatRateFeed for FixerClient {
    #[instrument(skip(self), level = "debug")]
    async fn latest_rates(
        &self,
        currencies: &[FiatCurrency],
    ) -> Result<HashMap<FiatCurrency, RateObservation>, FeedError> {
        let symbols = currencies
            .iter()
            .map(|c| c.code())
            .collect::<Vec<_>>()
            .join(",");

        let url = format!("{}/latest", self.base_url);

        let resp = self
            .http
            .get(&url)
            .query(&[
                ("access_key", self.api_key.as_str()),
                ("symbols", symbols.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: RatesResponse = resp.json().await?;

        let mut rates = body.rebased_to_usd();
        rates.retain(|c, _| currencies.contains(c));

        debug!(count = rates.len(), base = %body.base, "fiat rates fetched");

        Ok(rates)
    }
}
