use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::cmc::types::{ListedCoinsResponse, LatestQuotesResponse, PriceHistoryResponse};
use crate::feed::{CoinPriceFeed, FeedError};
use crate::types::{CoinId, CoinListing, CoinQuote, DatedPrice};

pub const DEFAULT_BASE_URL: &str = "https://pro-api.coinmarketcap.com";

const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

#[derive(Clone)]
pub struct CmcClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl CmcClient {
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

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FeedError> {
        let url = format!("{}/{}", self.base_url, path);

        let resp = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("Accepts", "application/json")
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        Ok(resp.json::<T>().await?)
    }
}

fn join_ids(ids: &[CoinId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl CoinPriceFeed for CmcClient {
    #[instrument(skip(self), level = "debug")]
    async fn listed_coins(&self) -> Result<Vec<CoinListing>, FeedError> {
        let resp: ListedCoinsResponse = self
            .get_json("v1/cryptocurrency/listings/latest", &[])
            .await?;

        debug!(count = resp.data.len(), "coin catalog fetched");

        Ok(resp.data.iter().map(|c| c.listing()).collect())
    }

    #[instrument(skip(self), fields(ids = %join_ids(ids)), level = "debug")]
    async fn latest_quotes(
        &self,
        ids: &[CoinId],
    ) -> Result<HashMap<CoinId, CoinQuote>, FeedError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let resp: LatestQuotesResponse = self
            .get_json(
                "v2/cryptocurrency/quotes/latest",
                &[("id", join_ids(ids))],
            )
            .await?;

        Ok(resp
            .data
            .into_values()
            .map(|dto| {
                let q = dto.into_quote();
                (q.id, q)
            })
            .collect())
    }

    #[instrument(skip(self), level = "debug")]
    async fn price_history(&self, id: CoinId, days: u32) -> Result<Vec<DatedPrice>, FeedError> {
        let resp: PriceHistoryResponse = self
            .get_json(
                "v2/cryptocurrency/quotes/historical",
                &[
                    ("id", id.to_string()),
                    ("interval", "daily".to_string()),
                    ("count", days.to_string()),
                ],
            )
            .await?;

        Ok(resp.data.into_usd_series())
    }
}
