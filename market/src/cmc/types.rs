use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::{CoinId, CoinListing, CoinQuote, DatedPrice, UsdQuote};

#[derive(Debug, Deserialize)]
pub struct ListedCoinsResponse {
    pub data: Vec<CoinDto>,
}

#[derive(Debug, Deserialize)]
pub struct LatestQuotesResponse {
    pub data: HashMap<CoinId, CoinDto>,
}

#[derive(Debug, Deserialize)]
pub struct PriceHistoryResponse {
    pub data: HistoryDto,
}

#[derive(Debug, Deserialize)]
pub struct CoinDto {
    pub id: CoinId,
    pub name: String,
    pub symbol: String,

    /// Quotes keyed by currency code ("USD", ...). May be missing the
    /// USD entry on a degraded tick.
    #[serde(default)]
    pub quote: HashMap<String, QuoteDto>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteDto {
    pub price: f64,
    pub volume_24h: f64,
    pub market_cap: f64,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryDto {
    pub quotes: Vec<HistoryPointDto>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryPointDto {
    pub quote: HashMap<String, DatedQuoteDto>,
}

#[derive(Debug, Deserialize)]
pub struct DatedQuoteDto {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

const USD_KEY: &str = "USD";

impl CoinDto {
    pub fn listing(&self) -> CoinListing {
        CoinListing {
            id: self.id,
            symbol: self.symbol.clone(),
            name: self.name.clone(),
        }
    }

    pub fn into_quote(self) -> CoinQuote {
        let usd = self.quote.get(USD_KEY).map(|q| UsdQuote {
            price: q.price,
            volume_24h: q.volume_24h,
            market_cap: q.market_cap,
            last_updated: q.last_updated,
        });

        CoinQuote {
            id: self.id,
            symbol: self.symbol,
            name: self.name,
            usd,
        }
    }
}

impl HistoryDto {
    /// Flatten the per-currency history points down to the USD series.
    pub fn into_usd_series(self) -> Vec<DatedPrice> {
        self.quotes
            .into_iter()
            .filter_map(|p| {
                p.quote.get(USD_KEY).map(|q| DatedPrice {
                    timestamp: q.timestamp,
                    price: q.price,
                })
            })
            .collect()
    }
}
