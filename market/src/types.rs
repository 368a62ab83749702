use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable coin identifier assigned by the price provider.
pub type CoinId = u64;

/// Closed set of fiat currencies the app can display prices in.
///
/// Rates are always stored relative to [`FiatCurrency::BASE`] (USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FiatCurrency {
    Usd,
    Eur,
    Sek,
    Dkk,
    Nok,
    Yen,
}

impl FiatCurrency {
    pub const BASE: Self = FiatCurrency::Usd;

    pub const ALL: [FiatCurrency; 6] = [
        FiatCurrency::Usd,
        FiatCurrency::Eur,
        FiatCurrency::Sek,
        FiatCurrency::Dkk,
        FiatCurrency::Nok,
        FiatCurrency::Yen,
    ];

    pub fn is_base(self) -> bool {
        self == Self::BASE
    }

    /// Provider-facing currency code. "YEN" is kept as the rate
    /// provider spells it, not ISO "JPY".
    pub fn code(self) -> &'static str {
        match self {
            FiatCurrency::Usd => "USD",
            FiatCurrency::Eur => "EUR",
            FiatCurrency::Sek => "SEK",
            FiatCurrency::Dkk => "DKK",
            FiatCurrency::Nok => "NOK",
            FiatCurrency::Yen => "YEN",
        }
    }

    /// Decimal-count adjustment relative to USD. Low-unit-value
    /// currencies need fewer decimals to stay readable.
    pub fn extra_decimals(self) -> i32 {
        match self {
            FiatCurrency::Usd | FiatCurrency::Eur => 0,
            FiatCurrency::Sek | FiatCurrency::Dkk | FiatCurrency::Nok => -1,
            FiatCurrency::Yen => -2,
        }
    }
}

impl fmt::Display for FiatCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FiatCurrency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(FiatCurrency::Usd),
            "EUR" => Ok(FiatCurrency::Eur),
            "SEK" => Ok(FiatCurrency::Sek),
            "DKK" => Ok(FiatCurrency::Dkk),
            "NOK" => Ok(FiatCurrency::Nok),
            "YEN" | "JPY" => Ok(FiatCurrency::Yen),
            other => Err(format!("unknown fiat currency: {}", other)),
        }
    }
}

/// Catalog entry from the provider's listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinListing {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
}

/// Priced snapshot of a coin denominated in USD.
///
/// `last_updated` is the PROVIDER's observation time, not the time we
/// received the quote locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsdQuote {
    pub price: f64,
    pub volume_24h: f64,
    pub market_cap: f64,
    pub last_updated: DateTime<Utc>,
}

/// One coin as delivered by a price poll. The provider occasionally
/// omits the USD sub-quote; the store merge policy depends on that
/// being representable, hence the Option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinQuote {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
    pub usd: Option<UsdQuote>,
}

/// One observed exchange rate: how many units of a currency 1 USD buys.
/// Rate and timestamp are a single atomic fact; they are never split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateObservation {
    pub rate: f64,
    pub observed_at: DateTime<Utc>,
}

/// One point of a price-history series, in USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedPrice {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}
