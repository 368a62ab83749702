use market::types::{CoinId, FiatCurrency};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// The UI contract says this cannot happen; see [`crate::selection::Selection::add`].
    #[error("coin {0} is already tracked")]
    DuplicateSelection(CoinId),

    #[error("coin {0} is not tracked")]
    NotFound(CoinId),
}

/// Converted price attached to a render row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayQuote {
    /// Price in the active display currency.
    pub price: f64,
    /// Whole minutes since the provider observed the quote.
    pub minutes_ago: i64,
}

/// One render-ready row per tracked coin. Derived fresh on every read,
/// never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
    /// Decimal count to format the price with in the active currency.
    pub decimals: u32,
    /// Absent when the USD quote or the active currency's rate is missing.
    pub quote: Option<DisplayQuote>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurrencyStatus {
    /// The base currency itself; its rate is definitionally 1.
    BaseCurrency,
    /// No rate observed yet.
    Unavailable,
    Available { rate: f64, outdated: bool },
}

/// One render-ready row per configured currency.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyRow {
    pub currency: FiatCurrency,
    pub is_selected: bool,
    pub name: String,
    pub status: CurrencyStatus,
}

/// Converted market figures for the detail view of one coin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinDetails {
    pub market_cap: f64,
    pub volume_24h: f64,
}

/// Everything the detail screen needs for one tracked coin.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinDetailView {
    pub row: PriceRow,
    pub details: CoinDetails,
    pub currency: FiatCurrency,
    pub rate: f64,
}
