//! Presentation reconciler.
//!
//! Derives render-ready rows from the stores and the selection. Every
//! function here is pure and deterministic given its inputs: the current
//! instant is always an explicit `now` argument, never a wall-clock
//! read, so identical store/selection/now inputs always produce
//! identical output.

use chrono::{DateTime, Duration, Utc};

use market::types::{CoinId, CoinQuote, DatedPrice, FiatCurrency, RateObservation, UsdQuote};

use crate::model::{CoinDetails, CurrencyRow, CurrencyStatus, DisplayQuote, PriceRow};
use crate::selection::Selection;
use crate::store::{QuoteStore, RateStore};

/// Per-coin display precision in USD, keyed by provider coin id.
/// Coins absent from the table fall back to [`DEFAULT_DECIMALS`].
const DECIMALS: &[(CoinId, i32)] = &[
    (1, 0),     // BTC
    (2, 2),     // LTC
    (52, 3),    // XRP
    (1027, 0),  // ETH
    (5426, 2),  // SOL
    (24478, 8), // PEPE
];

const DEFAULT_DECIMALS: i32 = 2;

#[derive(Debug, Clone, Copy)]
pub struct ViewConfig {
    /// Age beyond which a rate is flagged as outdated to the user.
    pub rate_max_age: Duration,

    /// Cosmetic number of minutes subtracted from a quote's displayed
    /// age (clamped at 0). Set to 1 to make demo feeds look fresher
    /// than they are; off by default.
    pub freshness_bias_mins: i64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            rate_max_age: Duration::days(7),
            freshness_bias_mins: 0,
        }
    }
}

/// Display precision for a coin in a given currency.
///
/// Base precision comes from the per-coin table, shifted by the
/// currency's adjustment. Negative results clamp to 0; a result of
/// exactly 1 is bumped to 2, which reads better than a lone decimal.
pub fn decimal_count(id: CoinId, currency: FiatCurrency) -> u32 {
    let base = DECIMALS
        .iter()
        .find(|(coin, _)| *coin == id)
        .map(|(_, d)| *d)
        .unwrap_or(DEFAULT_DECIMALS);

    match base + currency.extra_decimals() {
        d if d < 0 => 0,
        1 => 2,
        d => d as u32,
    }
}

/// One row per tracked coin, in display order. A coin with no stored
/// quote data at all is skipped entirely (no placeholder row).
pub fn price_rows(
    quotes: &QuoteStore,
    rates: &RateStore,
    selection: &Selection,
    cfg: &ViewConfig,
    now: DateTime<Utc>,
) -> Vec<PriceRow> {
    let currency = selection.active_currency();

    selection
        .tracked()
        .iter()
        .filter_map(|&id| quotes.get(id))
        .map(|quote| price_row(quote, rates, currency, cfg, now))
        .collect()
}

/// Rows for every cataloged coin the user is not tracking yet, sorted
/// by symbol. Feeds the "add a coin" picker.
pub fn available_rows(
    quotes: &QuoteStore,
    rates: &RateStore,
    selection: &Selection,
    cfg: &ViewConfig,
    now: DateTime<Utc>,
) -> Vec<PriceRow> {
    let currency = selection.active_currency();

    let mut rows: Vec<PriceRow> = quotes
        .iter()
        .filter(|q| !selection.is_tracked(q.id))
        .map(|q| price_row(q, rates, currency, cfg, now))
        .collect();

    rows.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    rows
}

/// One row per configured currency, independent of the selection.
pub fn currency_rows(
    rates: &RateStore,
    selection: &Selection,
    currencies: &[FiatCurrency],
    cfg: &ViewConfig,
    now: DateTime<Utc>,
) -> Vec<CurrencyRow> {
    currencies
        .iter()
        .map(|&currency| CurrencyRow {
            currency,
            is_selected: currency == selection.active_currency(),
            name: currency.code().to_string(),
            status: currency_status(currency, rates, cfg, now),
        })
        .collect()
}

/// Converted market-cap/volume figures for one coin. `None` when the
/// coin has no USD quote or the currency has no rate; absence, not an
/// error, is the user-visible failure mode.
pub fn coin_details(
    quote: &CoinQuote,
    rates: &RateStore,
    currency: FiatCurrency,
) -> Option<CoinDetails> {
    let usd = quote.usd.as_ref()?;
    let rate = rates.get(currency)?.rate;

    Some(CoinDetails {
        market_cap: usd.market_cap * rate,
        volume_24h: usd.volume_24h * rate,
    })
}

/// Convert a USD history series into the display currency.
pub fn convert_history(series: &[DatedPrice], rate: f64) -> Vec<DatedPrice> {
    series
        .iter()
        .map(|p| DatedPrice {
            timestamp: p.timestamp,
            price: p.price * rate,
        })
        .collect()
}

fn price_row(
    quote: &CoinQuote,
    rates: &RateStore,
    currency: FiatCurrency,
    cfg: &ViewConfig,
    now: DateTime<Utc>,
) -> PriceRow {
    PriceRow {
        id: quote.id,
        symbol: quote.symbol.clone(),
        name: quote.name.clone(),
        decimals: decimal_count(quote.id, currency),
        quote: display_quote(quote.usd.as_ref(), rates, currency, cfg, now),
    }
}

fn display_quote(
    usd: Option<&UsdQuote>,
    rates: &RateStore,
    currency: FiatCurrency,
    cfg: &ViewConfig,
    now: DateTime<Utc>,
) -> Option<DisplayQuote> {
    let usd = usd?;
    let rate = rates.get(currency)?.rate;

    Some(DisplayQuote {
        price: usd.price * rate,
        minutes_ago: minutes_ago(usd.last_updated, cfg, now),
    })
}

fn minutes_ago(last_updated: DateTime<Utc>, cfg: &ViewConfig, now: DateTime<Utc>) -> i64 {
    let minutes = (now - last_updated).num_seconds().div_euclid(60).max(0);
    (minutes - cfg.freshness_bias_mins).max(0)
}

fn currency_status(
    currency: FiatCurrency,
    rates: &RateStore,
    cfg: &ViewConfig,
    now: DateTime<Utc>,
) -> CurrencyStatus {
    if currency.is_base() {
        return CurrencyStatus::BaseCurrency;
    }

    match rates.get(currency) {
        None => CurrencyStatus::Unavailable,
        Some(RateObservation { rate, observed_at }) => CurrencyStatus::Available {
            rate: *rate,
            outdated: now - *observed_at > cfg.rate_max_age,
        },
    }
}
