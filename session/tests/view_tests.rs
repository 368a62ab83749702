use std::collections::HashMap;

use chrono::{Duration, Utc};

use market::types::FiatCurrency;
use session::model::CurrencyStatus;
use session::selection::Selection;
use session::store::{QuoteStore, RateStore};
use session::view::{self, ViewConfig};

use mock_feeds::{priced_quote, unpriced_quote};

fn rate(store: &mut RateStore, currency: FiatCurrency, rate: f64, age: Duration) {
    let now = Utc::now();
    store.merge(HashMap::from([(
        currency,
        market::types::RateObservation {
            rate,
            observed_at: now - age,
        },
    )]));
}

#[test]
fn sek_conversion_scenario() {
    let now = Utc::now();

    let mut quotes = QuoteStore::new();
    quotes.merge(HashMap::from([(
        1,
        priced_quote(1, 100.0, now - Duration::seconds(90)),
    )]));

    let mut rates = RateStore::new();
    rate(&mut rates, FiatCurrency::Sek, 10.0, Duration::minutes(1));

    let mut selection = Selection::new();
    selection.add(1).unwrap();
    selection.set_currency(FiatCurrency::Sek);

    let rows = view::price_rows(&quotes, &rates, &selection, &ViewConfig::default(), now);

    assert_eq!(rows.len(), 1);
    let q = rows[0].quote.unwrap();
    assert!((q.price - 1000.0).abs() < 1e-9);
    assert_eq!(q.minutes_ago, 1);
}

#[test]
fn freshness_bias_shifts_the_sek_scenario_to_zero() {
    let now = Utc::now();

    let mut quotes = QuoteStore::new();
    quotes.merge(HashMap::from([(
        1,
        priced_quote(1, 100.0, now - Duration::seconds(90)),
    )]));

    let mut rates = RateStore::new();
    rate(&mut rates, FiatCurrency::Sek, 10.0, Duration::minutes(1));

    let mut selection = Selection::new();
    selection.add(1).unwrap();
    selection.set_currency(FiatCurrency::Sek);

    let cfg = ViewConfig {
        freshness_bias_mins: 1,
        ..ViewConfig::default()
    };
    let rows = view::price_rows(&quotes, &rates, &selection, &cfg, now);
    assert_eq!(rows[0].quote.unwrap().minutes_ago, 0);
}

#[test]
fn reconciler_is_pure() {
    let now = Utc::now();

    let mut quotes = QuoteStore::new();
    quotes.merge(HashMap::from([
        (1, priced_quote(1, 60_000.0, now - Duration::minutes(3))),
        (52, unpriced_quote(52)),
    ]));

    let mut rates = RateStore::new();
    rate(&mut rates, FiatCurrency::Usd, 1.0, Duration::zero());
    rate(&mut rates, FiatCurrency::Eur, 0.9, Duration::hours(1));

    let mut selection = Selection::new();
    selection.add(52).unwrap();
    selection.add(1).unwrap();
    selection.set_currency(FiatCurrency::Eur);

    let cfg = ViewConfig::default();
    let currencies = FiatCurrency::ALL;

    assert_eq!(
        view::price_rows(&quotes, &rates, &selection, &cfg, now),
        view::price_rows(&quotes, &rates, &selection, &cfg, now)
    );
    assert_eq!(
        view::currency_rows(&rates, &selection, &currencies, &cfg, now),
        view::currency_rows(&rates, &selection, &currencies, &cfg, now)
    );
}

#[test]
fn coin_without_stored_quote_is_skipped_entirely() {
    let now = Utc::now();
    let quotes = QuoteStore::new();
    let rates = RateStore::new();

    let mut selection = Selection::new();
    selection.add(7).unwrap();

    let rows = view::price_rows(&quotes, &rates, &selection, &ViewConfig::default(), now);
    assert!(rows.is_empty());
}

#[test]
fn missing_rate_yields_row_without_price() {
    let now = Utc::now();

    let mut quotes = QuoteStore::new();
    quotes.merge(HashMap::from([(1, priced_quote(1, 100.0, now))]));

    let rates = RateStore::new(); // no NOK rate stored

    let mut selection = Selection::new();
    selection.add(1).unwrap();
    selection.set_currency(FiatCurrency::Nok);

    let rows = view::price_rows(&quotes, &rates, &selection, &ViewConfig::default(), now);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].symbol, "CN1");
    assert!(rows[0].quote.is_none());
}

#[test]
fn unpriced_entry_yields_row_without_price() {
    let now = Utc::now();

    let mut quotes = QuoteStore::new();
    quotes.merge(HashMap::from([(52, unpriced_quote(52))]));

    let mut rates = RateStore::new();
    rate(&mut rates, FiatCurrency::Usd, 1.0, Duration::zero());

    let mut selection = Selection::new();
    selection.add(52).unwrap();

    let rows = view::price_rows(&quotes, &rates, &selection, &ViewConfig::default(), now);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].quote.is_none());
}

#[test]
fn rows_follow_tracked_order() {
    let now = Utc::now();

    let mut quotes = QuoteStore::new();
    quotes.merge(HashMap::from([
        (1, priced_quote(1, 1.0, now)),
        (2, priced_quote(2, 2.0, now)),
        (3, priced_quote(3, 3.0, now)),
    ]));

    let mut rates = RateStore::new();
    rate(&mut rates, FiatCurrency::Usd, 1.0, Duration::zero());

    let mut selection = Selection::new();
    selection.add(3).unwrap();
    selection.add(1).unwrap();
    selection.add(2).unwrap();

    let rows = view::price_rows(&quotes, &rates, &selection, &ViewConfig::default(), now);
    let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[test]
fn rate_staleness_boundary() {
    let now = Utc::now();
    let cfg = ViewConfig::default();

    let mut rates = RateStore::new();
    rate(&mut rates, FiatCurrency::Sek, 10.0, Duration::days(8));
    rate(&mut rates, FiatCurrency::Dkk, 6.74, Duration::days(6));

    let selection = Selection::new();
    let rows = view::currency_rows(
        &rates,
        &selection,
        &[FiatCurrency::Sek, FiatCurrency::Dkk],
        &cfg,
        now,
    );

    assert_eq!(
        rows[0].status,
        CurrencyStatus::Available {
            rate: 10.0,
            outdated: true
        }
    );
    assert_eq!(
        rows[1].status,
        CurrencyStatus::Available {
            rate: 6.74,
            outdated: false
        }
    );
}

#[test]
fn currency_rows_cover_base_unavailable_and_selection() {
    let now = Utc::now();

    let mut rates = RateStore::new();
    rate(&mut rates, FiatCurrency::Eur, 0.9, Duration::hours(1));

    let mut selection = Selection::new();
    selection.set_currency(FiatCurrency::Eur);

    let rows = view::currency_rows(
        &rates,
        &selection,
        &[FiatCurrency::Usd, FiatCurrency::Eur, FiatCurrency::Yen],
        &ViewConfig::default(),
        now,
    );

    assert_eq!(rows[0].status, CurrencyStatus::BaseCurrency);
    assert!(!rows[0].is_selected);

    assert!(rows[1].is_selected);
    assert!(matches!(rows[1].status, CurrencyStatus::Available { .. }));

    assert_eq!(rows[2].status, CurrencyStatus::Unavailable);
}

#[test]
fn available_rows_exclude_tracked_and_sort_by_symbol() {
    let now = Utc::now();

    let mut quotes = QuoteStore::new();
    quotes.replace_all(vec![
        unpriced_quote(3), // CN3
        unpriced_quote(1), // CN1
        unpriced_quote(2), // CN2
    ]);

    let rates = RateStore::new();

    let mut selection = Selection::new();
    selection.add(2).unwrap();

    let rows = view::available_rows(&quotes, &rates, &selection, &ViewConfig::default(), now);
    let symbols: Vec<_> = rows.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["CN1", "CN3"]);
}

#[test]
fn details_convert_market_cap_and_volume() {
    let now = Utc::now();
    let quote = priced_quote(1, 100.0, now);

    let mut rates = RateStore::new();
    rate(&mut rates, FiatCurrency::Sek, 10.0, Duration::zero());

    let details = view::coin_details(&quote, &rates, FiatCurrency::Sek).unwrap();
    // fixture: volume = price * 10, market cap = price * 1000
    assert!((details.volume_24h - 10_000.0).abs() < 1e-9);
    assert!((details.market_cap - 1_000_000.0).abs() < 1e-6);

    assert!(view::coin_details(&quote, &rates, FiatCurrency::Yen).is_none());
    assert!(view::coin_details(&unpriced_quote(1), &rates, FiatCurrency::Sek).is_none());
}

#[test]
fn history_conversion_scales_prices_only() {
    let now = Utc::now();
    let series = vec![
        market::types::DatedPrice {
            timestamp: now - Duration::days(1),
            price: 100.0,
        },
        market::types::DatedPrice {
            timestamp: now,
            price: 110.0,
        },
    ];

    let converted = view::convert_history(&series, 10.0);
    assert_eq!(converted[0].price, 1000.0);
    assert_eq!(converted[1].price, 1100.0);
    assert_eq!(converted[0].timestamp, series[0].timestamp);
}
