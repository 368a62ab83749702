use market::cmc::types::{LatestQuotesResponse, ListedCoinsResponse, PriceHistoryResponse};

#[test]
fn decodes_listing_envelope() {
    let raw = r#"{
        "data": [
            { "id": 1, "name": "Bitcoin", "symbol": "BTC" },
            { "id": 1027, "name": "Ethereum", "symbol": "ETH" }
        ]
    }"#;

    let resp: ListedCoinsResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(resp.data.len(), 2);

    let listing = resp.data[0].listing();
    assert_eq!(listing.id, 1);
    assert_eq!(listing.symbol, "BTC");
    assert_eq!(listing.name, "Bitcoin");
}

#[test]
fn decodes_latest_quotes_with_usd_entry() {
    let raw = r#"{
        "data": {
            "1": {
                "id": 1,
                "name": "Bitcoin",
                "symbol": "BTC",
                "quote": {
                    "USD": {
                        "price": 60000.0,
                        "volume_24h": 12345.0,
                        "market_cap": 1000000.0,
                        "last_updated": "2024-03-01T12:00:00.000Z"
                    }
                }
            }
        }
    }"#;

    let resp: LatestQuotesResponse = serde_json::from_str(raw).unwrap();
    let quote = resp.data.into_values().next().unwrap().into_quote();

    assert_eq!(quote.id, 1);
    let usd = quote.usd.expect("USD sub-quote present");
    assert_eq!(usd.price, 60000.0);
    assert_eq!(usd.last_updated.timestamp(), 1_709_294_400);
}

#[test]
fn quote_without_usd_entry_maps_to_none() {
    let raw = r#"{
        "data": {
            "52": { "id": 52, "name": "XRP", "symbol": "XRP", "quote": {} }
        }
    }"#;

    let resp: LatestQuotesResponse = serde_json::from_str(raw).unwrap();
    let quote = resp.data.into_values().next().unwrap().into_quote();
    assert!(quote.usd.is_none());
}

#[test]
fn history_flattens_to_usd_series() {
    let raw = r#"{
        "data": {
            "quotes": [
                { "quote": { "USD": { "timestamp": "2024-03-01T00:00:00Z", "price": 100.0 } } },
                { "quote": { "EUR": { "timestamp": "2024-03-02T00:00:00Z", "price": 90.0 } } },
                { "quote": { "USD": { "timestamp": "2024-03-03T00:00:00Z", "price": 110.0 } } }
            ]
        }
    }"#;

    let resp: PriceHistoryResponse = serde_json::from_str(raw).unwrap();
    let series = resp.data.into_usd_series();

    assert_eq!(series.len(), 2);
    assert_eq!(series[0].price, 100.0);
    assert_eq!(series[1].price, 110.0);
}

#[test]
fn fixer_rates_envelope_decodes() {
    let raw = r#"{
        "success": true,
        "timestamp": 1700000000,
        "base": "EUR",
        "rates": { "USD": 1.1, "SEK": 11.0 }
    }"#;

    let resp: market::fixer::RatesResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(resp.base, "EUR");
    assert_eq!(resp.rates.len(), 2);
}
