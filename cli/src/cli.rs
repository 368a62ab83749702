use std::time::Duration;

use clap::Parser;

use market::types::{CoinId, FiatCurrency};
use session::manager::SessionConfig;
use session::view::ViewConfig;

#[derive(Debug, Parser)]
#[clap(name = "coinwatch", version)]
pub struct Cli {
    /// CoinMarketCap API key
    #[clap(long, env = "CMC_API_KEY")]
    pub cmc_api_key: String,

    /// Fixer API key
    #[clap(long, env = "FIXER_API_KEY")]
    pub fixer_api_key: String,

    /// Provider coin ids to track at startup (comma-separated)
    #[clap(long, value_delimiter = ',', default_values_t = [1u64, 1027])]
    pub coins: Vec<CoinId>,

    /// Display currency
    #[clap(long, default_value = "USD")]
    pub currency: FiatCurrency,

    /// Seconds between price polls
    #[clap(long, default_value_t = 10)]
    pub price_poll_secs: u64,

    /// Seconds between exchange-rate polls
    #[clap(long, default_value_t = 300)]
    pub rate_poll_secs: u64,

    /// Minutes to shave off displayed quote ages (demo cosmetics;
    /// leave at 0 for honest freshness)
    #[clap(long, default_value_t = 0)]
    pub freshness_bias_mins: i64,
}

pub(crate) fn build_session_config(cli: &Cli) -> SessionConfig {
    SessionConfig {
        price_poll_every: Duration::from_secs(cli.price_poll_secs),
        rate_poll_every: Duration::from_secs(cli.rate_poll_secs),
        view: ViewConfig {
            freshness_bias_mins: cli.freshness_bias_mins,
            ..ViewConfig::default()
        },
        ..SessionConfig::default()
    }
}
