pub mod cli;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;

use cli::*;
use market::cmc::{self, CmcClient};
use market::feed::{CoinPriceFeed, FiatRateFeed};
use market::fixer::{self, FixerClient};
use session::manager::WatchSession;
use session::model::CurrencyStatus;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    common::logger::init_logger("coinwatch");

    let cli = Cli::parse();

    let prices = Arc::new(CmcClient::new(
        cli.cmc_api_key.clone(),
        cmc::client::DEFAULT_BASE_URL.to_string(),
    )?);
    let rates = Arc::new(FixerClient::new(
        cli.fixer_api_key.clone(),
        fixer::client::DEFAULT_BASE_URL.to_string(),
    )?);

    let session = WatchSession::new(build_session_config(&cli), prices, rates);
    session.start(cli.coins.clone()).await;
    session.set_currency(cli.currency).await;

    let mut ticker = tokio::time::interval(Duration::from_secs(cli.price_poll_secs));

    loop {
        tokio::select! {
            _ = ticker.tick() => render(&session).await,
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    session.shutdown().await;
    Ok(())
}

async fn render<P: CoinPriceFeed, R: FiatRateFeed>(session: &WatchSession<P, R>) {
    let now = Utc::now();

    println!("== prices ==");
    for row in session.price_rows(now).await {
        match row.quote {
            Some(q) => println!(
                "{:<6} {:<16} {:>16.prec$}  ({} min ago)",
                row.symbol,
                row.name,
                q.price,
                q.minutes_ago,
                prec = row.decimals as usize,
            ),
            None => println!("{:<6} {:<16} {:>16}", row.symbol, row.name, "-"),
        }
    }

    println!("== currencies ==");
    for row in session.currency_rows(now).await {
        let marker = if row.is_selected { "*" } else { " " };
        match row.status {
            CurrencyStatus::BaseCurrency => println!("{marker} {:<4} base", row.name),
            CurrencyStatus::Unavailable => println!("{marker} {:<4} no rate yet", row.name),
            CurrencyStatus::Available { rate, outdated } => println!(
                "{marker} {:<4} {:.4}{}",
                row.name,
                rate,
                if outdated { " (outdated)" } else { "" },
            ),
        }
    }
}
