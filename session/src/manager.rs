//! WatchSession
//!
//! The single owner of the live watchlist state. Responsibilities:
//!   • Own the quote store, rate store and selection behind one mutex
//!   • Load the provider catalog once at startup
//!   • Run the price poller, re-parameterized whenever the selection changes
//!   • Run the rate poller for the fixed currency list
//!   • Serve render rows derived on demand by the `view` module
//!
//! WatchSession is an Arc-managed async service so long-lived poller
//! tasks may capture `self` without lifetime issues. The single inner
//! mutex is the serialization point: every merge and every read takes it
//! once, so a feed merge can never interleave with a read.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use market::feed::{CoinPriceFeed, FiatRateFeed};
use market::types::{CoinId, CoinQuote, DatedPrice, FiatCurrency, RateObservation};

use crate::model::{CoinDetailView, CurrencyRow, PriceRow, SelectionError};
use crate::selection::Selection;
use crate::store::{QuoteStore, RateStore};
use crate::view::{self, ViewConfig};

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Currencies offered in the currency picker; rates are polled for
    /// exactly this list, established once and never re-parameterized.
    pub currencies: Vec<FiatCurrency>,
    pub price_poll_every: Duration,
    pub rate_poll_every: Duration,
    pub view: ViewConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            currencies: FiatCurrency::ALL.to_vec(),
            price_poll_every: Duration::from_secs(10),
            rate_poll_every: Duration::from_secs(5 * 60),
            view: ViewConfig::default(),
        }
    }
}

struct SessionInner {
    quotes: QuoteStore,
    rates: RateStore,
    selection: Selection,
}

pub struct WatchSession<P, R> {
    cfg: SessionConfig,
    price_feed: Arc<P>,
    rate_feed: Arc<R>,

    inner: Arc<Mutex<SessionInner>>,

    /// Latest tracked id set for the price poller. `watch` keeps only
    /// the newest value, so a selection change made between ticks is
    /// what the next tick polls for.
    selected_ids: watch::Sender<Vec<CoinId>>,

    pollers: Mutex<Vec<JoinHandle<()>>>,
}

impl<P: CoinPriceFeed, R: FiatRateFeed> WatchSession<P, R> {
    pub fn new(cfg: SessionConfig, price_feed: Arc<P>, rate_feed: Arc<R>) -> Arc<Self> {
        let (selected_ids, _) = watch::channel(Vec::new());

        Arc::new(Self {
            cfg,
            price_feed,
            rate_feed,
            inner: Arc::new(Mutex::new(SessionInner {
                quotes: QuoteStore::new(),
                rates: RateStore::new(),
                selection: Selection::new(),
            })),
            selected_ids,
            pollers: Mutex::new(Vec::new()),
        })
    }

    /// Bring the session live. Call once.
    ///
    /// Seeds the base rate, loads the provider catalog (failure is
    /// non-fatal: the session continues with an empty catalog), then
    /// spawns both pollers. Each poller's first tick fires immediately.
    pub async fn start(self: &Arc<Self>, initial_coins: Vec<CoinId>) {
        {
            let mut inner = self.inner.lock().await;

            // USD per USD is definitional, not observed.
            inner.rates.merge(
                [(
                    FiatCurrency::BASE,
                    RateObservation {
                        rate: 1.0,
                        observed_at: Utc::now(),
                    },
                )]
                .into(),
            );

            for id in initial_coins {
                if inner.selection.is_tracked(id) {
                    warn!(coin = id, "duplicate initial coin ignored");
                    continue;
                }
                let _ = inner.selection.add(id);
            }

            self.selected_ids
                .send_replace(inner.selection.tracked().to_vec());
        }

        match self.price_feed.listed_coins().await {
            Ok(listings) => {
                let mut inner = self.inner.lock().await;
                inner.quotes.replace_all(listings.into_iter().map(|l| CoinQuote {
                    id: l.id,
                    symbol: l.symbol,
                    name: l.name,
                    usd: None,
                }));
                info!(count = inner.quotes.len(), "coin catalog loaded");
            }
            // Tracked coins still render once the price poller delivers
            // quotes for them; only the "available coins" list is empty.
            Err(e) => warn!(%e, "catalog load failed, continuing without it"),
        }

        let mut pollers = self.pollers.lock().await;
        pollers.push(tokio::spawn(Arc::clone(self).run_price_poller()));
        pollers.push(tokio::spawn(Arc::clone(self).run_rate_poller()));
    }

    /// Cancel both pollers and wait for them to wind down. No store
    /// mutation happens after this returns. Idempotent.
    pub async fn shutdown(&self) {
        let handles: Vec<JoinHandle<()>> = {
            let mut pollers = self.pollers.lock().await;
            pollers.drain(..).collect()
        };

        for h in &handles {
            h.abort();
        }
        let _ = futures::future::join_all(handles).await;

        info!("watch session shut down");
    }

    // ---- Selection mutations ----
    //
    // Each one publishes the new id set to the watch channel, so the
    // price poller's next tick polls exactly the current selection. A
    // poll already in flight with the old set may still merge; that is
    // benign (the merge is per-id and protective) and the next tick
    // supersedes it.

    pub async fn add_coin(&self, id: CoinId) -> Result<(), SelectionError> {
        let mut inner = self.inner.lock().await;
        inner.selection.add(id)?;
        self.selected_ids
            .send_replace(inner.selection.tracked().to_vec());
        Ok(())
    }

    pub async fn remove_coin(&self, id: CoinId) -> Result<(), SelectionError> {
        let mut inner = self.inner.lock().await;
        inner.selection.remove(id)?;
        self.selected_ids
            .send_replace(inner.selection.tracked().to_vec());
        Ok(())
    }

    pub async fn set_currency(&self, currency: FiatCurrency) {
        let mut inner = self.inner.lock().await;
        inner.selection.set_currency(currency);
    }

    // ---- Reads (recomputed on every call, nothing cached) ----

    pub async fn price_rows(&self, now: DateTime<Utc>) -> Vec<PriceRow> {
        let inner = self.inner.lock().await;
        view::price_rows(&inner.quotes, &inner.rates, &inner.selection, &self.cfg.view, now)
    }

    pub async fn currency_rows(&self, now: DateTime<Utc>) -> Vec<CurrencyRow> {
        let inner = self.inner.lock().await;
        view::currency_rows(
            &inner.rates,
            &inner.selection,
            &self.cfg.currencies,
            &self.cfg.view,
            now,
        )
    }

    pub async fn available_coins(&self, now: DateTime<Utc>) -> Vec<PriceRow> {
        let inner = self.inner.lock().await;
        view::available_rows(&inner.quotes, &inner.rates, &inner.selection, &self.cfg.view, now)
    }

    /// Detail view data for one tracked coin. `None` whenever any input
    /// is missing (untracked coin, no quote yet, no rate yet).
    pub async fn coin_details(&self, id: CoinId, now: DateTime<Utc>) -> Option<CoinDetailView> {
        let inner = self.inner.lock().await;

        if !inner.selection.is_tracked(id) {
            return None;
        }

        let currency = inner.selection.active_currency();
        let quote = inner.quotes.get(id)?;
        let details = view::coin_details(quote, &inner.rates, currency)?;
        let rate = inner.rates.get(currency)?.rate;

        let row = view::price_rows(
            &inner.quotes,
            &inner.rates,
            &inner.selection,
            &self.cfg.view,
            now,
        )
        .into_iter()
        .find(|r| r.id == id)?;

        Some(CoinDetailView {
            row,
            details,
            currency,
            rate,
        })
    }

    /// Price history for one coin, converted into the active currency.
    /// `None` on fetch failure or when the active currency has no rate;
    /// history is decoration, not worth an error dialog.
    pub async fn price_history(&self, id: CoinId, days: u32) -> Option<Vec<DatedPrice>> {
        let series = match self.price_feed.price_history(id, days).await {
            Ok(series) => series,
            Err(e) => {
                warn!(%e, coin = id, "price history fetch failed");
                return None;
            }
        };

        let rate = {
            let inner = self.inner.lock().await;
            let currency = inner.selection.active_currency();
            inner.rates.get(currency)?.rate
        };

        Some(view::convert_history(&series, rate))
    }

    // ---- Pollers ----

    async fn run_price_poller(self: Arc<Self>) {
        let mut ticker = interval(self.cfg.price_poll_every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let ids_rx = self.selected_ids.subscribe();

        info!(every_ms = self.cfg.price_poll_every.as_millis() as u64, "price poller started");

        loop {
            ticker.tick().await;

            let ids = ids_rx.borrow().clone();
            if ids.is_empty() {
                continue;
            }

            match self.price_feed.latest_quotes(&ids).await {
                Ok(batch) => {
                    debug!(count = batch.len(), "price batch merged");
                    let mut inner = self.inner.lock().await;
                    inner.quotes.merge(batch);
                }
                // Previous store contents stay authoritative; the next
                // successful poll corrects it.
                Err(e) => warn!(%e, "price poll failed"),
            }
        }
    }

    async fn run_rate_poller(self: Arc<Self>) {
        let mut ticker = interval(self.cfg.rate_poll_every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(every_ms = self.cfg.rate_poll_every.as_millis() as u64, "rate poller started");

        loop {
            ticker.tick().await;

            match self.rate_feed.latest_rates(&self.cfg.currencies).await {
                Ok(batch) => {
                    debug!(count = batch.len(), "rate batch merged");
                    let mut inner = self.inner.lock().await;
                    inner.rates.merge(batch);
                }
                Err(e) => warn!(%e, "rate poll failed"),
            }
        }
    }
}
