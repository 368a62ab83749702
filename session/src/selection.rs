//! The user's watch list: an ordered, duplicate-free list of coin ids
//! plus the single active display currency.

use market::types::{CoinId, FiatCurrency};

use crate::model::SelectionError;

#[derive(Debug, Clone)]
pub struct Selection {
    tracked: Vec<CoinId>,
    active_currency: FiatCurrency,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl Selection {
    pub fn new() -> Self {
        Self {
            tracked: Vec::new(),
            active_currency: FiatCurrency::BASE,
        }
    }

    /// Track a coin, appending it at the end (display order).
    ///
    /// Adding an already-tracked coin is a contract violation in the UI
    /// layer: it debug_asserts, and in release returns
    /// [`SelectionError::DuplicateSelection`] without mutating.
    pub fn add(&mut self, id: CoinId) -> Result<(), SelectionError> {
        if self.tracked.contains(&id) {
            debug_assert!(false, "coin {id} is already tracked");
            return Err(SelectionError::DuplicateSelection(id));
        }
        self.tracked.push(id);
        Ok(())
    }

    /// Stop tracking a coin. Removing an untracked coin signals
    /// [`SelectionError::NotFound`]; callers may ignore it.
    pub fn remove(&mut self, id: CoinId) -> Result<(), SelectionError> {
        let before = self.tracked.len();
        self.tracked.retain(|c| *c != id);
        if self.tracked.len() == before {
            return Err(SelectionError::NotFound(id));
        }
        Ok(())
    }

    /// Switch the display currency. The currency does not need a known
    /// rate yet; rows simply render without prices until one arrives.
    pub fn set_currency(&mut self, currency: FiatCurrency) {
        self.active_currency = currency;
    }

    pub fn tracked(&self) -> &[CoinId] {
        &self.tracked
    }

    pub fn is_tracked(&self, id: CoinId) -> bool {
        self.tracked.contains(&id)
    }

    pub fn active_currency(&self) -> FiatCurrency {
        self.active_currency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_appends_in_display_order() {
        let mut sel = Selection::new();
        sel.add(3).unwrap();
        sel.add(1).unwrap();
        sel.add(2).unwrap();
        assert_eq!(sel.tracked(), &[3, 1, 2]);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn duplicate_add_fails_in_release() {
        let mut sel = Selection::new();
        sel.add(1).unwrap();
        assert_eq!(sel.add(1), Err(SelectionError::DuplicateSelection(1)));
        assert_eq!(sel.tracked(), &[1]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "already tracked")]
    fn duplicate_add_is_fatal_in_debug() {
        let mut sel = Selection::new();
        sel.add(1).unwrap();
        let _ = sel.add(1);
    }

    #[test]
    fn add_then_remove_restores_prior_order() {
        let mut sel = Selection::new();
        sel.add(10).unwrap();
        sel.add(20).unwrap();
        let before = sel.tracked().to_vec();

        sel.add(30).unwrap();
        sel.remove(30).unwrap();

        assert_eq!(sel.tracked(), before.as_slice());
    }

    #[test]
    fn remove_untracked_signals_not_found() {
        let mut sel = Selection::new();
        sel.add(1).unwrap();
        assert_eq!(sel.remove(99), Err(SelectionError::NotFound(99)));
        assert_eq!(sel.tracked(), &[1]);
    }

    #[test]
    fn currency_defaults_to_base_and_switches_unconditionally() {
        let mut sel = Selection::new();
        assert_eq!(sel.active_currency(), FiatCurrency::Usd);
        sel.set_currency(FiatCurrency::Yen);
        assert_eq!(sel.active_currency(), FiatCurrency::Yen);
    }
}
