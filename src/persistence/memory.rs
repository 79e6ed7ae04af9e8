//! In-process portfolio store.

use parking_lot::Mutex;
use std::collections::HashMap;

use super::{Portfolio, PortfolioStore, StoreError, StoreResult, sort_newest_first};

/// Keeps portfolios in a map behind a mutex. Used in tests and for
/// sessions that never leave the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    portfolios: Mutex<HashMap<String, Portfolio>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.portfolios.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.portfolios.lock().is_empty()
    }
}

impl PortfolioStore for MemoryStore {
    fn find_by_owner(&self, user_id: &str) -> StoreResult<Option<Portfolio>> {
        Ok(self.list_by_owner(user_id)?.into_iter().next())
    }

    fn list_by_owner(&self, user_id: &str) -> StoreResult<Vec<Portfolio>> {
        let mut owned: Vec<Portfolio> = self
            .portfolios
            .lock()
            .values()
            .filter(|portfolio| portfolio.user_id == user_id)
            .cloned()
            .collect();
        sort_newest_first(&mut owned);
        Ok(owned)
    }

    fn get(&self, id: &str) -> StoreResult<Option<Portfolio>> {
        Ok(self.portfolios.lock().get(id).cloned())
    }

    fn insert(&self, portfolio: Portfolio) -> StoreResult<Portfolio> {
        self.portfolios
            .lock()
            .insert(portfolio.id.clone(), portfolio.clone());
        Ok(portfolio)
    }

    fn update(&self, portfolio: Portfolio) -> StoreResult<Portfolio> {
        let mut portfolios = self.portfolios.lock();
        match portfolios.get_mut(&portfolio.id) {
            Some(slot) => {
                *slot = portfolio.clone();
                Ok(portfolio)
            }
            None => Err(StoreError::Missing(portfolio.id)),
        }
    }
}
