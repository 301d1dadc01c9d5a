//! Page Cache
//!
//! Process-lifetime map from set code to the full card list of that set.
//! Entries are written once on a successful fetch and never evicted.
//!
//! Two overlapping sessions may both miss on the same set and fetch it twice.
//! Both writes store an equivalent list, so the race is benign and the fetch
//! itself is not serialized.

use crate::catalog::source::{FetchError, PageSource};
use crate::catalog::types::Card;

use dashmap::DashMap;
use std::sync::Arc;

#[derive(Default)]
pub struct PageCache {
    pages: DashMap<String, Arc<Vec<Card>>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, set_code: &str) -> Option<Arc<Vec<Card>>> {
        self.pages.get(set_code).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, set_code: String, cards: Vec<Card>) -> Arc<Vec<Card>> {
        let cards = Arc::new(cards);
        self.pages.insert(set_code, cards.clone());
        cards
    }

    pub fn contains(&self, set_code: &str) -> bool {
        self.pages.contains_key(set_code)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn cached_sets(&self) -> Vec<String> {
        let mut sets: Vec<String> = self.pages.iter().map(|entry| entry.key().clone()).collect();
        sets.sort();
        sets
    }

    /// Finds a card by code in any cached set.
    pub fn find_card(&self, set_code: &str, card_code: &str) -> Option<Card> {
        let page = self.get(set_code)?;
        page.iter().find(|card| card.code == card_code).cloned()
    }

    /// Returns the cached page or fetches it through `source`.
    ///
    /// Failures are not cached, so a later session retries the set.
    pub async fn resolve(
        &self,
        set_code: &str,
        source: &dyn PageSource,
    ) -> Result<Arc<Vec<Card>>, FetchError> {
        if let Some(cards) = self.get(set_code) {
            tracing::debug!("Cache hit for set {} ({} cards)", set_code, cards.len());
            return Ok(cards);
        }

        let cards = source.fetch_page(set_code).await?;
        Ok(self.insert(set_code.to_string(), cards))
    }
}
