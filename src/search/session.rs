//! Search Session
//!
//! One committed query: its pagination plan, the matches gathered so far and
//! the counters behind the stop rule. A session is addressed by its token;
//! once the controller moves to a newer token the session is simply dropped.

use super::plan::PaginationPlan;
use crate::catalog::source::FetchError;
use crate::catalog::types::Card;
use crate::config::SearchConfig;

/// Monotonically assigned id of a requested search.
pub type SessionToken = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    AllSets,
    Set(String),
}

#[derive(Debug)]
pub struct SearchSession {
    pub token: SessionToken,
    pub query: String,
    pub scope: SearchScope,
    needle: String,
    plan: PaginationPlan,
    /// Append-only, in page order then in-page order.
    results: Vec<Card>,
    consecutive_empty: usize,
    pages_visited: usize,
    pages_failed: usize,
    batches_started: usize,
    done: bool,
}

impl SearchSession {
    pub fn new(
        token: SessionToken,
        query: &str,
        scope: SearchScope,
        universe: &[String],
        config: &SearchConfig,
    ) -> Self {
        let query = query.trim().to_string();
        let plan = match &scope {
            SearchScope::Set(code) => PaginationPlan::for_set(code.clone()),
            SearchScope::AllSets => PaginationPlan::search_all(
                universe.to_vec(),
                config.initial_window,
                config.extension_window,
            ),
        };

        Self {
            token,
            needle: query.to_lowercase(),
            query,
            scope,
            plan,
            results: Vec::new(),
            consecutive_empty: 0,
            pages_visited: 0,
            pages_failed: 0,
            batches_started: 0,
            done: false,
        }
    }

    /// Lowercased query used for matching.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn results(&self) -> &[Card] {
        &self.results
    }

    pub fn consecutive_empty(&self) -> usize {
        self.consecutive_empty
    }

    pub fn pages_visited(&self) -> usize {
        self.pages_visited
    }

    /// Registers a new batch and returns its result cap. The first batch of a
    /// session gets the smaller cap.
    pub fn begin_batch(&mut self, config: &SearchConfig) -> usize {
        let cap = if self.batches_started == 0 {
            config.first_batch_max_results
        } else {
            config.max_results_per_batch
        };
        self.batches_started += 1;
        cap
    }

    /// Next set to visit. Extends the plan when its tail is used up; a fresh
    /// window starts with a zeroed empty-page counter.
    pub fn next_page(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        if !self.plan.has_unvisited() && self.plan.extend() {
            tracing::debug!(
                "Extended plan for '{}' to {} sets (empty streak {} reset)",
                self.query,
                self.plan.planned().len(),
                self.consecutive_empty
            );
            self.consecutive_empty = 0;
        }
        self.plan.next_key()
    }

    /// Appends the matches of one visited page.
    pub fn record_matches(&mut self, matches: Vec<Card>) {
        self.pages_visited += 1;
        if matches.is_empty() {
            self.consecutive_empty += 1;
        } else {
            self.consecutive_empty = 0;
            self.results.extend(matches);
        }
    }

    /// A failed page counts as a page without matches.
    pub fn record_failure(&mut self, error: &FetchError) {
        self.pages_visited += 1;
        if error.is_hard() {
            self.pages_failed += 1;
        }
        self.consecutive_empty += 1;
    }

    /// Marks the session done once the empty streak hits `threshold`.
    pub fn check_empty_streak(&mut self, threshold: usize) -> bool {
        if self.consecutive_empty >= threshold {
            self.done = true;
        }
        self.done
    }

    pub fn is_exhausted(&self) -> bool {
        self.done || self.plan.is_exhausted()
    }

    pub fn can_load_more(&self) -> bool {
        !self.is_exhausted()
    }

    /// Every visited page failed hard and nothing matched.
    pub fn all_pages_failed(&self) -> bool {
        self.pages_visited > 0 && self.pages_failed == self.pages_visited && self.results.is_empty()
    }
}

/// Cards of `page` whose name contains `needle`, in page order.
pub fn filter_matches(page: &[Card], needle: &str) -> Vec<Card> {
    page.iter()
        .filter(|card| card.name_contains(needle))
        .cloned()
        .collect()
}
