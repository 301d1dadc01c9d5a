//! Incremental Search Controller
//!
//! Orchestrates live-as-you-type search over a catalog that can only be read
//! one set at a time.
//!
//! ## Lifecycle
//! 1. **Submit**: `submit_query` bumps the session token and arms a debounce timer.
//! 2. **Debounce**: when the timer fires, a stale token means a newer query
//!    arrived and the timer exits silently. Otherwise a new `SearchSession`
//!    replaces the previous one.
//! 3. **Batch loop**: sets are pulled from the session plan, resolved through
//!    the `PageCache` and filtered client-side until a result, page or plan
//!    limit is reached.
//! 4. **Load more**: continues the current session with another batch.
//!
//! Cancellation is cooperative. Every loop re-checks its token before and
//! after each fetch and drops its work if superseded. All commits happen in
//! short critical sections on `inner` that never span an `.await`.

use super::cache::PageCache;
use super::session::{filter_matches, SearchScope, SearchSession, SessionToken};
use super::types::{SearchPhase, SearchState};
use crate::catalog::client::CatalogClient;
use crate::catalog::sets::known_sets;
use crate::catalog::source::{FetchError, ItemDetailSource, PageSource};
use crate::catalog::types::Card;
use crate::config::SearchConfig;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchKind {
    Initial,
    Continuation,
}

/// Result of committing one fetched page.
enum Step {
    Continue,
    Stop,
    Superseded,
}

#[derive(Debug, Clone)]
struct PendingQuery {
    query: String,
    set_filter: Option<String>,
}

#[derive(Default)]
struct ControllerState {
    /// Latest token handed out. Anything older is superseded.
    token: SessionToken,
    /// Token of the last request whose debounce elapsed.
    started: SessionToken,
    pending: Option<PendingQuery>,
    session: Option<SearchSession>,
}

impl ControllerState {
    fn session_for(&mut self, token: SessionToken) -> Option<&mut SearchSession> {
        if self.token != token {
            return None;
        }
        self.session.as_mut().filter(|session| session.token == token)
    }
}

pub struct SearchController {
    source: Arc<dyn PageSource>,
    details: Arc<dyn ItemDetailSource>,
    cache: PageCache,
    config: SearchConfig,
    universe: Vec<String>,
    inner: Mutex<ControllerState>,
    state_tx: watch::Sender<SearchState>,
}

impl SearchController {
    /// Creates a controller searching the known set universe.
    pub fn new(
        source: Arc<dyn PageSource>,
        details: Arc<dyn ItemDetailSource>,
        config: SearchConfig,
    ) -> Arc<Self> {
        Self::with_universe(source, details, config, known_sets())
    }

    /// Creates a controller over an explicit universe (newest first).
    pub fn with_universe(
        source: Arc<dyn PageSource>,
        details: Arc<dyn ItemDetailSource>,
        config: SearchConfig,
        universe: Vec<String>,
    ) -> Arc<Self> {
        let (state_tx, _) = watch::channel(SearchState::default());
        Arc::new(Self {
            source,
            details,
            cache: PageCache::new(),
            config,
            universe,
            inner: Mutex::new(ControllerState::default()),
            state_tx,
        })
    }

    /// Controller backed by the HTTP catalog for both pages and card details.
    pub fn from_client(client: Arc<CatalogClient>, config: SearchConfig) -> Arc<Self> {
        Self::new(client.clone(), client, config)
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, update: impl FnOnce(&mut SearchState)) {
        self.state_tx.send_modify(update);
    }

    // --- Read accessors ---

    pub fn state(&self) -> SearchState {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state_tx.subscribe()
    }

    pub fn current_token(&self) -> SessionToken {
        self.lock().token
    }

    pub fn cached_sets(&self) -> Vec<String> {
        self.cache.cached_sets()
    }

    pub fn universe(&self) -> &[String] {
        &self.universe
    }

    pub fn phase(&self) -> SearchPhase {
        let inner = self.lock();
        if inner.pending.is_some() && inner.token != inner.started {
            return SearchPhase::Debouncing;
        }
        let state = self.state_tx.borrow();
        if state.is_loading {
            SearchPhase::Loading
        } else if state.is_loading_more {
            SearchPhase::LoadingMore
        } else {
            SearchPhase::Idle
        }
    }

    // --- Query lifecycle ---

    /// Records a new query and (re)arms the debounce timer.
    ///
    /// The current session is invalidated immediately. Nothing visible changes
    /// until the debounce delay elapses without a newer submission.
    pub fn submit_query(
        self: &Arc<Self>,
        query: impl Into<String>,
        set_filter: Option<String>,
    ) -> SessionToken {
        let set_filter = set_filter
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty());

        let token = {
            let mut inner = self.lock();
            inner.token += 1;
            inner.pending = Some(PendingQuery {
                query: query.into(),
                set_filter,
            });
            inner.token
        };
        tracing::debug!("Query submitted (token {})", token);

        let controller = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(controller.config.debounce).await;
            controller.start_session(token).await;
        });

        token
    }

    async fn start_session(&self, token: SessionToken) {
        {
            let mut inner = self.lock();
            if inner.token != token {
                tracing::trace!("Debounce for token {} superseded", token);
                return;
            }
            let Some(pending) = inner.pending.clone() else {
                return;
            };
            inner.started = token;

            if pending.query.trim().is_empty() {
                inner.session = None;
                self.publish(|state| {
                    *state = SearchState {
                        query: Some(String::new()),
                        set_filter: pending.set_filter.clone(),
                        ..SearchState::default()
                    };
                });
                return;
            }

            let scope = match &pending.set_filter {
                Some(code) => SearchScope::Set(code.clone()),
                None => SearchScope::AllSets,
            };
            let session =
                SearchSession::new(token, &pending.query, scope, &self.universe, &self.config);
            tracing::info!(
                "Starting search '{}' ({:?}, token {})",
                session.query,
                session.scope,
                token
            );

            let query = session.query.clone();
            inner.session = Some(session);
            self.publish(|state| {
                *state = SearchState {
                    query: Some(query),
                    set_filter: pending.set_filter.clone(),
                    is_loading: true,
                    ..SearchState::default()
                };
            });
        }

        self.run_batch(token, BatchKind::Initial).await;
    }

    /// Continues the current session with another batch.
    ///
    /// Returns `false` without touching any state unless more results are
    /// available and no batch is running.
    pub fn load_more(self: &Arc<Self>) -> bool {
        let token = {
            let inner = self.lock();
            let (can_load_more, busy) = {
                let state = self.state_tx.borrow();
                (state.can_load_more, state.is_loading || state.is_loading_more)
            };
            if !can_load_more || busy {
                return false;
            }
            let Some(session) = inner.session.as_ref() else {
                return false;
            };
            if session.token != inner.token {
                return false;
            }
            self.publish(|state| state.is_loading_more = true);
            session.token
        };
        tracing::debug!("Loading more results (token {})", token);

        let controller = self.clone();
        tokio::spawn(async move {
            controller.run_batch(token, BatchKind::Continuation).await;
        });

        true
    }

    /// Drops the current session and any pending query, and clears the
    /// published state.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.token += 1;
        inner.started = inner.token;
        inner.pending = None;
        inner.session = None;
        self.publish(|state| *state = SearchState::default());
    }

    // --- Batch loop ---

    async fn run_batch(&self, token: SessionToken, kind: BatchKind) {
        let Some(cap) = self.begin_batch(token) else {
            tracing::trace!("Batch for token {} superseded before start", token);
            return;
        };

        let mut collected = 0;
        let mut pages = 0;

        loop {
            let Some(next) = self.next_page(token) else {
                tracing::trace!("Batch for token {} superseded", token);
                return;
            };
            let Some((set_code, needle)) = next else {
                break;
            };

            let outcome = self.cache.resolve(&set_code, self.source.as_ref()).await;
            pages += 1;

            match self.commit_page(token, &set_code, &needle, outcome, &mut collected) {
                Step::Superseded => {
                    tracing::trace!("Dropping page {} of superseded token {}", set_code, token);
                    return;
                }
                Step::Stop => break,
                Step::Continue => {}
            }

            if collected >= cap || pages >= self.config.max_pages_per_batch {
                break;
            }
        }

        self.finish_batch(token, kind, collected);
    }

    fn begin_batch(&self, token: SessionToken) -> Option<usize> {
        let mut inner = self.lock();
        let session = inner.session_for(token)?;
        Some(session.begin_batch(&self.config))
    }

    /// `None` when superseded, `Some(None)` when the plan has nothing left.
    fn next_page(&self, token: SessionToken) -> Option<Option<(String, String)>> {
        let mut inner = self.lock();
        let session = inner.session_for(token)?;
        Some(
            session
                .next_page()
                .map(|code| (code, session.needle().to_string())),
        )
    }

    fn commit_page(
        &self,
        token: SessionToken,
        set_code: &str,
        needle: &str,
        outcome: Result<Arc<Vec<Card>>, FetchError>,
        collected: &mut usize,
    ) -> Step {
        let outcome = outcome.map(|cards| filter_matches(&cards, needle));

        let mut inner = self.lock();
        let Some(session) = inner.session_for(token) else {
            return Step::Superseded;
        };

        match outcome {
            Ok(matches) => {
                tracing::debug!(
                    "Set {}: {} matches for '{}'",
                    set_code,
                    matches.len(),
                    session.query
                );
                *collected += matches.len();
                if !matches.is_empty() {
                    self.publish(|state| state.results.extend(matches.iter().cloned()));
                }
                session.record_matches(matches);
            }
            Err(err) => {
                if err.is_expected() {
                    tracing::debug!("Set {} unavailable: {}", set_code, err);
                } else {
                    tracing::warn!("Failed to load set {}: {}", set_code, err);
                }
                session.record_failure(&err);
            }
        }

        if session.check_empty_streak(self.config.empty_page_threshold) {
            tracing::debug!(
                "Giving up on '{}' after {} empty sets",
                session.query,
                session.consecutive_empty()
            );
            return Step::Stop;
        }
        Step::Continue
    }

    fn finish_batch(&self, token: SessionToken, kind: BatchKind, collected: usize) {
        let mut inner = self.lock();
        let Some(session) = inner.session_for(token) else {
            return;
        };

        let can_load_more = session.can_load_more();
        let error = if !can_load_more && session.all_pages_failed() {
            Some(format!("Could not load any cards for \"{}\"", session.query))
        } else {
            None
        };

        tracing::info!(
            "Search '{}' {:?} batch done: +{} results ({} total), {} sets visited, more={}",
            session.query,
            kind,
            collected,
            session.results().len(),
            session.pages_visited(),
            can_load_more
        );

        self.publish(|state| {
            state.is_loading = false;
            state.is_loading_more = false;
            state.can_load_more = can_load_more;
            state.error = error;
        });
    }

    // --- Out-of-band lookups ---

    /// Fetches a single card for a detail view.
    ///
    /// Returns `Ok(None)` when `token` is no longer current (checked before
    /// and after the request) and when the card is missing or the API is
    /// rate limiting. Hard failures are returned to the caller.
    pub async fn resolve_item(
        &self,
        set_code: &str,
        card_code: &str,
        token: SessionToken,
    ) -> Result<Option<Card>, FetchError> {
        if self.current_token() != token {
            return Ok(None);
        }

        if let Some(card) = self.cache.find_card(set_code, card_code) {
            return Ok(Some(card));
        }

        let result = self.details.fetch_item(card_code).await;

        if self.current_token() != token {
            tracing::trace!("Discarding lookup of {} for stale token {}", card_code, token);
            return Ok(None);
        }

        match result {
            Ok(card) => Ok(Some(card)),
            Err(err) if err.is_expected() => {
                tracing::debug!("Lookup of {} returned {}", card_code, err);
                Ok(None)
            }
            Err(err) => {
                tracing::warn!("Lookup of {} failed: {}", card_code, err);
                Err(err)
            }
        }
    }
}
