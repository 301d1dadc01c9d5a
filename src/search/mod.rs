//! Incremental Search Module
//!
//! Live-as-you-type card search over a catalog that is only readable one set
//! at a time.
//!
//! ## Overview
//! There is no server-side text search, so every query is answered by
//! fetching whole sets, filtering them locally and accumulating matches. The
//! work is split into small batches so the first results appear quickly and
//! further sets are only fetched when the user asks for more.
//!
//! ## Responsibilities
//! - **Debouncing**: Only the last query typed within the debounce window runs.
//! - **Cancellation**: Superseded searches stop at their next checkpoint without side effects.
//! - **Caching**: Each set is fetched at most once per controller.
//! - **Pagination**: Sets are visited window by window until a stop rule fires.
//!
//! ## Submodules
//! - **`controller`**: The orchestrator and its batch loop.
//! - **`session`**: Per-query state and the stop rule counters.
//! - **`plan`**: The growable, ordered list of sets to visit.
//! - **`cache`**: The set-code to card-list cache.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Published state and API DTOs.

pub mod cache;
pub mod controller;
pub mod handlers;
pub mod plan;
pub mod session;
pub mod types;
