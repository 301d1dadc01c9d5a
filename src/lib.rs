//! Incremental Card Search Library
//!
//! Client-side search over a trading card catalog whose API only returns
//! whole sets. The binary (`main.rs`) exposes the controller over HTTP.
//!
//! ## Modules
//! - **`catalog`**: Card types, the known set list, source traits and the
//!   HTTP client for the remote catalog.
//! - **`search`**: The debounced, cancellable, paginated search controller
//!   with its per-set cache.
//! - **`config`**: Tunables for the search loop and catalog client.

pub mod catalog;
pub mod config;
pub mod search;
