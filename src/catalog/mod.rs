//! Card Catalog Module
//!
//! Everything needed to read the remote card catalog.
//!
//! ## Overview
//! The catalog API is paginated by set: one call returns every card of one set
//! and there is no server-side text search. This module models that contract
//! and provides the HTTP adapter used in production.
//!
//! ## Submodules
//! - **`types`**: The `Card` record and its composite `CardKey` identity.
//! - **`sets`**: The known set universe, newest first.
//! - **`source`**: `PageSource`/`ItemDetailSource` traits and the `FetchError` taxonomy.
//! - **`protocol`**: API endpoint paths and response shapes.
//! - **`client`**: `reqwest`-based implementation of both sources.

pub mod client;
pub mod protocol;
pub mod sets;
pub mod source;
pub mod types;
