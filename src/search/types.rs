use crate::catalog::types::Card;
use serde::{Deserialize, Serialize};

/// Observable state of the search controller.
///
/// Published through a `watch` channel after every committed change, so a UI
/// always sees a consistent snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchState {
    /// The committed query, `None` before the first search.
    pub query: Option<String>,
    pub set_filter: Option<String>,
    pub results: Vec<Card>,
    pub is_loading: bool,
    pub is_loading_more: bool,
    pub can_load_more: bool,
    pub error: Option<String>,
}

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPhase {
    Idle,
    Debouncing,
    Loading,
    LoadingMore,
}

#[derive(Debug, Deserialize)]
pub struct SubmitQueryRequest {
    pub query: String,
    #[serde(default)]
    pub set: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitQueryResponse {
    pub token: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoadMoreResponse {
    pub started: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetsResponse {
    pub known: Vec<String>,
    pub cached: Vec<String>,
}
