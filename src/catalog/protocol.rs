//! Catalog API Protocol
//!
//! Endpoint paths of the public card API and the response shapes it is
//! known to return.

use super::types::Card;
use serde::Deserialize;

// --- API Endpoints ---

/// All cards of one set: `{base}/sets/{set_code}/`.
pub const ENDPOINT_SET: &str = "/sets";
/// A single card by card code: `{base}/sets/card/{card_code}/`.
pub const ENDPOINT_CARD: &str = "/sets/card";

pub fn set_url(base_url: &str, set_code: &str) -> String {
    format!("{}{}/{}/", base_url, ENDPOINT_SET, set_code)
}

pub fn card_url(base_url: &str, card_code: &str) -> String {
    format!("{}{}/{}/", base_url, ENDPOINT_CARD, card_code)
}

// --- Responses ---

/// The card endpoint answers with an array of printings for most codes, but
/// with a bare object for some older entries.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CardResponse {
    Many(Vec<Card>),
    One(Card),
}

impl CardResponse {
    /// First printing listed, which is the base art.
    pub fn into_first(self) -> Option<Card> {
        match self {
            CardResponse::Many(cards) => cards.into_iter().next(),
            CardResponse::One(card) => Some(card),
        }
    }
}
