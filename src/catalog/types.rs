use serde::{Deserialize, Serialize};
use std::fmt;

/// A single card as returned by the catalog API.
///
/// Field names follow the remote JSON payload. Only `name`, `code` and
/// `set_code` are guaranteed; everything else may be missing on older sets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    #[serde(rename = "card_name")]
    pub name: String,
    /// Primary key of the card (e.g. `OP01-001`). Shared by reprints and alt arts.
    #[serde(rename = "card_set_id")]
    pub code: String,
    /// Per-printing identifier (e.g. `OP01-001_p1`).
    #[serde(rename = "card_image_id", default)]
    pub image_id: Option<String>,
    #[serde(rename = "set_id")]
    pub set_code: String,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(rename = "card_color", default)]
    pub color: Option<String>,
    #[serde(default)]
    pub card_type: Option<String>,
    #[serde(rename = "card_cost", default)]
    pub cost: Option<String>,
    #[serde(rename = "card_power", default)]
    pub power: Option<String>,
    #[serde(rename = "card_image", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub market_price: Option<f64>,
}

impl Card {
    /// Stable identity for list rendering.
    pub fn key(&self) -> CardKey {
        CardKey {
            set_code: self.set_code.clone(),
            printing: self.image_id.clone().unwrap_or_else(|| self.code.clone()),
        }
    }

    /// Case-insensitive substring match against the card name.
    ///
    /// `needle` must already be lowercased.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

/// Composite identity of a printed card: set code plus in-set printing id.
///
/// The card code alone is not unique across reprints and alternate arts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardKey {
    pub set_code: String,
    pub printing: String,
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.set_code, self.printing)
    }
}
