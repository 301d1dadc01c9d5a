//! Known Set Universe
//!
//! The catalog API has no endpoint that lists sets in release order, so the
//! booster sets searched by default are listed here, newest first.

pub const KNOWN_SETS: &[&str] = &[
    "OP-11", "OP-10", "OP-09", "OP-08", "OP-07", "OP-06", "OP-05", "OP-04", "OP-03", "OP-02",
    "OP-01",
];

/// Returns the known universe as owned keys, newest first.
pub fn known_sets() -> Vec<String> {
    KNOWN_SETS.iter().map(|code| code.to_string()).collect()
}

/// Returns `true` if `code` is one of the known sets (case-insensitive).
pub fn is_known_set(code: &str) -> bool {
    KNOWN_SETS.iter().any(|known| known.eq_ignore_ascii_case(code))
}
