//! Query-type classifier — routes a free-text query to one of the two
//! canned demo presentations.
//!
//! Deterministic, pure function of the input text: case-insensitive
//! substring match against a fixed keyword list. Anything that does not
//! look like an agriculture query falls through to flood risk.

use serde::{Deserialize, Serialize};

/// The two analysis presentations the demo can route to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    #[default]
    Flood,
    Crop,
}

impl QueryKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flood => "flood",
            Self::Crop => "crop",
        }
    }
}

/// Keywords that route a query to the crop-classification presentation.
const CROP_KEYWORDS: [&str; 9] = [
    "crop",
    "agriculture",
    "farming",
    "wheat",
    "potato",
    "plantation",
    "classification",
    "hoshiarpur",
    "rabi",
];

/// Classify a free-text query. Returns [`QueryKind::Crop`] iff the
/// lowercased query contains at least one crop keyword as a substring.
#[must_use]
pub fn classify(query: &str) -> QueryKind {
    let lower = query.to_lowercase();
    if CROP_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        QueryKind::Crop
    } else {
        QueryKind::Flood
    }
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
