//! Signal categories and interpretations.

use serde::Serialize;
use std::fmt;

/// Discretized sentiment of an indicator reading, ordered by bullishness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalCategory {
    Bearish,
    NeutralBearish,
    Neutral,
    NeutralBullish,
    Bullish,
}

impl SignalCategory {
    /// Order in which the aggregator tallies categories and breaks ties.
    pub const TALLY_ORDER: [SignalCategory; 5] = [
        SignalCategory::Bullish,
        SignalCategory::NeutralBullish,
        SignalCategory::Neutral,
        SignalCategory::NeutralBearish,
        SignalCategory::Bearish,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalCategory::Bearish => "bearish",
            SignalCategory::NeutralBearish => "neutral-bearish",
            SignalCategory::Neutral => "neutral",
            SignalCategory::NeutralBullish => "neutral-bullish",
            SignalCategory::Bullish => "bullish",
        }
    }
}

impl fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Narrative plus signal for one indicator. `signal` is `None` when the
/// indicator could not be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpretation {
    pub narrative: String,
    pub signal: Option<SignalCategory>,
}

impl Interpretation {
    pub fn new(narrative: impl Into<String>, signal: SignalCategory) -> Self {
        Self {
            narrative: narrative.into(),
            signal: Some(signal),
        }
    }

    /// Fixed narrative for an indicator without enough data.
    pub fn insufficient(indicator: &str) -> Self {
        Self {
            narrative: format!("Cannot interpret {} - insufficient data", indicator),
            signal: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_ordered_by_bullishness() {
        assert!(SignalCategory::Bearish < SignalCategory::NeutralBearish);
        assert!(SignalCategory::NeutralBearish < SignalCategory::Neutral);
        assert!(SignalCategory::Neutral < SignalCategory::NeutralBullish);
        assert!(SignalCategory::NeutralBullish < SignalCategory::Bullish);
    }

    #[test]
    fn tally_order_covers_every_category_once() {
        let mut sorted = SignalCategory::TALLY_ORDER.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 5);
    }

    #[test]
    fn display_uses_wire_names() {
        assert_eq!(SignalCategory::NeutralBullish.to_string(), "neutral-bullish");
        assert_eq!(SignalCategory::Bearish.to_string(), "bearish");
    }

    #[test]
    fn serializes_kebab_case() {
        let json = serde_json::to_string(&SignalCategory::NeutralBearish).unwrap();
        assert_eq!(json, "\"neutral-bearish\"");
    }

    #[test]
    fn insufficient_has_no_signal() {
        let i = Interpretation::insufficient("RSI");
        assert!(i.signal.is_none());
        assert_eq!(i.narrative, "Cannot interpret RSI - insufficient data");
    }
}
