//! Vote aggregation across the trend label and indicator signals.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::domain::signal::SignalCategory;
use crate::domain::trend::TrendLabel;

pub const BULLISH_NARRATIVE: &str = "Technical analysis shows positive prospects. \
Most indicators point to an upward trend in the short term. However, the crypto \
market is highly volatile and investors should stay careful.";

pub const BEARISH_NARRATIVE: &str = "Technical analysis shows negative indications. \
Most indicators point to a downward trend in the short term. Caution is advised \
because of possible further price corrections.";

pub const MIXED_NARRATIVE: &str = "Technical analysis shows mixed signals. There is \
no clear direction and the market seems to be waiting for a catalyst. Monitor the \
data closely and move carefully.";

/// Vote counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SignalTally {
    pub bullish: usize,
    pub neutral_bullish: usize,
    pub neutral: usize,
    pub neutral_bearish: usize,
    pub bearish: usize,
}

impl SignalTally {
    pub fn record(&mut self, category: SignalCategory) {
        *self.slot(category) += 1;
    }

    pub fn count(&self, category: SignalCategory) -> usize {
        match category {
            SignalCategory::Bullish => self.bullish,
            SignalCategory::NeutralBullish => self.neutral_bullish,
            SignalCategory::Neutral => self.neutral,
            SignalCategory::NeutralBearish => self.neutral_bearish,
            SignalCategory::Bearish => self.bearish,
        }
    }

    pub fn total(&self) -> usize {
        SignalCategory::TALLY_ORDER.iter().map(|c| self.count(*c)).sum()
    }

    /// First category in tally order holding the highest count.
    pub fn dominant(&self) -> SignalCategory {
        let mut best = SignalCategory::TALLY_ORDER[0];
        for category in SignalCategory::TALLY_ORDER {
            if self.count(category) > self.count(best) {
                best = category;
            }
        }
        best
    }

    fn slot(&mut self, category: SignalCategory) -> &mut usize {
        match category {
            SignalCategory::Bullish => &mut self.bullish,
            SignalCategory::NeutralBullish => &mut self.neutral_bullish,
            SignalCategory::Neutral => &mut self.neutral,
            SignalCategory::NeutralBearish => &mut self.neutral_bearish,
            SignalCategory::Bearish => &mut self.bearish,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outlook {
    Bullish,
    Bearish,
    Mixed,
}

impl Outlook {
    pub fn narrative(&self) -> &'static str {
        match self {
            Outlook::Bullish => BULLISH_NARRATIVE,
            Outlook::Bearish => BEARISH_NARRATIVE,
            Outlook::Mixed => MIXED_NARRATIVE,
        }
    }
}

impl fmt::Display for Outlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outlook::Bullish => "bullish",
            Outlook::Bearish => "bearish",
            Outlook::Mixed => "mixed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub tally: SignalTally,
    pub dominant: SignalCategory,
    pub outlook: Outlook,
    pub narrative: String,
}

/// Tally one vote for the trend (when known) and one per available signal,
/// then pick the dominant category and the overall outlook.
///
/// With no votes at all every count is zero and the tie rule makes
/// `Bullish` dominant.
pub fn aggregate(trend: Option<TrendLabel>, signals: &[Option<SignalCategory>]) -> Verdict {
    let mut tally = SignalTally::default();
    if let Some(label) = trend {
        tally.record(label.vote());
    }
    for signal in signals.iter().flatten() {
        tally.record(*signal);
    }

    let dominant = tally.dominant();
    let outlook = if dominant == SignalCategory::Bullish || tally.bullish > 1 {
        Outlook::Bullish
    } else if dominant == SignalCategory::Bearish || tally.bearish > 1 {
        Outlook::Bearish
    } else {
        Outlook::Mixed
    };

    debug!(?tally, %dominant, %outlook, "aggregated signals");

    Verdict {
        tally,
        dominant,
        outlook,
        narrative: outlook.narrative().to_string(),
    }
}
