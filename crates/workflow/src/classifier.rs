//! Intent classification for supervisor routing.
//!
//! Deliberately simple substring matching over fixed keyword sets, kept
//! behind a trait so a model-backed classifier can replace it without
//! touching the state machine. Routing must stay deterministic: the first
//! matching set in the fixed priority order wins, regardless of how many
//! keywords match.

/// A classified request intent, in routing priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Information gathering ("what is", "find", ...)
    Research,
    /// Application portfolio work
    Portfolio,
    /// Business continuity / disaster recovery work
    Continuity,
    /// Technology strategy and roadmaps
    Strategy,
    /// Cloud migration and modernization
    Cloud,
}

/// Classifies a request's text into an intent.
pub trait IntentClassifier: Send + Sync {
    /// Returns the matched intent, or `None` when no keyword set matches.
    fn classify(&self, text: &str) -> Option<Intent>;
}

const RESEARCH_KEYWORDS: &[&str] = &["search", "find", "research", "information", "what is"];
const PORTFOLIO_KEYWORDS: &[&str] = &["application", "portfolio", "rationalization"];
const CONTINUITY_KEYWORDS: &[&str] = &["disaster", "recovery", "continuity", "bcdr"];
const STRATEGY_KEYWORDS: &[&str] = &["strategy", "roadmap", "architecture"];
const CLOUD_KEYWORDS: &[&str] = &["cloud", "aws", "azure", "migration"];

/// Case-insensitive keyword classifier over the five fixed intent sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Option<Intent> {
        let lower = text.to_lowercase();
        let matches = |keywords: &[&str]| keywords.iter().any(|kw| lower.contains(kw));

        // Priority order is fixed; the first satisfied set wins.
        if matches(RESEARCH_KEYWORDS) {
            Some(Intent::Research)
        } else if matches(PORTFOLIO_KEYWORDS) {
            Some(Intent::Portfolio)
        } else if matches(CONTINUITY_KEYWORDS) {
            Some(Intent::Continuity)
        } else if matches(STRATEGY_KEYWORDS) {
            Some(Intent::Strategy)
        } else if matches(CLOUD_KEYWORDS) {
            Some(Intent::Cloud)
        } else {
            None
        }
    }
}
