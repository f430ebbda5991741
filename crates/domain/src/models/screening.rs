//! Transient screening outputs.

/// Combined output of the lexical scanner and the scorer for one message.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningResult {
    /// Matched word-list terms, deduplicated case-insensitively, original
    /// surface casing preserved.
    pub matched_terms: Vec<String>,
    /// Comparative sentiment (lexicon variant) or toxicity probability
    /// (classifier variant).
    pub score: f64,
    /// Fixed five-bucket human-readable label for the score.
    pub score_label: &'static str,
}

/// The decision engine's verdict for one message. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertDecision {
    pub fire: bool,
    pub result: ScreeningResult,
}
