//! Alert decision engine.
//!
//! A pure, memoryless policy: tenant configuration plus screening outputs
//! in, fire-or-pass out.

use crate::models::{AlertDecision, ScreeningResult, TenantConfig};
use crate::services::scorer::ScoreSemantics;

/// Maps a comparative sentiment score to its fixed display bucket.
pub fn score_label(score: f64) -> &'static str {
    if score <= -1.0 {
        "Very Negative"
    } else if score < 0.0 {
        "Negative"
    } else if score == 0.0 {
        "Neutral"
    } else if score < 1.0 {
        "Positive"
    } else {
        "Very Positive"
    }
}

/// Maps a toxicity probability to its display bucket.
pub fn toxicity_label(score: f64) -> &'static str {
    if score >= 0.75 {
        "Highly Toxic"
    } else if score >= 0.5 {
        "Likely Toxic"
    } else if score >= 0.25 {
        "Possibly Toxic"
    } else {
        "Unlikely Toxic"
    }
}

/// Picks the label family matching the active scorer's scale. Sentiment
/// buckets make no sense for a probability, and vice versa.
pub fn label_for(semantics: ScoreSemantics, score: f64) -> &'static str {
    match semantics {
        ScoreSemantics::LowerIsWorse => score_label(score),
        ScoreSemantics::HigherIsWorse => toxicity_label(score),
    }
}

/// Decides whether a screened message raises an alert.
///
/// Lexical variant (`LowerIsWorse`): fires only when a word-list term
/// matched AND the score is strictly below the tenant's threshold. The
/// conjunction suppresses alerts for mild profanity in otherwise neutral
/// or positive messages.
///
/// Classifier variant (`HigherIsWorse`): fires when the toxicity
/// probability is strictly above the deployment-wide confidence threshold;
/// matched terms are reported but not required.
pub fn decide(
    config: &TenantConfig,
    result: ScreeningResult,
    semantics: ScoreSemantics,
    toxicity_threshold: f64,
) -> AlertDecision {
    let fire = match semantics {
        ScoreSemantics::LowerIsWorse => {
            !result.matched_terms.is_empty() && result.score < config.negative_threshold
        }
        ScoreSemantics::HigherIsWorse => result.score > toxicity_threshold,
    };
    AlertDecision { fire, result }
}
