//! Scorer abstraction over the two scoring strategies.
//!
//! The decision engine is written against this capability plus its declared
//! semantics, so the lexicon sentiment scorer and the remote toxicity
//! classifier are interchangeable without touching decision logic. The
//! classifier transport lives in the api crate; only its contract is known
//! here.

use std::collections::HashMap;

use thiserror::Error;

use crate::services::lexicon;
use crate::services::scanner;

/// Which direction on the scorer's scale means "worse".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSemantics {
    /// Comparative sentiment: typically [-5, +5], lower is more negative.
    LowerIsWorse,
    /// Toxicity probability: [0, 1], higher is more toxic.
    HigherIsWorse,
}

/// Errors from a scoring backend.
#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("scoring backend request failed: {0}")]
    Backend(String),

    #[error("scoring backend returned an unusable response: {0}")]
    InvalidResponse(String),
}

/// A message-scoring capability.
#[async_trait::async_trait]
pub trait Scorer: Send + Sync {
    /// Scores a message. The meaning of the number is given by `semantics`.
    async fn score(&self, text: &str) -> Result<f64, ScorerError>;

    /// The scale direction this scorer reports on.
    fn semantics(&self) -> ScoreSemantics;
}

/// Lexicon-based comparative sentiment scorer.
///
/// Sums the valence of every known token and divides by the total token
/// count, so long neutral messages dilute isolated negative words.
pub struct LexiconScorer {
    valences: HashMap<String, f64>,
}

impl LexiconScorer {
    /// Scorer backed by the built-in valence table.
    pub fn new() -> Self {
        Self {
            valences: lexicon::default_valences(),
        }
    }

    /// Scorer backed by a caller-supplied valence table.
    pub fn with_valences(valences: HashMap<String, f64>) -> Self {
        Self { valences }
    }

    fn comparative(&self, text: &str) -> f64 {
        let tokens = scanner::tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }
        let sum: f64 = tokens
            .iter()
            .filter_map(|t| self.valences.get(&t.to_lowercase()))
            .sum();
        sum / tokens.len() as f64
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Scorer for LexiconScorer {
    async fn score(&self, text: &str) -> Result<f64, ScorerError> {
        Ok(self.comparative(text))
    }

    fn semantics(&self) -> ScoreSemantics {
        ScoreSemantics::LowerIsWorse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_negative_message_scores_below_zero() {
        let scorer = LexiconScorer::new();
        let score = scorer
            .score("this is the worst service ever")
            .await
            .unwrap();
        assert!(score < 0.0, "score was {score}");
    }

    #[tokio::test]
    async fn test_positive_message_scores_above_zero() {
        let scorer = LexiconScorer::new();
        let score = scorer.score("thanks, this is great").await.unwrap();
        assert!(score > 0.0, "score was {score}");
    }

    #[tokio::test]
    async fn test_neutral_message_scores_zero() {
        let scorer = LexiconScorer::new();
        let score = scorer.score("the invoice arrived on tuesday").await.unwrap();
        assert_eq!(score, 0.0);
    }

    #[tokio::test]
    async fn test_empty_text_scores_zero() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score("").await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_comparative_is_length_normalized() {
        let scorer = LexiconScorer::new();
        let short = scorer.score("awful").await.unwrap();
        let diluted = scorer
            .score("awful but otherwise the delivery arrived on time as promised")
            .await
            .unwrap();
        assert!(diluted > short, "dilution should soften the score");
        assert!(diluted < 0.0);
    }

    #[tokio::test]
    async fn test_custom_valence_table() {
        let mut valences = HashMap::new();
        valences.insert("meh".to_string(), -1.0);
        let scorer = LexiconScorer::with_valences(valences);
        assert_eq!(scorer.score("meh").await.unwrap(), -1.0);
        // Built-in words are unknown to a custom table
        assert_eq!(scorer.score("awful").await.unwrap(), 0.0);
    }

    #[test]
    fn test_lexicon_scorer_semantics() {
        assert_eq!(LexiconScorer::new().semantics(), ScoreSemantics::LowerIsWorse);
    }
}
