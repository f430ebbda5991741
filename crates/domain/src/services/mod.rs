//! Screening services: scanner, scorer, decision engine, content builder.

pub mod content;
pub mod decision;
pub mod lexicon;
pub mod scanner;
pub mod scorer;

pub use content::{AlertContent, NotificationAction, NotificationField, NotificationPayload};
pub use decision::{decide, label_for, score_label, toxicity_label};
pub use scorer::{LexiconScorer, ScoreSemantics, Scorer, ScorerError};
