//! Remote toxicity classifier scorer.
//!
//! Wraps a scoring HTTP endpoint behind the domain `Scorer` trait. The
//! model behind the endpoint loads lazily on its side, so the relay sends
//! one warm-up request at startup and refuses to serve traffic until it
//! succeeds. After warm-up the scorer is read-only shared state.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use domain::services::{ScoreSemantics, Scorer, ScorerError};

/// Per-request timeout for the scoring endpoint.
const SCORER_TIMEOUT_SECS: u64 = 10;

/// Warm-up can take much longer while the model loads.
const WARMUP_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Serialize)]
struct ScoreRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ScoreResponse {
    score: f64,
}

/// HTTP-backed toxicity scorer.
pub struct RemoteScorer {
    client: Client,
    url: String,
}

impl RemoteScorer {
    pub fn new(url: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(SCORER_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// One-time warm-up performed before the server accepts traffic.
    pub async fn warm_up(&self) -> Result<(), ScorerError> {
        let start = std::time::Instant::now();
        let score = self
            .request("warm-up", Duration::from_secs(WARMUP_TIMEOUT_SECS))
            .await?;
        info!(
            url = %self.url,
            score = score,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Scoring backend warmed up"
        );
        Ok(())
    }

    async fn request(&self, text: &str, timeout: Duration) -> Result<f64, ScorerError> {
        let response = self
            .client
            .post(&self.url)
            .timeout(timeout)
            .json(&ScoreRequest { text })
            .send()
            .await
            .map_err(|e| ScorerError::Backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScorerError::Backend(format!(
                "scoring endpoint returned status {}",
                status.as_u16()
            )));
        }

        let parsed: ScoreResponse = response
            .json()
            .await
            .map_err(|e| ScorerError::InvalidResponse(e.to_string()))?;

        if !parsed.score.is_finite() || !(0.0..=1.0).contains(&parsed.score) {
            return Err(ScorerError::InvalidResponse(format!(
                "score {} outside [0, 1]",
                parsed.score
            )));
        }
        Ok(parsed.score)
    }
}

#[async_trait]
impl Scorer for RemoteScorer {
    async fn score(&self, text: &str) -> Result<f64, ScorerError> {
        self.request(text, Duration::from_secs(SCORER_TIMEOUT_SECS))
            .await
    }

    fn semantics(&self) -> ScoreSemantics {
        ScoreSemantics::HigherIsWorse
    }
}
