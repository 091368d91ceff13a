//! Sentiment scoring backends.
//!
//! Exactly one backend is active per process, selected from configuration;
//! the pipeline only ever sees [`SentimentScorer::score`]. Scores are in
//! `[0, 1]` with `0.5` neutral, rounded to 3 decimal places for storage
//! stability.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use newsvane_core::{AppConfig, SentimentBackendKind};

const DEFAULT_REMOTE_MODEL_URL: &str =
    "https://router.huggingface.co/hf-inference/models/distilbert/distilbert-base-uncased-finetuned-sst-2-english";

#[derive(Debug, Error)]
pub enum ScorerError {
    /// The backend is unreachable or misconfigured. Enrichment of the
    /// affected article is skipped, not defaulted to neutral, so failures
    /// stay visible instead of silently diluting aggregates.
    #[error("sentiment backend unavailable: {0}")]
    Unavailable(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// General news lexicon, AFINN-style signed word weights.
///
/// Keys are lowercase single words. The summed raw score is squashed
/// through a sigmoid, so individual weights only need relative ordering.
const LEXICON: &[(&str, i32)] = &[
    // Positive signals
    ("agreement", 1),
    ("approve", 2),
    ("approved", 2),
    ("best", 3),
    ("boost", 2),
    ("breakthrough", 3),
    ("excellent", 3),
    ("gain", 2),
    ("gains", 2),
    ("good", 3),
    ("great", 3),
    ("growth", 2),
    ("hope", 2),
    ("improve", 2),
    ("improved", 2),
    ("love", 3),
    ("momentum", 1),
    ("positive", 2),
    ("progress", 2),
    ("record", 1),
    ("recovery", 2),
    ("strong", 2),
    ("success", 2),
    ("successful", 2),
    ("support", 2),
    ("victory", 4),
    ("win", 4),
    ("wins", 4),
    // Negative signals
    ("ban", -2),
    ("banned", -2),
    ("collapse", -3),
    ("conflict", -3),
    ("corruption", -3),
    ("crash", -2),
    ("crisis", -3),
    ("cut", -1),
    ("death", -3),
    ("decline", -2),
    ("fail", -2),
    ("failed", -2),
    ("failure", -2),
    ("fear", -2),
    ("fraud", -4),
    ("loss", -3),
    ("protest", -2),
    ("recession", -2),
    ("risk", -2),
    ("scandal", -3),
    ("stall", -2),
    ("strike", -2),
    ("threat", -2),
    ("war", -3),
    ("warning", -3),
    ("worst", -3),
];

/// Round to 3 decimal places for storage stability.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Lexicon-based scorer. Deterministic, never fails, no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    /// Score a text in `[0, 1]`.
    ///
    /// Sums matching word weights over lowercase alphabetic-trimmed tokens,
    /// clamps the raw sum to `[-10, 10]`, and squashes it through the
    /// sigmoid `1 / (1 + e^(-x/2))` so neutral text lands on exactly `0.5`.
    /// Blank text yields exactly `0.5`.
    #[must_use]
    pub fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.5;
        }

        let mut raw = 0i32;
        for word in text.split_whitespace() {
            let w = word
                .trim_matches(|c: char| !c.is_alphabetic())
                .to_lowercase();
            for &(lex_word, weight) in LEXICON {
                if w == lex_word {
                    raw += weight;
                    break;
                }
            }
        }

        let x = f64::from(raw).clamp(-10.0, 10.0);
        round3(1.0 / (1.0 + (-x / 2.0).exp()))
    }
}

#[derive(Debug, Deserialize)]
struct RemoteLabelScore {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    score: f64,
}

/// Scorer backed by a hosted sentiment-classification model.
///
/// Not deterministic across model versions; the active model is pinned by
/// URL so scores are stable for a given deployment.
#[derive(Debug, Clone)]
pub struct RemoteScorer {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl RemoteScorer {
    /// Creates a scorer against the default hosted model.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: &str) -> Result<Self, ScorerError> {
        Self::with_endpoint(api_key, DEFAULT_REMOTE_MODEL_URL)
    }

    /// Creates a scorer against a custom endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::Http`] if the HTTP client cannot be built.
    pub fn with_endpoint(api_key: &str, endpoint: &str) -> Result<Self, ScorerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint: endpoint.to_owned(),
        })
    }

    /// Score a text in `[0, 1]` via the hosted model.
    ///
    /// `POSITIVE` maps to `0.5 + confidence/2`, `NEGATIVE` to
    /// `0.5 - confidence/2`, anything else to neutral `0.5`. Blank text
    /// short-circuits to `0.5` without a network call.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::Unavailable`] on a non-success response and
    /// [`ScorerError::Http`] on network failure.
    pub async fn score(&self, text: &str) -> Result<f64, ScorerError> {
        if text.trim().is_empty() {
            return Ok(0.5);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "inputs": text }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScorerError::Unavailable(format!(
                "model endpoint returned {status}: {body}"
            )));
        }

        let scores: Vec<RemoteLabelScore> = response.json().await?;
        let value = match scores.first() {
            Some(first) => match first.label.as_deref() {
                Some("POSITIVE") => 0.5 + first.score / 2.0,
                Some("NEGATIVE") => 0.5 - first.score / 2.0,
                _ => 0.5,
            },
            None => 0.5,
        };

        Ok(round3(value.clamp(0.0, 1.0)))
    }
}

/// The process-wide sentiment scorer, one backend active at a time.
#[derive(Debug, Clone)]
pub enum SentimentScorer {
    Lexicon(LexiconScorer),
    Remote(RemoteScorer),
}

impl SentimentScorer {
    /// Selects and constructs the backend named by configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::Unavailable`] if the remote backend is
    /// selected without an `HF_API_KEY`, so misconfiguration surfaces at
    /// startup instead of on the first scored article.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScorerError> {
        match config.sentiment_backend {
            SentimentBackendKind::Lexicon => Ok(Self::Lexicon(LexiconScorer)),
            SentimentBackendKind::Remote => {
                let api_key = config.hf_api_key.as_deref().ok_or_else(|| {
                    ScorerError::Unavailable("HF_API_KEY is not set".to_string())
                })?;
                Ok(Self::Remote(RemoteScorer::new(api_key)?))
            }
        }
    }

    /// Score a text in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError`] if the active backend fails; the lexicon
    /// backend never does.
    pub async fn score(&self, text: &str) -> Result<f64, ScorerError> {
        match self {
            Self::Lexicon(scorer) => Ok(scorer.score(text)),
            Self::Remote(scorer) => scorer.score(text).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn empty_string_is_neutral() {
        assert_eq!(LexiconScorer.score(""), 0.5);
    }

    #[test]
    fn whitespace_only_is_neutral() {
        assert_eq!(LexiconScorer.score("   "), 0.5);
    }

    #[test]
    fn unknown_text_is_neutral() {
        assert_eq!(LexiconScorer.score("the quick brown fox"), 0.5);
    }

    #[test]
    fn positive_keyword_scores_above_neutral() {
        let score = LexiconScorer.score("a great breakthrough for the talks");
        assert!(score > 0.5, "expected positive score, got {score}");
    }

    #[test]
    fn negative_keyword_scores_below_neutral() {
        let score = LexiconScorer.score("markets crash amid recession fear");
        assert!(score < 0.5, "expected negative score, got {score}");
    }

    #[test]
    fn score_is_deterministic() {
        let text = "climate policy gains momentum after record agreement";
        assert_eq!(LexiconScorer.score(text), LexiconScorer.score(text));
    }

    #[test]
    fn score_stays_in_unit_interval_under_stacked_words() {
        let positive = "win win win victory victory breakthrough excellent great good";
        let negative = "war crisis collapse fraud scandal worst failure death loss";
        let hi = LexiconScorer.score(positive);
        let lo = LexiconScorer.score(negative);
        assert!(hi > 0.9 && hi <= 1.0, "expected near-1 score, got {hi}");
        assert!(lo < 0.1 && lo >= 0.0, "expected near-0 score, got {lo}");
    }

    #[test]
    fn punctuation_is_stripped_from_tokens() {
        let score = LexiconScorer.score("Victory!");
        assert!(score > 0.5, "expected positive score for 'Victory!', got {score}");
    }

    #[test]
    fn score_is_rounded_to_three_decimals() {
        let score = LexiconScorer.score("good news about the agreement");
        assert_eq!(score, round3(score));
    }

    #[tokio::test]
    async fn remote_scorer_maps_positive_label() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "label": "POSITIVE", "score": 0.9 }
            ])))
            .mount(&server)
            .await;

        let scorer = RemoteScorer::with_endpoint("test-key", &server.uri()).unwrap();
        let score = scorer.score("great news").await.unwrap();
        assert_eq!(score, 0.95);
    }

    #[tokio::test]
    async fn remote_scorer_maps_negative_label() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "label": "NEGATIVE", "score": 0.8 }
            ])))
            .mount(&server)
            .await;

        let scorer = RemoteScorer::with_endpoint("test-key", &server.uri()).unwrap();
        let score = scorer.score("terrible news").await.unwrap();
        assert_eq!(score, 0.1);
    }

    #[tokio::test]
    async fn remote_scorer_blank_text_skips_the_network() {
        // No mock mounted: a network call would fail the test.
        let scorer = RemoteScorer::with_endpoint("test-key", "http://127.0.0.1:9").unwrap();
        assert_eq!(scorer.score("   ").await.unwrap(), 0.5);
    }

    #[tokio::test]
    async fn remote_scorer_non_success_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
            .mount(&server)
            .await;

        let scorer = RemoteScorer::with_endpoint("test-key", &server.uri()).unwrap();
        let err = scorer.score("text").await.expect_err("should fail on 503");
        assert!(
            matches!(err, ScorerError::Unavailable(ref msg) if msg.contains("model loading")),
            "expected Unavailable, got: {err:?}"
        );
    }

    #[test]
    fn from_config_remote_without_key_fails_at_construction() {
        let config = test_config(SentimentBackendKind::Remote, None);
        let result = SentimentScorer::from_config(&config);
        assert!(
            matches!(result, Err(ScorerError::Unavailable(_))),
            "expected Unavailable, got ok={}",
            result.is_ok()
        );
    }

    #[test]
    fn from_config_defaults_to_lexicon() {
        let config = test_config(SentimentBackendKind::Lexicon, None);
        let scorer = SentimentScorer::from_config(&config).unwrap();
        assert!(matches!(scorer, SentimentScorer::Lexicon(_)));
    }

    fn test_config(
        backend: SentimentBackendKind,
        hf_api_key: Option<String>,
    ) -> AppConfig {
        use newsvane_core::{Country, Environment};
        use std::net::{IpAddr, Ipv4Addr, SocketAddr};

        AppConfig {
            database_url: "postgres://example".to_string(),
            env: Environment::Test,
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 4000),
            log_level: "info".to_string(),
            newsapi_key: None,
            newsapi_base_url: None,
            newsapi_timeout_secs: 30,
            hf_api_key,
            sentiment_backend: backend,
            db_max_connections: 10,
            db_min_connections: 1,
            db_acquire_timeout_secs: 10,
            ingest_terms: vec![],
            ingest_country: Country::Se,
            ingest_days: 2,
            ingest_page_size: 20,
            ingest_domains: None,
            ingest_max_pages: 2,
            ingest_sleep_ms: 0,
        }
    }
}
