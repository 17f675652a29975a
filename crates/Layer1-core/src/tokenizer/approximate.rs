//! Approximate tokenizer backend (remote count_tokens API / local heuristic)

use crate::config::ApiCredentials;
use crate::error::{Error, Result};
use crate::registry::BackendFamily;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::TokenizerBackend;

const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Configuration for the remote counting capability.
#[derive(Debug, Clone)]
pub struct RemoteCountingConfig {
    /// API key
    pub api_key: String,
    /// Base URL (default: https://api.anthropic.com)
    pub base_url: String,
    /// Model ID sent with each counting request
    pub model: String,
}

impl RemoteCountingConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: ANTHROPIC_BASE_URL.to_string(),
            model: model.into(),
        }
    }

    /// Override the endpoint base URL (tests point this at a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Counting strategy, committed once at construction.
enum CountingStrategy {
    /// One blocking counting request per call, no retry.
    Remote(RemoteCounter),
    /// Zero-dependency char/word estimation.
    Heuristic,
}

/// Approximate backend for models without a local exact encoder.
///
/// With a credential the backend issues one remote counting request per
/// call; without one it estimates from character and word counts. The
/// strategy never switches mid-lifetime, even if a credential appears later.
pub struct ApproximateTokenizer {
    model: String,
    strategy: CountingStrategy,
}

impl ApproximateTokenizer {
    /// Create an approximate backend bound to `model`.
    ///
    /// Credential absence is not an error; it silently selects the
    /// heuristic path.
    pub fn new(model: &str, credentials: &ApiCredentials) -> Self {
        let strategy = match &credentials.anthropic_api_key {
            Some(key) if !key.is_empty() => CountingStrategy::Remote(RemoteCounter::new(
                RemoteCountingConfig::new(key, model),
            )),
            _ => {
                debug!(model, "no counting credential; using heuristic estimation");
                CountingStrategy::Heuristic
            }
        };

        Self {
            model: model.to_string(),
            strategy,
        }
    }

    /// Create a backend that counts via an explicitly configured remote.
    pub fn with_remote(model: &str, config: RemoteCountingConfig) -> Self {
        Self {
            model: model.to_string(),
            strategy: CountingStrategy::Remote(RemoteCounter::new(config)),
        }
    }

    /// Estimate the token count from character and word statistics.
    ///
    /// Claude-family text averages roughly 3.7 characters or 0.77 words per
    /// token; the two estimates are averaged and rounded half up. The
    /// constants are empirical and kept for compatibility.
    pub fn heuristic_count(text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }

        let char_count = text.chars().count() as f64;
        let word_count = text.split_whitespace().count() as f64;

        let char_based = char_count / 3.7;
        let word_based = word_count * 1.3;

        let estimated = ((char_based + word_based) / 2.0 + 0.5).floor() as usize;

        // At least one token for any non-empty text
        estimated.max(1)
    }
}

impl TokenizerBackend for ApproximateTokenizer {
    fn family(&self) -> BackendFamily {
        BackendFamily::Approximate
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        // No token ids are available for this family; return a placeholder
        // sequence whose only meaning is its length.
        let count = self.count_tokens(text)?;
        Ok((0..count as u32).collect())
    }

    fn count_tokens(&self, text: &str) -> Result<usize> {
        match &self.strategy {
            CountingStrategy::Remote(counter) => counter.count(text),
            CountingStrategy::Heuristic => Ok(Self::heuristic_count(text)),
        }
    }

    fn is_approximating(&self) -> bool {
        matches!(self.strategy, CountingStrategy::Heuristic)
    }
}

// ============================================================================
// Remote counter (Anthropic count_tokens endpoint)
// ============================================================================

struct RemoteCounter {
    agent: ureq::Agent,
    config: RemoteCountingConfig,
}

impl RemoteCounter {
    fn new(config: RemoteCountingConfig) -> Self {
        Self {
            agent: ureq::agent(),
            config,
        }
    }

    /// Issue one blocking counting request. Single attempt, no retry; any
    /// failure surfaces as `Error::BackendUnavailable`. Error messages carry
    /// the transport detail but never the credential.
    fn count(&self, text: &str) -> Result<usize> {
        let url = format!("{}/v1/messages/count_tokens", self.config.base_url);

        let request = CountTokensRequest {
            model: &self.config.model,
            messages: vec![CountMessage {
                role: "user",
                content: text,
            }],
        };

        let response = self
            .agent
            .post(&url)
            .set("x-api-key", &self.config.api_key)
            .set("anthropic-version", ANTHROPIC_VERSION)
            .set("content-type", "application/json")
            .send_json(&request);

        match response {
            Ok(resp) => {
                let parsed: CountTokensResponse = resp.into_json().map_err(|e| {
                    Error::BackendUnavailable(format!(
                        "malformed count_tokens response: {e}"
                    ))
                })?;
                Ok(parsed.input_tokens)
            }
            Err(ureq::Error::Status(code, _)) => Err(Error::BackendUnavailable(format!(
                "count_tokens request returned HTTP {code}"
            ))),
            Err(ureq::Error::Transport(transport)) => Err(Error::BackendUnavailable(
                format!("count_tokens transport error: {transport}"),
            )),
        }
    }
}

// ============================================================================
// Anthropic API types
// ============================================================================

#[derive(Debug, Serialize)]
struct CountTokensRequest<'a> {
    model: &'a str,
    messages: Vec<CountMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct CountMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CountTokensResponse {
    input_tokens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic_empty_text() {
        assert_eq!(ApproximateTokenizer::heuristic_count(""), 0);
    }

    #[test]
    fn test_heuristic_lower_bound() {
        // Any non-empty text estimates to at least one token
        assert!(ApproximateTokenizer::heuristic_count("a") >= 1);
        assert!(ApproximateTokenizer::heuristic_count(".") >= 1);
        assert!(ApproximateTokenizer::heuristic_count("Hello") >= 1);
    }

    #[test]
    fn test_heuristic_formula() {
        // "Hello world" -> chars 11/3.7 = 2.973, words 2*1.3 = 2.6,
        // avg 2.786, +0.5 floor -> 3
        assert_eq!(ApproximateTokenizer::heuristic_count("Hello world"), 3);
    }

    #[test]
    fn test_heuristic_scales_with_length() {
        let short = ApproximateTokenizer::heuristic_count("one two three");
        let long = ApproximateTokenizer::heuristic_count(
            "one two three four five six seven eight nine ten eleven twelve",
        );
        assert!(long > short);
    }

    #[test]
    fn test_without_credential_uses_heuristic() {
        let tokenizer = ApproximateTokenizer::new("claude-3-opus", &ApiCredentials::none());
        assert!(tokenizer.is_approximating());
        assert_eq!(tokenizer.family(), BackendFamily::Approximate);
        assert!(tokenizer.count_tokens("Hello").unwrap() >= 1);
    }

    #[test]
    fn test_with_credential_selects_remote() {
        let creds = ApiCredentials::with_anthropic_key("sk-test");
        let tokenizer = ApproximateTokenizer::new("claude-3-opus", &creds);
        // Remote path is authoritative, not approximating
        assert!(!tokenizer.is_approximating());
    }

    #[test]
    fn test_empty_credential_selects_heuristic() {
        let creds = ApiCredentials {
            anthropic_api_key: Some(String::new()),
        };
        let tokenizer = ApproximateTokenizer::new("claude-2", &creds);
        assert!(tokenizer.is_approximating());
    }

    #[test]
    fn test_encode_placeholder_length_matches_count() {
        let tokenizer = ApproximateTokenizer::new("claude-3-sonnet", &ApiCredentials::none());
        let text = "Some text to estimate";
        let ids = tokenizer.encode(text).unwrap();
        assert_eq!(ids.len(), tokenizer.count_tokens(text).unwrap());
    }

    #[test]
    fn test_unreachable_remote_errors() {
        // Port 9 (discard) refuses connections; the single attempt must
        // surface as BackendUnavailable, never fall back to the heuristic
        let config = RemoteCountingConfig::new("sk-test", "claude-3-opus")
            .with_base_url("http://127.0.0.1:9");
        let tokenizer = ApproximateTokenizer::with_remote("claude-3-opus", config);
        let err = tokenizer.count_tokens("Hello").unwrap_err();
        assert!(matches!(err, Error::BackendUnavailable(_)));
        // The credential never leaks into the error text
        assert!(!err.to_string().contains("sk-test"));
    }
}
