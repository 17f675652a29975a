//! Token Calculator - orchestrates validation, normalization and counting
//!
//! Owns a per-model backend cache. Backends are created lazily on first use
//! and live for the calculator's lifetime; the key space is the small fixed
//! registry, so nothing is ever evicted.

use crate::config::ApiCredentials;
use crate::error::Result;
use crate::normalizer;
use crate::registry::{self, BackendFamily};
use crate::tokenizer::{ApproximateTokenizer, ExactTokenizer, TokenizerBackend};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Detailed counting result, produced fresh per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Number of tokens the text consumes for `model`
    pub token_count: usize,
    /// The model the count applies to
    pub model: String,
    /// Character count of the original, pre-normalization text
    pub character_count: usize,
    /// True when the count came from the heuristic path; omitted when false
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_approximate: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Main entry point for token calculation across models.
///
/// Normalization mode and credentials are fixed at construction; the backend
/// cache grows monotonically as models are first used. Safe to share across
/// threads: concurrent cache misses for the same model may construct a
/// backend twice, which wastes work but stays consistent because backends
/// are stateless after construction.
pub struct TokenCalculator {
    normalize_markdown: bool,
    credentials: ApiCredentials,
    backends: RwLock<HashMap<String, Arc<dyn TokenizerBackend>>>,
}

impl TokenCalculator {
    /// Create a calculator, resolving credentials from the environment.
    pub fn new(normalize_markdown: bool) -> Self {
        Self::with_credentials(normalize_markdown, ApiCredentials::from_env())
    }

    /// Create a calculator with injected credentials (tests use this to
    /// avoid environment manipulation).
    pub fn with_credentials(normalize_markdown: bool, credentials: ApiCredentials) -> Self {
        Self {
            normalize_markdown,
            credentials,
            backends: RwLock::new(HashMap::new()),
        }
    }

    /// Whether markdown normalization runs before tokenization.
    pub fn normalizes_markdown(&self) -> bool {
        self.normalize_markdown
    }

    /// Count the tokens `text` consumes for `model`.
    ///
    /// The model is validated first; empty or whitespace-only text
    /// short-circuits to 0 before normalization or backend dispatch.
    pub fn count(&self, text: &str, model: &str) -> Result<usize> {
        let family = registry::backend_family_of(model)?;

        if text.trim().is_empty() {
            return Ok(0);
        }

        let processed: Cow<'_, str> = if self.normalize_markdown {
            Cow::Owned(normalizer::normalize(text))
        } else {
            Cow::Borrowed(text)
        };

        let backend = self.backend_for(model, family)?;
        backend.count_tokens(&processed)
    }

    /// Count tokens and assemble the detailed result record.
    ///
    /// `character_count` always reflects the original text, even when
    /// normalization shrank what was tokenized. `is_approximate` is re-read
    /// from the resolved backend on every call.
    pub fn count_detailed(&self, text: &str, model: &str) -> Result<CalculationResult> {
        let family = registry::backend_family_of(model)?;
        let token_count = self.count(text, model)?;

        let is_approximate = family == BackendFamily::Approximate
            && self.backend_for(model, family)?.is_approximating();

        Ok(CalculationResult {
            token_count,
            model: model.to_string(),
            character_count: text.chars().count(),
            is_approximate,
        })
    }

    /// Get or create the cached backend for a model.
    ///
    /// The family has already been validated by the registry lookup.
    fn backend_for(&self, model: &str, family: BackendFamily) -> Result<Arc<dyn TokenizerBackend>> {
        // Cache hit
        {
            let cache = self.backends.read().unwrap();
            if let Some(backend) = cache.get(model) {
                return Ok(Arc::clone(backend));
            }
        }

        // Construct outside the lock; a concurrent miss may race us here,
        // in which case the first insert wins and the loser is dropped.
        let backend: Arc<dyn TokenizerBackend> = match family {
            BackendFamily::Exact => Arc::new(ExactTokenizer::new(model)?),
            BackendFamily::Approximate => {
                Arc::new(ApproximateTokenizer::new(model, &self.credentials))
            }
        };
        debug!(model, %family, "constructed tokenizer backend");

        let mut cache = self.backends.write().unwrap();
        let entry = cache
            .entry(model.to_string())
            .or_insert_with(|| Arc::clone(&backend));
        Ok(Arc::clone(entry))
    }

    #[cfg(test)]
    fn cached_backend_count(&self) -> usize {
        self.backends.read().unwrap().len()
    }
}
