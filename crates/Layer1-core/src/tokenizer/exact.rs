//! Exact tokenizer backend (tiktoken BPE)

use crate::error::{Error, Result};
use crate::registry::BackendFamily;

use super::traits::TokenizerBackend;

/// Exact backend delegating to the tiktoken subword encoder.
///
/// The encoder is resolved from the model name; models the tiktoken tables
/// do not recognize fall back to the `cl100k_base` encoding.
pub struct ExactTokenizer {
    model: String,
    encoder: tiktoken_rs::CoreBPE,
}

impl ExactTokenizer {
    /// Create an exact backend bound to `model`.
    ///
    /// Fails loudly with `Error::MissingDependency` when no encoder can be
    /// initialized at all; the exact family never degrades to estimation.
    pub fn new(model: &str) -> Result<Self> {
        let encoder = match tiktoken_rs::get_bpe_from_model(model) {
            Ok(bpe) => bpe,
            Err(_) => tiktoken_rs::cl100k_base().map_err(|e| {
                Error::MissingDependency(format!(
                    "tiktoken cl100k_base encoder unavailable: {e}"
                ))
            })?,
        };

        Ok(Self {
            model: model.to_string(),
            encoder,
        })
    }
}

impl TokenizerBackend for ExactTokenizer {
    fn family(&self) -> BackendFamily {
        BackendFamily::Exact
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        Ok(self.encoder.encode_ordinary(text))
    }

    fn count_tokens(&self, text: &str) -> Result<usize> {
        Ok(self.encode(text)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_model_counts_deterministically() {
        let tokenizer = ExactTokenizer::new("gpt-4").unwrap();
        // "Hello, world!" is 4 tokens under the cl100k family
        assert_eq!(tokenizer.count_tokens("Hello, world!").unwrap(), 4);
        // Repeat calls are stable
        assert_eq!(tokenizer.count_tokens("Hello, world!").unwrap(), 4);
    }

    #[test]
    fn test_count_equals_encode_length() {
        let tokenizer = ExactTokenizer::new("gpt-3.5-turbo").unwrap();
        let text = "The quick brown fox jumps over the lazy dog.";
        let ids = tokenizer.encode(text).unwrap();
        assert_eq!(tokenizer.count_tokens(text).unwrap(), ids.len());
        assert!(!ids.is_empty());
    }

    #[test]
    fn test_unrecognized_model_falls_back() {
        // Not in tiktoken's model tables; must still construct via cl100k_base
        let tokenizer = ExactTokenizer::new("some-future-model").unwrap();
        assert!(tokenizer.count_tokens("hello").unwrap() > 0);
    }

    #[test]
    fn test_not_approximating() {
        let tokenizer = ExactTokenizer::new("gpt-4").unwrap();
        assert!(!tokenizer.is_approximating());
        assert_eq!(tokenizer.family(), BackendFamily::Exact);
    }

    #[test]
    fn test_empty_text_is_zero_tokens() {
        let tokenizer = ExactTokenizer::new("gpt-4").unwrap();
        assert_eq!(tokenizer.count_tokens("").unwrap(), 0);
    }
}
