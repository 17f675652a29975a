//! Model Registry - fixed model -> backend-family mapping
//!
//! Every supported model identifier maps to exactly one backend family.
//! Unknown identifiers are rejected here, before any backend is constructed.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Backend family for a model
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BackendFamily {
    /// Deterministic, locally computable encoding (tiktoken BPE)
    Exact,
    /// Remote counting service or statistical heuristic
    Approximate,
}

impl std::fmt::Display for BackendFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Approximate => write!(f, "approximate"),
        }
    }
}

/// The fixed set of supported models, in advertised order.
const SUPPORTED_MODELS: &[(&str, BackendFamily)] = &[
    // OpenAI
    ("gpt-4", BackendFamily::Exact),
    ("gpt-4-turbo", BackendFamily::Exact),
    ("gpt-3.5-turbo", BackendFamily::Exact),
    ("text-embedding-ada-002", BackendFamily::Exact),
    // Anthropic
    ("claude-3-opus", BackendFamily::Approximate),
    ("claude-3-sonnet", BackendFamily::Approximate),
    ("claude-3-haiku", BackendFamily::Approximate),
    ("claude-2", BackendFamily::Approximate),
];

/// Resolve the backend family for a model.
///
/// Fails with `Error::UnsupportedModel` when the model is not registered.
pub fn backend_family_of(model: &str) -> Result<BackendFamily> {
    SUPPORTED_MODELS
        .iter()
        .find(|(id, _)| *id == model)
        .map(|(_, family)| *family)
        .ok_or_else(|| Error::unsupported_model(model, &model_names()))
}

/// Whether a model is registered. Total, never fails.
pub fn is_supported(model: &str) -> bool {
    SUPPORTED_MODELS.iter().any(|(id, _)| *id == model)
}

/// All registered model identifiers, in advertised order.
pub fn model_names() -> Vec<&'static str> {
    SUPPORTED_MODELS.iter().map(|(id, _)| *id).collect()
}

/// Registered models grouped by backend family, preserving the advertised
/// per-family order. The grouping is derived from the mapping, not stored.
pub fn models_by_family() -> BTreeMap<BackendFamily, Vec<&'static str>> {
    let mut grouped: BTreeMap<BackendFamily, Vec<&'static str>> = BTreeMap::new();
    for (id, family) in SUPPORTED_MODELS {
        grouped.entry(*family).or_default().push(id);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_models_resolve() {
        assert_eq!(backend_family_of("gpt-4").unwrap(), BackendFamily::Exact);
        assert_eq!(
            backend_family_of("text-embedding-ada-002").unwrap(),
            BackendFamily::Exact
        );
        assert_eq!(
            backend_family_of("claude-3-opus").unwrap(),
            BackendFamily::Approximate
        );
        assert_eq!(
            backend_family_of("claude-2").unwrap(),
            BackendFamily::Approximate
        );
    }

    #[test]
    fn test_unknown_model_rejected() {
        let err = backend_family_of("invalid-model").unwrap_err();
        assert!(matches!(err, Error::UnsupportedModel { .. }));
        assert!(err.to_string().contains("invalid-model"));
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported("gpt-3.5-turbo"));
        assert!(is_supported("claude-3-haiku"));
        assert!(!is_supported("invalid-model"));
        assert!(!is_supported(""));
    }

    #[test]
    fn test_models_by_family_grouping() {
        let grouped = models_by_family();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&BackendFamily::Exact].len(), 4);
        assert_eq!(grouped[&BackendFamily::Approximate].len(), 4);
        // Advertised order is preserved within each family
        assert_eq!(grouped[&BackendFamily::Exact][0], "gpt-4");
        assert_eq!(grouped[&BackendFamily::Approximate][0], "claude-3-opus");
    }

    #[test]
    fn test_family_serializes_snake_case() {
        let json = serde_json::to_string(&BackendFamily::Approximate).unwrap();
        assert_eq!(json, "\"approximate\"");
    }
}
