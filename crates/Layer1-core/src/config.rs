//! Injected credential configuration
//!
//! The approximate backend decides between the remote counting API and the
//! local heuristic once, at construction time. That decision is driven by an
//! `ApiCredentials` value captured here instead of ad-hoc environment reads,
//! so tests can substitute fakes without touching the process environment.

/// Credentials for remote capabilities, resolved once and injected.
#[derive(Debug, Clone, Default)]
pub struct ApiCredentials {
    /// Anthropic API key; absence selects the heuristic counting path.
    pub anthropic_api_key: Option<String>,
}

impl ApiCredentials {
    /// Load credentials from the process environment.
    pub fn from_env() -> Self {
        Self {
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
        }
    }

    /// No credentials configured; every approximate backend uses the heuristic.
    pub fn none() -> Self {
        Self::default()
    }

    /// Credentials with an Anthropic API key.
    pub fn with_anthropic_key(key: impl Into<String>) -> Self {
        Self {
            anthropic_api_key: Some(key.into()),
        }
    }

    pub fn has_anthropic_key(&self) -> bool {
        self.anthropic_api_key
            .as_ref()
            .map(|key| !key.is_empty())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_has_no_key() {
        assert!(!ApiCredentials::none().has_anthropic_key());
    }

    #[test]
    fn test_with_key() {
        let creds = ApiCredentials::with_anthropic_key("sk-test");
        assert!(creds.has_anthropic_key());
    }

    #[test]
    fn test_empty_key_counts_as_absent() {
        let creds = ApiCredentials {
            anthropic_api_key: Some(String::new()),
        };
        assert!(!creds.has_anthropic_key());
    }
}
