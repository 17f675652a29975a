//! TokenizerBackend trait definition

use crate::error::Result;
use crate::registry::BackendFamily;

/// Common capability surface for tokenizer backends.
///
/// A backend is bound to one model identifier at construction and is shared
/// behind an `Arc` by the calculator's cache, so implementations must be
/// `Send + Sync` and internally immutable.
pub trait TokenizerBackend: Send + Sync {
    /// The backend family this instance belongs to.
    fn family(&self) -> BackendFamily;

    /// The model this backend is bound to.
    fn model(&self) -> &str;

    /// Encode text into a token-id sequence.
    ///
    /// For the approximate family the ids are a synthetic placeholder; only
    /// the sequence length carries meaning.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// Count the tokens `text` would consume for this backend's model.
    fn count_tokens(&self, text: &str) -> Result<usize>;

    /// True only when this instance counts via the local heuristic rather
    /// than an authoritative mechanism.
    fn is_approximating(&self) -> bool {
        false
    }
}
