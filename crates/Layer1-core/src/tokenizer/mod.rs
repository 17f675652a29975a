//! Tokenizer backends - per-model token counting
//!
//! Two interchangeable backend variants behind one trait:
//!
//! | Family | Mechanism | Library |
//! |--------|-----------|---------|
//! | Exact | tiktoken (BPE) | tiktoken-rs |
//! | Approximate | remote count_tokens API, or char/word heuristic | ureq |
//!
//! The approximate backend commits to one counting strategy at construction
//! time and never switches mid-lifetime.

mod approximate;
mod exact;
mod traits;

pub use approximate::{ApproximateTokenizer, RemoteCountingConfig};
pub use exact::ExactTokenizer;
pub use traits::TokenizerBackend;
