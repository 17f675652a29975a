//! # tokmeter-core
//!
//! Core layer for TokMeter:
//! - Registry: fixed model -> backend-family mapping
//! - Normalizer: markdown -> plain text transform
//! - Tokenizer: exact (tiktoken) and approximate (remote API / heuristic) backends
//! - Calculator: per-model backend cache + result assembly
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  TokenCalculator                                        │
//! │  ├── Registry (validate model, resolve family)          │
//! │  ├── Normalizer (optional markdown stripping)           │
//! │  └── Backend cache (one handle per model)               │
//! │          │                                              │
//! │          ├── ExactTokenizer (tiktoken BPE)              │
//! │          └── ApproximateTokenizer                       │
//! │               ├── remote count_tokens API (credential)  │
//! │               └── char/word heuristic (fallback)        │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod calculator;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod registry;
pub mod tokenizer;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Registry (model -> backend family)
// ============================================================================
pub use registry::{backend_family_of, is_supported, models_by_family, BackendFamily};

// ============================================================================
// Normalizer (markdown stripping)
// ============================================================================
pub use normalizer::normalize;

// ============================================================================
// Tokenizer backends
// ============================================================================
pub use tokenizer::{
    ApproximateTokenizer, ExactTokenizer, RemoteCountingConfig, TokenizerBackend,
};

// ============================================================================
// Calculator
// ============================================================================
pub use calculator::{CalculationResult, TokenCalculator};

// ============================================================================
// Config (injected credentials)
// ============================================================================
pub use config::ApiCredentials;
