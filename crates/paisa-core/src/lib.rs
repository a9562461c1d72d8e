//! Paisa Core Library
//!
//! The transactional-SMS classification engine for the Paisa expense
//! tracker:
//! - Pattern library for recognizing transactional language in bank SMS
//! - Rule-based debit/credit classification with amount and counterparty
//!   extraction
//! - Suggestion building with deterministic ids for idempotent re-scanning
//! - Merchant display-name cleanup (VPA/gateway handles)
//! - Layered category prediction: local keyword rules, injected on-device
//!   classifier, remote classification service
//!
//! Message retrieval, persistence, and UI are external collaborators; this
//! crate is pure decision logic plus the tier-3 HTTP client.

pub mod categorize;
pub mod classifier;
pub mod error;
pub mod merchant;
pub mod models;
pub mod patterns;
pub mod suggestion;

/// Test utilities including a mock classification server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use categorize::{
    CategoryOutcome, CategoryResolver, CategoryRules, MockClassifier, RemoteClassifier,
    TextClassifier, UNKNOWN_CATEGORY,
};
pub use classifier::TransactionClassifier;
pub use error::{Error, Result};
pub use merchant::clean_merchant_name;
pub use models::{CategoryRequest, RawMessage, Suggestion, Verdict};
pub use patterns::PatternLibrary;
pub use suggestion::SuggestionBuilder;
