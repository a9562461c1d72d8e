//! Mock text classifier for testing
//!
//! Predictable keyword-based labels, plus a failing variant to exercise the
//! resolver's fall-through behavior without a real model.

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::{TextClassifier, UNKNOWN_CATEGORY};

/// Mock on-device classifier. Healthy by default; the failing variant errors
/// on every call.
#[derive(Clone, Default)]
pub struct MockClassifier {
    failing: bool,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self { failing: false }
    }

    /// A classifier whose every inference fails (model load failure)
    pub fn failing() -> Self {
        Self { failing: true }
    }
}

#[async_trait]
impl TextClassifier for MockClassifier {
    async fn classify(&self, text: &str) -> Result<String> {
        if self.failing {
            return Err(Error::Classification("mock model failed to load".into()));
        }

        let lower = text.to_lowercase();
        let label = if lower.contains("grocery") || lower.contains("restaurant") {
            "Food"
        } else if lower.contains("fuel") || lower.contains("petrol") {
            "Travel"
        } else if lower.contains("salon") || lower.contains("gym") {
            "Health"
        } else {
            UNKNOWN_CATEGORY
        };

        Ok(label.to_string())
    }
}
