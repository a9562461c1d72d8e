//! Category resolution orchestrator
//!
//! Runs the tier chain: local keyword rules, then the injected on-device
//! classifier, then the remote service. Each tier reports `Resolved` or
//! `Unresolved`; the orchestrator decides to proceed, there is no exception
//! control flow. Tiers 2/3 within one invocation are strictly sequential,
//! never speculated in parallel.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::models::CategoryRequest;

use super::{CategoryRules, RemoteClassifier, TextClassifier};

/// Sentinel category when no tier resolved. The user categorizes manually.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Result of one resolution tier
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryOutcome {
    Resolved(String),
    Unresolved,
}

impl CategoryOutcome {
    /// Treat empty or sentinel labels as unresolved
    fn from_label(label: &str) -> Self {
        if label.is_empty() || label == UNKNOWN_CATEGORY {
            CategoryOutcome::Unresolved
        } else {
            CategoryOutcome::Resolved(label.to_string())
        }
    }
}

/// Layered category resolver. Tier 1 is always available; tiers 2 and 3 are
/// optional injected capabilities.
pub struct CategoryResolver {
    rules: CategoryRules,
    model: Option<Arc<dyn TextClassifier>>,
    remote: Option<RemoteClassifier>,
}

impl CategoryResolver {
    /// Resolver with local rules only
    pub fn new() -> Self {
        Self {
            rules: CategoryRules::new(),
            model: None,
            remote: None,
        }
    }

    /// Attach the on-device classifier (tier 2)
    pub fn with_model(mut self, model: Arc<dyn TextClassifier>) -> Self {
        self.model = Some(model);
        self
    }

    /// Attach the remote classification service (tier 3)
    pub fn with_remote(mut self, remote: RemoteClassifier) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Tier 1 only: synchronous, no suspension. Used to populate the UI
    /// immediately while tiers 2/3 refine in the background.
    pub fn resolve_local(&self, merchant: &str, full_text: &str) -> CategoryOutcome {
        match self.rules.predict(merchant, full_text) {
            Some(category) => CategoryOutcome::Resolved(category.to_string()),
            None => CategoryOutcome::Unresolved,
        }
    }

    /// Tier 2: on-device model inference. Failures are logged and mapped to
    /// unresolved, never propagated.
    async fn resolve_model(&self, request: &CategoryRequest) -> CategoryOutcome {
        let model = match &self.model {
            Some(m) => m,
            None => return CategoryOutcome::Unresolved,
        };

        match model.classify(&request.full_text).await {
            Ok(label) => {
                debug!(label = %label, "on-device model classification");
                CategoryOutcome::from_label(&label)
            }
            Err(e) => {
                warn!("on-device classification failed for '{}': {}", request.merchant, e);
                CategoryOutcome::Unresolved
            }
        }
    }

    /// Tier 3: remote service. Same boundary: failures logged, unresolved.
    async fn resolve_remote(&self, request: &CategoryRequest) -> CategoryOutcome {
        let remote = match &self.remote {
            Some(r) => r,
            None => return CategoryOutcome::Unresolved,
        };

        match remote.classify(request).await {
            Ok(label) => CategoryOutcome::from_label(&label),
            Err(e) => {
                warn!("remote classification failed for '{}': {}", request.merchant, e);
                CategoryOutcome::Unresolved
            }
        }
    }

    /// Full chain: tier 1, then 2 if unresolved, then 3 if still unresolved.
    /// Local rules always win when they produce an answer; tier ordering is
    /// fixed and never confidence-based.
    pub async fn resolve(&self, request: &CategoryRequest) -> String {
        if let CategoryOutcome::Resolved(category) =
            self.resolve_local(&request.merchant, &request.full_text)
        {
            return category;
        }
        if let CategoryOutcome::Resolved(category) = self.resolve_model(request).await {
            return category;
        }
        if let CategoryOutcome::Resolved(category) = self.resolve_remote(request).await {
            return category;
        }
        UNKNOWN_CATEGORY.to_string()
    }

    /// Eventual refinement: returns a watch receiver seeded with the tier-1
    /// result. When tier 1 is unresolved, tiers 2/3 run in a spawned task
    /// off the caller's critical path and push a refined value later.
    ///
    /// Dropping the receiver (e.g. the user navigated away) discards the
    /// late result silently; there are no retries.
    ///
    /// Must be called within a tokio runtime.
    pub fn resolve_watch(self: &Arc<Self>, request: CategoryRequest) -> watch::Receiver<String> {
        let initial = self.resolve_local(&request.merchant, &request.full_text);

        let (tx, rx) = match initial {
            CategoryOutcome::Resolved(category) => return watch::channel(category).1,
            CategoryOutcome::Unresolved => watch::channel(UNKNOWN_CATEGORY.to_string()),
        };

        let resolver = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = match resolver.resolve_model(&request).await {
                CategoryOutcome::Resolved(category) => CategoryOutcome::Resolved(category),
                CategoryOutcome::Unresolved => resolver.resolve_remote(&request).await,
            };
            if let CategoryOutcome::Resolved(category) = outcome {
                // Receiver may be gone; the refinement is simply discarded
                let _ = tx.send(category);
            }
        });

        rx
    }
}

impl Default for CategoryResolver {
    fn default() -> Self {
        Self::new()
    }
}
