//! Layered category prediction for transactions
//!
//! Three-tier fallback chain, evaluated lazily and strictly in order:
//!
//! 1. Local keyword rules (`CategoryRules`) - synchronous, pure, populates
//!    the UI immediately.
//! 2. An injected on-device text classifier (`TextClassifier`) - async,
//!    failures swallowed.
//! 3. A remote classification service (`RemoteClassifier`) - async,
//!    authenticated, failures swallowed.
//!
//! Local rules always take precedence over model/remote results. Tier 2/3
//! results may arrive after an initial "Unknown" was shown; the resolver
//! models this as a watch channel of category values over time.

mod local;
mod mock;
mod remote;
mod resolver;

pub use local::CategoryRules;
pub use mock::MockClassifier;
pub use remote::RemoteClassifier;
pub use resolver::{CategoryOutcome, CategoryResolver, UNKNOWN_CATEGORY};

use async_trait::async_trait;

use crate::error::Result;

/// Injected on-device text classification capability (tier 2).
///
/// Implementations must tolerate concurrent invocation; the resolver calls
/// this from spawned background tasks.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Classify the full message text, returning the top-scoring label.
    /// Errors are caught by the resolver and treated as unresolved.
    async fn classify(&self, text: &str) -> Result<String>;
}
