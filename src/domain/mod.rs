//! Domain availability checking module

pub mod checker;

// Re-export main functionality
pub use checker::DnsChecker;

use crate::types::{Availability, DomainVerdict};
use async_trait::async_trait;
use futures::future::join_all;

/// Seam between the pipeline's verify stage and the concrete checker.
///
/// A verdict is best-effort: implementations degrade to
/// `Availability::Unknown` on failure instead of erroring, so one bad lookup
/// never aborts a batch.
#[async_trait]
pub trait AvailabilityCheck: Send + Sync {
    async fn verdict(&self, name: &str) -> DomainVerdict;

    /// Check a whole batch concurrently, one verdict per name, input order
    /// preserved
    async fn verdict_batch(&self, names: &[String]) -> Vec<DomainVerdict> {
        let verdicts = join_all(names.iter().map(|name| self.verdict(name))).await;

        let unknown = verdicts
            .iter()
            .filter(|v| v.availability == Availability::Unknown)
            .count();
        tracing::info!(
            domains_checked = %verdicts.len(),
            unknown = %unknown,
            "Batch domain check completed"
        );

        verdicts
    }
}
