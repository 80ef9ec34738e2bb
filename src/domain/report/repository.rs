use super::entity::{Report, ReportEntry, ReportTarget, SubmitOutcome};
use crate::domain::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

/// Report Ledger storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>, DomainError>;
    async fn find_by_target(&self, target: ReportTarget) -> Result<Option<Report>, DomainError>;
    /// Creates the report for `target` or appends `entry` to it, as one atomic
    /// conditional push. Fails with `AlreadyReported` when the reporter is
    /// already recorded against the target.
    async fn submit(
        &self,
        target: ReportTarget,
        entry: ReportEntry,
    ) -> Result<SubmitOutcome, DomainError>;
    async fn list_all(&self) -> Result<Vec<Report>, DomainError>;
    /// Removes every report whose target id equals `target_id`, whatever its
    /// type, and returns what was removed.
    async fn delete_by_target_id(&self, target_id: Uuid) -> Result<Vec<Report>, DomainError>;
    /// Returns `false` when no report existed for `target`.
    async fn delete_by_target(&self, target: ReportTarget) -> Result<bool, DomainError>;
    /// Returns `false` when no such report existed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError>;
}
