use crate::domain::errors::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum TargetType {
    Prompt,
    Comment,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Prompt => "prompt",
            TargetType::Comment => "comment",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prompt" => Ok(TargetType::Prompt),
            "comment" => Ok(TargetType::Comment),
            other => Err(DomainError::InvalidArgument(format!(
                "Invalid report type: {}",
                other
            ))),
        }
    }
}

/// The content item a report refers to.
///
/// Persisted as the `(target_type, target_id)` pair, which is also the
/// aggregation key of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "target_type", content = "target_id", rename_all = "lowercase")]
pub enum ReportTarget {
    Prompt(Uuid),
    Comment(Uuid),
}

impl ReportTarget {
    pub fn new(target_type: TargetType, id: Uuid) -> Self {
        match target_type {
            TargetType::Prompt => ReportTarget::Prompt(id),
            TargetType::Comment => ReportTarget::Comment(id),
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            ReportTarget::Prompt(id) | ReportTarget::Comment(id) => *id,
        }
    }

    pub fn target_type(&self) -> TargetType {
        match self {
            ReportTarget::Prompt(_) => TargetType::Prompt,
            ReportTarget::Comment(_) => TargetType::Comment,
        }
    }
}

/// One user's submission against a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub reporter_id: Uuid,
    pub reason: String,
    pub reported_at: DateTime<Utc>,
}

impl ReportEntry {
    pub fn new(reporter_id: Uuid, reason: impl Into<String>) -> Self {
        Self {
            reporter_id,
            reason: reason.into(),
            reported_at: Utc::now(),
        }
    }
}

/// Aggregated reports for a single target.
///
/// Each reporter appears at most once in `entries`, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    #[serde(flatten)]
    pub target: ReportTarget,
    pub entries: Vec<ReportEntry>,
}

impl Report {
    pub fn report_count(&self) -> usize {
        self.entries.len()
    }

    pub fn has_reporter(&self, user_id: Uuid) -> bool {
        self.entries.iter().any(|e| e.reporter_id == user_id)
    }

    pub fn reasons(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.reason.as_str()).collect()
    }
}

/// Result of a submission: the report after the append, and whether this
/// submission created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub report: Report,
    pub created: bool,
}
