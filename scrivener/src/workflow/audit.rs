//! Per-run audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::StepResult;

/// One completed step of a workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// When the record was appended.
    pub timestamp: DateTime<Utc>,
    /// Step name, e.g. `fact_check` or `research_perspective_2`.
    pub step: String,
    /// Agent that produced the step.
    pub agent: String,
    /// The step's result.
    pub data: StepResult,
}

/// Ordered, append-only log of the steps completed in one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditLog {
    records: Vec<AuditRecord>,
}

impl AuditLog {
    /// Create an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record for `step`, timestamped now.
    pub fn record(&mut self, step: impl Into<String>, data: impl Into<StepResult>) {
        let data = data.into();
        self.records.push(AuditRecord {
            timestamp: Utc::now(),
            step: step.into(),
            agent: data.agent().to_owned(),
            data,
        });
    }

    /// Records in append order.
    #[must_use]
    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }

    /// Step names in append order.
    #[must_use]
    pub fn steps(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.step.as_str()).collect()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no step has completed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
