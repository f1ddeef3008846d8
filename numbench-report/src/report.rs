//! Report Data Structures

use crate::json::ReportSchema;
use chrono::{DateTime, Utc};
use numbench_core::BenchRecord;
use serde::{Deserialize, Serialize};

/// Complete run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub schema: ReportSchema,
    pub meta: ReportMeta,
    pub suites: Vec<SuiteReport>,
    pub summary: ReportSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub git_commit: Option<String>,
    pub git_branch: Option<String>,
    pub system: SystemInfo,
    pub config: ReportConfig,
}

/// Execution configuration captured in report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Repetition count forced on every suite, if any
    pub repetitions_override: Option<u64>,
    /// Whether expectations were checked before timing
    pub verify: bool,
    /// Whether later suites ran after a failure
    pub keep_going: bool,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub os_version: String,
    pub cpu: String,
    pub cpu_cores: u32,
    pub cycle_counter: bool,
}

/// Suite execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuiteStatus {
    Passed,
    Failed,
    Skipped,
}

/// Failure information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureInfo {
    /// Operation that failed, when the failure is tied to one
    pub operation: Option<String>,
    pub kind: String,
    pub message: String,
}

/// One suite's results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub id: String,
    pub title: String,
    pub status: SuiteStatus,
    /// Records for operations that completed, in run order
    pub records: Vec<BenchRecord>,
    pub failure: Option<FailureInfo>,
}

impl SuiteReport {
    /// A suite whose every selected operation completed
    pub fn passed(id: &str, title: &str, records: Vec<BenchRecord>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            status: SuiteStatus::Passed,
            records,
            failure: None,
        }
    }

    /// A suite that stopped at `failure` after completing `records`
    pub fn failed(id: &str, title: &str, records: Vec<BenchRecord>, failure: FailureInfo) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            status: SuiteStatus::Failed,
            records,
            failure: Some(failure),
        }
    }

    /// A suite that never ran
    pub fn skipped(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            status: SuiteStatus::Skipped,
            records: Vec::new(),
            failure: None,
        }
    }
}

/// Report summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_suites: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub operations_timed: usize,
    pub total_duration_ms: f64,
}

impl ReportSummary {
    /// Tally suite statuses and timed operations
    pub fn from_suites(suites: &[SuiteReport], total_duration_ms: f64) -> Self {
        let count = |status: SuiteStatus| suites.iter().filter(|s| s.status == status).count();
        Self {
            total_suites: suites.len(),
            passed: count(SuiteStatus::Passed),
            failed: count(SuiteStatus::Failed),
            skipped: count(SuiteStatus::Skipped),
            operations_timed: suites.iter().map(|s| s.records.len()).sum(),
            total_duration_ms,
        }
    }
}

impl Report {
    /// Assemble a report, computing the summary from `suites`
    pub fn new(meta: ReportMeta, suites: Vec<SuiteReport>, total_duration_ms: f64) -> Self {
        let summary = ReportSummary::from_suites(&suites, total_duration_ms);
        Self {
            schema: ReportSchema::default(),
            meta,
            suites,
            summary,
        }
    }

    /// Whether any suite failed
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }
}
