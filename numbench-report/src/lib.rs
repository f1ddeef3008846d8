#![warn(missing_docs)]
//! numbench Report - Run Reports
//!
//! Collects per-suite [`BenchRecord`](numbench_core::BenchRecord)s into a
//! [`Report`] with run metadata, and renders it:
//! - Human (report lines streamed while the run happens)
//! - JSON (machine-readable, written once at the end)

#[allow(missing_docs)]
mod report;
mod json;

pub use json::{ReportSchema, SCHEMA_VERSION, generate_json_report, parse_json_report};
pub use report::{
    FailureInfo, Report, ReportConfig, ReportMeta, ReportSummary, SuiteReport, SuiteStatus,
    SystemInfo,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Report lines on stdout
    #[default]
    Human,
    /// JSON with full schema
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
