use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of the same-author minimization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimizeStats {
    /// Comparison entries inspected.
    pub inspected: usize,
    pub kept: usize,
    /// Entry names removed as same-author collisions.
    pub removed: Vec<String>,
}

impl MinimizeStats {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

/// Result of a detector run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlagReport {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
    pub report_path: PathBuf,
    /// Present only when author filtering ran on a successful report.
    pub report_min_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimize_stats: Option<MinimizeStats>,
    pub elapsed_ms: i64,
}

impl PlagReport {
    pub fn succeeded(&self) -> bool {
        self.status == 0
    }
}
