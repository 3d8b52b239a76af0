//! Minimization pipeline: extract → filter → repackage.

use crate::archive::{self, minimized_path};
use crate::comparison;
use crate::filter::AuthorCollisionFilter;
use crate::overview::OverviewDocument;
use ps_core::error::Result;
use ps_core::{MinimizeStats, Submission, SubmissionIndex};
use std::path::{Path, PathBuf};

/// Paths and statistics of a finished minimization.
#[derive(Debug, Clone)]
pub struct MinimizeResult {
    pub report_path: PathBuf,
    pub report_min_path: PathBuf,
    pub stats: MinimizeStats,
}

/// Strips same-author comparisons from a JPlag report archive.
pub struct ReportMinimizer<'a> {
    index: &'a SubmissionIndex,
}

impl<'a> ReportMinimizer<'a> {
    pub fn new(index: &'a SubmissionIndex) -> Self {
        Self { index }
    }

    /// Write `<stem>.min.<ext>` next to `report`. The input is never modified,
    /// and nothing is written unless every step succeeds.
    pub fn minimize(&self, report: &Path) -> Result<MinimizeResult> {
        let extracted = archive::extract(report)?;
        let root = extracted.root();

        let mut overview = OverviewDocument::load(root)?;
        let entries = comparison::enumerate(root)?;
        let stats = AuthorCollisionFilter::new(self.index).apply(&mut overview, &entries)?;
        overview.save(root)?;

        let report_min_path = minimized_path(report);
        archive::write_archive(root, &report_min_path, extracted.directory_entries())?;

        tracing::info!(
            report = %report.display(),
            minimized = %report_min_path.display(),
            inspected = stats.inspected,
            removed = stats.removed_count(),
            "minimized report"
        );
        Ok(MinimizeResult {
            report_path: report.to_path_buf(),
            report_min_path,
            stats,
        })
    }
}

/// Minimize `report` against `submissions`, returning the original and minimized paths.
pub fn post_process(report: &Path, submissions: &[Submission]) -> Result<(PathBuf, PathBuf)> {
    let index = SubmissionIndex::new(submissions.iter().cloned())?;
    let result = ReportMinimizer::new(&index).minimize(report)?;
    Ok((result.report_path, result.report_min_path))
}
