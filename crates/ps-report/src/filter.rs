//! Same-author collision filtering.

use crate::comparison::{ComparisonEntry, ComparisonRecord};
use crate::overview::{OverviewDocument, TRACKED_METRICS};
use ps_core::error::{PlagError, Result};
use ps_core::{MinimizeStats, Submission, SubmissionIndex};

/// Whether a comparison survives minimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Drop,
}

/// Comparisons between two submissions by the same author are dropped.
pub fn collision_verdict(first: &Submission, second: &Submission) -> Verdict {
    if first.author == second.author {
        Verdict::Drop
    } else {
        Verdict::Keep
    }
}

/// The `MAX` and `AVG` similarities of a record, read before anything is
/// mutated. Each must be present and finite.
pub(crate) fn tracked_similarities(
    record: &ComparisonRecord,
    name: &str,
) -> Result<Vec<(&'static str, f64)>> {
    let mut values = Vec::with_capacity(TRACKED_METRICS.len());
    for metric in TRACKED_METRICS {
        let value = record
            .similarity(metric)
            .ok_or_else(|| PlagError::MalformedComparison {
                name: name.to_string(),
                reason: format!("similarity {metric} missing"),
            })?;
        if !value.is_finite() {
            return Err(PlagError::MalformedComparison {
                name: name.to_string(),
                reason: format!("similarity {metric} is not finite: {value}"),
            });
        }
        values.push((metric, value));
    }
    Ok(values)
}

/// Removes same-author comparisons and keeps the overview consistent with them.
pub struct AuthorCollisionFilter<'a> {
    index: &'a SubmissionIndex,
}

impl<'a> AuthorCollisionFilter<'a> {
    pub fn new(index: &'a SubmissionIndex) -> Self {
        Self { index }
    }

    /// Decide a single entry without touching anything.
    pub fn verdict(&self, entry: &ComparisonEntry) -> Result<Verdict> {
        let first = self.index.resolve(&entry.first)?;
        let second = self.index.resolve(&entry.second)?;
        Ok(collision_verdict(first, second))
    }

    /// Process every entry: dropped entries are deleted from disk and removed
    /// from the histograms, the pair index and the top list.
    pub fn apply(
        &self,
        overview: &mut OverviewDocument,
        entries: &[ComparisonEntry],
    ) -> Result<MinimizeStats> {
        let mut stats = MinimizeStats::default();
        for entry in entries {
            stats.inspected += 1;
            match self.verdict(entry)? {
                Verdict::Keep => stats.kept += 1,
                Verdict::Drop => {
                    self.drop_entry(overview, entry)?;
                    stats.removed.push(entry.name.clone());
                }
            }
        }
        Ok(stats)
    }

    fn drop_entry(&self, overview: &mut OverviewDocument, entry: &ComparisonEntry) -> Result<()> {
        let record = ComparisonRecord::load(entry)?;
        let values = tracked_similarities(&record, &entry.name)?;

        for (metric, value) in values {
            let bucket = overview.remove_from_distribution(metric, value)?;
            tracing::trace!(entry = %entry.name, metric, value, bucket, "histogram corrected");
        }

        let links = overview.remove_pair_links(&entry.first, &entry.second);
        if links < 2 {
            tracing::debug!(entry = %entry.name, links, "pair index already partially pruned");
        }
        let top = overview.remove_top_comparisons(&entry.first, &entry.second);

        std::fs::remove_file(&entry.path)?;
        tracing::debug!(
            entry = %entry.name,
            first = %entry.first,
            second = %entry.second,
            top_removed = top,
            "dropped same-author comparison"
        );
        Ok(())
    }
}
