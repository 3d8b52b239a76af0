//! The report's `overview.json`: histograms, pair index and top list.

use ps_core::error::{PlagError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

pub const OVERVIEW_FILE: &str = "overview.json";

/// Buckets per similarity histogram (bucket width 0.01).
pub const SIMILARITY_DISTRIBUTION_SIZE: usize = 100;

/// Metrics whose histograms are corrected when a comparison is dropped.
/// `MIN` and `INTERSECTION` cannot be corrected: comparison entries don't carry them.
pub const TRACKED_METRICS: [&str; 2] = ["MAX", "AVG"];

/// Histogram bucket for a similarity value.
///
/// Right-open buckets of width 0.01; the last bucket also takes 1.0.
pub fn bucket_index(similarity: f64) -> usize {
    let scaled = (similarity * SIMILARITY_DISTRIBUTION_SIZE as f64).floor() as i64;
    scaled.clamp(0, SIMILARITY_DISTRIBUTION_SIZE as i64 - 1) as usize
}

/// Entry of `top_comparisons`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopComparison {
    pub first_submission: String,
    pub second_submission: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TopComparison {
    /// Order-independent pair match.
    pub fn is_pair(&self, a: &str, b: &str) -> bool {
        (self.first_submission == a && self.second_submission == b)
            || (self.first_submission == b && self.second_submission == a)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewDocument {
    pub distributions: BTreeMap<String, Vec<u64>>,
    pub submission_ids_to_comparison_file_name: BTreeMap<String, BTreeMap<String, String>>,
    pub top_comparisons: Vec<TopComparison>,
    /// Everything else, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OverviewDocument {
    pub fn from_json(content: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(content)
            .map_err(|e| PlagError::MalformedOverview(e.to_string()))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Load `overview.json` from an extracted report.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(OVERVIEW_FILE);
        if !path.is_file() {
            return Err(PlagError::MalformedOverview(format!("{OVERVIEW_FILE} missing")));
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|e| PlagError::MalformedOverview(format!("read {OVERVIEW_FILE}: {e}")))?;
        Self::from_json(&content)
    }

    /// Write the document back over `overview.json`.
    pub fn save(&self, root: &Path) -> Result<()> {
        let bytes = serde_json::to_vec(self)?;
        std::fs::write(root.join(OVERVIEW_FILE), bytes)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for metric in TRACKED_METRICS {
            match self.distributions.get(metric) {
                None => {
                    return Err(PlagError::MalformedOverview(format!(
                        "distribution {metric} missing"
                    )))
                }
                Some(buckets) if buckets.len() != SIMILARITY_DISTRIBUTION_SIZE => {
                    return Err(PlagError::MalformedOverview(format!(
                        "distribution {metric} has {} buckets, expected {SIMILARITY_DISTRIBUTION_SIZE}",
                        buckets.len()
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Remove one comparison with the given similarity from a metric's histogram.
    ///
    /// Returns the bucket that was decremented.
    pub fn remove_from_distribution(&mut self, metric: &str, similarity: f64) -> Result<usize> {
        let bucket = bucket_index(similarity);
        let buckets = self.distributions.get_mut(metric).ok_or_else(|| {
            PlagError::MalformedOverview(format!("distribution {metric} missing"))
        })?;
        let count = buckets.get_mut(bucket).ok_or_else(|| {
            PlagError::MalformedOverview(format!("distribution {metric} has no bucket {bucket}"))
        })?;
        *count = count.checked_sub(1).ok_or_else(|| {
            PlagError::MalformedOverview(format!(
                "distribution {metric} bucket {bucket} is already empty"
            ))
        })?;
        Ok(bucket)
    }

    /// Drop both directions of a pair from the index.
    ///
    /// Missing directions are fine; returns how many links were removed.
    pub fn remove_pair_links(&mut self, a: &str, b: &str) -> usize {
        let mut removed = 0;
        for (from, to) in [(a, b), (b, a)] {
            if let Some(links) = self.submission_ids_to_comparison_file_name.get_mut(from) {
                if links.remove(to).is_some() {
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Drop every top comparison naming the pair. Returns how many were dropped.
    pub fn remove_top_comparisons(&mut self, a: &str, b: &str) -> usize {
        let before = self.top_comparisons.len();
        self.top_comparisons.retain(|c| !c.is_pair(a, b));
        before - self.top_comparisons.len()
    }

    /// Every comparison entry name referenced by the pair index.
    pub fn referenced_entries(&self) -> BTreeSet<&str> {
        self.submission_ids_to_comparison_file_name
            .values()
            .flat_map(|links| links.values().map(String::as_str))
            .collect()
    }

    /// Sum of a metric's histogram, if present.
    pub fn distribution_total(&self, metric: &str) -> Option<u64> {
        self.distributions.get(metric).map(|b| b.iter().sum())
    }
}
