//! Per-pair comparison entries of an extracted report.

use ps_core::error::{PlagError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level entries that are not pairwise comparisons.
pub const NON_COMPARISON_ENTRIES: &[&str] = &[
    "basecode",
    "files",
    "options.json",
    "overview.json",
    "README.txt",
    "submissionFileIndex.json",
];

/// A comparison entry found in the scratch directory, named `<id1>-<id2>[.ext]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonEntry {
    pub name: String,
    pub path: PathBuf,
    pub first: String,
    pub second: String,
}

/// Split an entry name into its two submission ids.
pub fn parse_entry_name(name: &str) -> Result<(String, String)> {
    let stem = Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parts: Vec<&str> = stem.split('-').collect();
    match parts.as_slice() {
        [first, second] if !first.is_empty() && !second.is_empty() => {
            Ok((first.to_string(), second.to_string()))
        }
        _ => Err(PlagError::MalformedEntryName {
            name: name.to_string(),
        }),
    }
}

/// List every comparison entry at the top level of `root`, sorted by name.
pub fn enumerate(root: &Path) -> Result<Vec<ComparisonEntry>> {
    let mut entries = Vec::new();
    for dirent in std::fs::read_dir(root)? {
        let dirent = dirent?;
        let name = dirent.file_name().to_string_lossy().into_owned();
        if NON_COMPARISON_ENTRIES.contains(&name.as_str()) {
            continue;
        }
        if dirent.file_type()?.is_dir() {
            return Err(PlagError::MalformedEntryName { name });
        }
        let (first, second) = parse_entry_name(&name)?;
        entries.push(ComparisonEntry {
            path: dirent.path(),
            name,
            first,
            second,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Contents of a comparison entry. Only `similarities` is consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    #[serde(default)]
    pub id1: String,
    #[serde(default)]
    pub id2: String,
    pub similarities: BTreeMap<String, f64>,
    #[serde(default)]
    pub matches: Vec<Value>,
    #[serde(default)]
    pub first_similarity: f64,
    #[serde(default)]
    pub second_similarity: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ComparisonRecord {
    pub fn load(entry: &ComparisonEntry) -> Result<Self> {
        let content = std::fs::read_to_string(&entry.path)?;
        serde_json::from_str(&content).map_err(|e| PlagError::MalformedComparison {
            name: entry.name.clone(),
            reason: e.to_string(),
        })
    }

    pub fn similarity(&self, metric: &str) -> Option<f64> {
        self.similarities.get(metric).copied()
    }
}
