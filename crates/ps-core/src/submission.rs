//! Submissions and the id → submission index consulted during filtering.

use crate::error::{PlagError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// A single submission handed to the detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub author: String,
    pub lang: String,
    /// Relative file path → file content.
    #[serde(default)]
    pub files: BTreeMap<String, String>,
}

impl Submission {
    pub fn new(
        id: impl Into<String>,
        author: impl Into<String>,
        lang: impl Into<String>,
        files: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            lang: lang.into(),
            files,
        }
    }

    /// Builder-style helper for adding a single file.
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

/// Read-only lookup of submissions by id.
#[derive(Debug, Clone, Default)]
pub struct SubmissionIndex {
    by_id: HashMap<String, Submission>,
}

impl SubmissionIndex {
    /// Build an index, rejecting duplicate ids.
    pub fn new(submissions: impl IntoIterator<Item = Submission>) -> Result<Self> {
        let mut by_id = HashMap::new();
        for submission in submissions {
            if by_id.contains_key(&submission.id) {
                return Err(PlagError::InvalidSubmission {
                    id: submission.id,
                    reason: "duplicate id".into(),
                });
            }
            by_id.insert(submission.id.clone(), submission);
        }
        Ok(Self { by_id })
    }

    pub fn get(&self, id: &str) -> Option<&Submission> {
        self.by_id.get(id)
    }

    /// Resolve an id, failing with `UnknownSubmission` when absent.
    pub fn resolve(&self, id: &str) -> Result<&Submission> {
        self.get(id)
            .ok_or_else(|| PlagError::UnknownSubmission { id: id.to_string() })
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Load a JSON manifest: an array of submissions.
pub fn load_manifest(path: &Path) -> Result<Vec<Submission>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
