//! Lays submissions out as `<root>/<id>/<relative path>` for the detector.

use ps_core::error::{PlagError, Result};
use ps_core::Submission;
use std::path::{Component, Path};
use tempfile::TempDir;

const STAGING_PREFIX: &str = "plagsweep-subs-";

/// Only plain relative components; no roots, prefixes or `..`.
fn is_safe_relative(path: &Path) -> bool {
    path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)))
}

fn invalid(id: &str, reason: impl Into<String>) -> PlagError {
    PlagError::InvalidSubmission {
        id: id.to_string(),
        reason: reason.into(),
    }
}

/// Write every submission under `root`.
pub fn stage_into(root: &Path, submissions: &[Submission]) -> Result<()> {
    for submission in submissions {
        let id_path = Path::new(&submission.id);
        if !is_safe_relative(id_path) || id_path.components().count() != 1 {
            return Err(invalid(&submission.id, "id is not a plain directory name"));
        }
        let dir = root.join(id_path);
        std::fs::create_dir_all(&dir)?;

        for (rel, content) in &submission.files {
            let rel_path = Path::new(rel);
            if !is_safe_relative(rel_path) {
                return Err(invalid(&submission.id, format!("unsafe file path {rel}")));
            }
            let dest = dir.join(rel_path);
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&dest, content)?;
        }
        tracing::trace!(id = %submission.id, files = submission.files.len(), "staged submission");
    }
    Ok(())
}

/// Stage into a fresh temporary directory, removed when dropped.
pub fn stage(submissions: &[Submission]) -> Result<TempDir> {
    let dir = tempfile::Builder::new().prefix(STAGING_PREFIX).tempdir()?;
    stage_into(dir.path(), submissions)?;
    Ok(dir)
}
