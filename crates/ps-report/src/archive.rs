//! Archive I/O: extraction into a scratch directory and re-packaging.
//!
//! Output archives are deflate-compressed without zip64 extensions
//! (version 2.0 semantics), which is what JPlag's report viewer accepts.

use ps_core::error::{PlagError, Result};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Component, Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const SCRATCH_PREFIX: &str = "plagsweep-";

fn archive_err(path: &Path, e: impl std::fmt::Display) -> PlagError {
    PlagError::ArchiveFormat(format!("{}: {e}", path.display()))
}

/// An archive unpacked into a scratch directory, removed on drop.
#[derive(Debug)]
pub struct ExtractedArchive {
    dir: TempDir,
    directories: BTreeSet<String>,
}

impl ExtractedArchive {
    /// Root of the scratch directory.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Directories the source archive listed as entries of their own,
    /// without the trailing `/`.
    pub fn directory_entries(&self) -> &BTreeSet<String> {
        &self.directories
    }
}

/// Extract every entry of `archive` into a fresh scratch directory.
pub fn extract(archive: &Path) -> Result<ExtractedArchive> {
    let file = File::open(archive).map_err(|e| archive_err(archive, e))?;
    let mut zip = ZipArchive::new(file).map_err(|e| archive_err(archive, e))?;
    let directories = zip
        .file_names()
        .filter(|name| name.ends_with('/'))
        .map(|name| entry_name(Path::new(name)))
        .filter(|name| !name.is_empty())
        .collect();
    let dir = tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir()?;
    zip.extract(dir.path()).map_err(|e| archive_err(archive, e))?;
    tracing::debug!(
        archive = %archive.display(),
        entries = zip.len(),
        scratch = %dir.path().display(),
        "extracted archive"
    );
    Ok(ExtractedArchive { dir, directories })
}

/// Sibling path with `.min` inserted before the final extension.
///
/// `reports/python3.jplag` becomes `reports/python3.min.jplag`.
pub fn minimized_path(report: &Path) -> PathBuf {
    let stem = report
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match report.extension() {
        Some(ext) => format!("{stem}.min.{}", ext.to_string_lossy()),
        None => format!("{stem}.min"),
    };
    report.with_file_name(name)
}

/// Entry name for a path relative to the scratch root, always `/`-separated.
pub fn entry_name(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Package everything under `root` into a new archive at `dest`.
///
/// Only directories named in `directories` get an entry of their own, so the
/// output lists the same directories as the archive `root` was extracted
/// from. The archive is assembled in a temporary sibling file and only
/// renamed into place once complete. Returns the number of file entries
/// written.
pub fn write_archive(root: &Path, dest: &Path, directories: &BTreeSet<String>) -> Result<usize> {
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut partial = tempfile::Builder::new()
        .prefix(".plagsweep-")
        .suffix(".partial")
        .tempfile_in(parent)
        .map_err(|e| archive_err(dest, e))?;

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(false);

    let mut files = 0;
    {
        let mut zip = ZipWriter::new(partial.as_file_mut());
        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| archive_err(dest, e))?;
            let rel = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| archive_err(entry.path(), e))?;
            let name = entry_name(rel);
            if entry.file_type().is_dir() {
                if directories.contains(&name) {
                    zip.add_directory(name, options)
                        .map_err(|e| archive_err(dest, e))?;
                }
            } else {
                zip.start_file(name, options)
                    .map_err(|e| archive_err(dest, e))?;
                let mut src =
                    File::open(entry.path()).map_err(|e| archive_err(entry.path(), e))?;
                std::io::copy(&mut src, &mut zip).map_err(|e| archive_err(dest, e))?;
                files += 1;
            }
        }
        zip.finish().map_err(|e| archive_err(dest, e))?;
    }

    partial
        .persist(dest)
        .map_err(|e| archive_err(dest, e.error))?;
    tracing::debug!(archive = %dest.display(), files, "wrote archive");
    Ok(files)
}
