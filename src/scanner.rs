//! File enumeration.
//!
//! Walks a project tree and returns the files with a given extension,
//! sorted so every downstream pass sees the same order.

use crate::errors::{AuditError, AuditResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct FileScanner;

impl FileScanner {
    pub fn new() -> Self {
        Self
    }

    /// Collect every file under `root` whose extension equals `extension`
    /// (exact case, without the dot), sorted lexicographically.
    pub fn collect(&self, root: &Path, extension: &str) -> AuditResult<Vec<PathBuf>> {
        if !root.exists() {
            return Err(AuditError::InvalidPath(format!(
                "Project root does not exist: {}",
                root.display()
            )));
        }

        log::debug!("Collecting *.{} files from: {:?}", extension, root);

        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => {
                    log::trace!("Found entry: {:?}", entry.path());
                    Some(entry)
                }
                Err(e) => {
                    log::warn!("Error accessing entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| has_extension(entry.path(), extension))
            .map(|entry| entry.into_path())
            .collect();

        files.sort();
        log::debug!("Collected {} *.{} files", files.len(), extension);
        Ok(files)
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == extension)
        .unwrap_or(false)
}
