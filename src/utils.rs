use crate::errors::{AuditError, AuditResult};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// Read a file as UTF-8, replacing invalid sequences with U+FFFD.
pub fn read_lossy(path: &Path) -> AuditResult<String> {
    let bytes = fs::read(path).map_err(|e| AuditError::io(e, path.to_path_buf()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write `content` to `path`, creating parent directories first.
pub fn write_file(path: &Path, content: &str) -> AuditResult<()> {
    ensure_parent(path)?;
    fs::write(path, content).map_err(|e| AuditError::io(e, path.to_path_buf()))
}

/// Append `content` to `path`, creating the file and its parents if needed.
pub fn append_file(path: &Path, content: &str) -> AuditResult<()> {
    ensure_parent(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AuditError::io(e, path.to_path_buf()))?;
    file.write_all(content.as_bytes())
        .map_err(|e| AuditError::io(e, path.to_path_buf()))
}

pub fn ensure_dir(dir: &Path) -> AuditResult<()> {
    fs::create_dir_all(dir).map_err(|e| AuditError::io(e, dir.to_path_buf()))
}

fn ensure_parent(path: &Path) -> AuditResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// `index.html` -> `index.html.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

/// Copy `path` to its `.bak` sibling unless a backup already exists.
///
/// Returns the backup path and whether a copy was made.
pub fn safe_backup(path: &Path) -> AuditResult<(PathBuf, bool)> {
    let bak = backup_path(path);
    if bak.exists() {
        log::debug!("Backup already present, keeping it: {:?}", bak);
        return Ok((bak, false));
    }
    fs::copy(path, &bak).map_err(|e| AuditError::io(e, bak.clone()))?;
    Ok((bak, true))
}

/// Lexically normalise a path: drop `.` segments and fold `..` into the
/// preceding component. The filesystem is not consulted.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Path of `path` relative to `root` for display, falling back to the full path.
pub fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
