//! Backup rotation and crash-safe replacement of manifest files.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::core::constants;
use crate::error::Result;

/// First free backup name for `path`.
///
/// `<file>.backup`, then `<file>.backup.1`, `<file>.backup.2`, ... Existing
/// backups are never reused.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut base = OsString::from(path.as_os_str());
    base.push(constants::BACKUP_SUFFIX);
    let base = PathBuf::from(base);
    if !base.exists() {
        return base;
    }

    let mut counter = 1u32;
    loop {
        let mut candidate = OsString::from(base.as_os_str());
        candidate.push(format!(".{}", counter));
        let candidate = PathBuf::from(candidate);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Replace `path` with `contents`, keeping the old file as a backup.
///
/// The new contents are written and synced to a temporary file next to
/// `path` first; only then is the old file renamed to its backup name and
/// the temporary file moved into place. If the final move fails the
/// temporary file is kept and its location reported in the error.
///
/// Returns the backup path.
pub fn replace_with_backup(path: &Path, contents: &str) -> Result<PathBuf> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(contents.as_bytes())?;
    staged.as_file().sync_all()?;
    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(staged.path(), meta.permissions())?;
    }

    let backup = backup_path(path);
    fs::rename(path, &backup)?;
    debug!(from = %path.display(), to = %backup.display(), "rotated backup");

    if let Err(err) = staged.persist(path) {
        let reason = err.error.to_string();
        let kept = match err.file.keep() {
            Ok((_, kept)) => kept.display().to_string(),
            Err(_) => "<lost>".to_string(),
        };
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!(
                "failed to write {} ({}); new content kept at {}, previous content at {}",
                path.display(),
                reason,
                kept,
                backup.display()
            ),
        )
        .into());
    }

    Ok(backup)
}
