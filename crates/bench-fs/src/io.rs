//! Atomic whole-file I/O with file locking

use std::fs::{self, OpenOptions};
use std::io::Write;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers never observe a partially
/// written listing or state document. The advisory lock only serializes
/// writers of the same temp file; it does not detect lost updates between
/// two commands running against one bench.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    FileExt::unlock(&temp_file).map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;
    drop(temp_file);

    fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e))?;

    tracing::trace!(path = %path, bytes = content.len(), "wrote file atomically");
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read text content, treating a missing file as `None`.
///
/// Any other I/O failure is still an error.
pub fn read_text_opt(path: &NormalizedPath) -> Result<Option<String>> {
    match read_text(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Read a newline-separated listing such as `sites/apps.txt`.
///
/// Lines are trimmed and blank lines skipped. A missing file is an empty
/// listing.
pub fn read_lines(path: &NormalizedPath) -> Result<Vec<String>> {
    let content = read_text_opt(path)?.unwrap_or_default();
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Write a listing with one entry per line, each terminated by `\n`.
pub fn write_lines<S: AsRef<str>>(path: &NormalizedPath, lines: &[S]) -> Result<()> {
    let mut content = String::new();
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }
    write_text(path, &content)
}
