//! Helper utilities for CLI commands.

use std::path::{Path, PathBuf};

use intake::models::FileKind;

/// Truncate to at most `max` characters, ending in "..." when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Expand the command-line inputs into resume files.
///
/// Files are taken as given, even with unsupported extensions, so the batch
/// reports them. Directories contribute their PDF and DOCX files (not
/// recursively) in name order.
pub fn collect_inputs(inputs: &[PathBuf]) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(resumes_in(input)?);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn resumes_in(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && FileKind::from_path(&path).is_some() {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// Display name for a path: its file name, or the whole path.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
