//! Source documents and the normalized text recovered from them.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ParseError;

/// Default character budget for the truncated view of extracted text.
pub const DEFAULT_MAX_CHARS: usize = 3500;

/// Supported resume container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Docx,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    /// Classify by extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

/// A resume file queued for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub path: PathBuf,
    pub kind: FileKind,
}

impl RawDocument {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ParseError> {
        let path = path.into();
        let kind = FileKind::from_path(&path)
            .ok_or_else(|| ParseError::UnsupportedFormat(path.display().to_string()))?;
        Ok(Self { path, kind })
    }
}

/// Normalized whole-document text.
///
/// Every line has runs of whitespace collapsed to a single space and control
/// characters removed; blank lines are dropped. The full line sequence is
/// kept for heuristics that scan line by line, while [`ExtractedText::text`]
/// is bounded by the character budget given at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    full: String,
    max_chars: usize,
}

impl ExtractedText {
    pub fn from_raw(raw: &str, max_chars: usize) -> Self {
        let full = raw
            .split(['\n', '\r'])
            .map(normalize_line)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        Self { full, max_chars }
    }

    pub fn empty() -> Self {
        Self {
            full: String::new(),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.full.is_empty()
    }

    /// Text truncated to the character budget, cut on a char boundary.
    pub fn text(&self) -> &str {
        truncate_chars(&self.full, self.max_chars)
    }

    /// The complete normalized text, ignoring the budget.
    pub fn full_text(&self) -> &str {
        &self.full
    }

    /// Ordered non-empty lines of the complete text.
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.full.lines()
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }
}

fn normalize_line(line: &str) -> String {
    line.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cut `text` to at most `max_chars` characters (UTF-8 safe).
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_is_case_insensitive() {
        assert_eq!(FileKind::from_path(Path::new("cv.PDF")), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_path(Path::new("cv.Docx")), Some(FileKind::Docx));
        assert_eq!(FileKind::from_path(Path::new("cv.doc")), None);
        assert_eq!(FileKind::from_path(Path::new("cv")), None);
    }

    #[test]
    fn test_raw_document_rejects_other_formats() {
        let err = RawDocument::new("resume.txt").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_normalization_collapses_whitespace_and_drops_blank_lines() {
        let text = ExtractedText::from_raw("  Jane   Doe \r\n\n\t\nEmail:\tjane@x.com\x0c\n   \n", 100);
        assert_eq!(text.full_text(), "Jane Doe\nEmail: jane@x.com");
        assert_eq!(text.lines().collect::<Vec<_>>(), vec!["Jane Doe", "Email: jane@x.com"]);
        // lines() can be walked more than once
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_whitespace_only_input_is_empty() {
        assert!(ExtractedText::from_raw(" \n\t\n\r\n", 100).is_empty());
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let text = ExtractedText::from_raw("héllo wörld", 4);
        assert_eq!(text.text(), "héll");
        assert_eq!(text.full_text(), "héllo wörld");
    }
}
