//! PDF text extraction via poppler (pdfinfo, pdftotext, pdfimages).
//!
//! The native text layer and OCR of embedded raster images are always both
//! collected, page by page, so scanned pages and image-only headers are
//! recovered alongside regular text.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::{debug, warn};

use super::tools::{check_cmd_status, handle_cmd_output};
use super::ExtractionError;
use crate::ocr::{OcrBackend, OcrInput};

/// Page number used when the page count is unknown and the whole file is
/// handled as one unit.
const WHOLE_DOCUMENT: u32 = 0;

pub(super) fn extract(path: &Path, ocr: Option<&dyn OcrBackend>) -> Result<String, ExtractionError> {
    // Held until all images are OCR'd; removed on every exit path.
    let image_dir = TempDir::new()?;
    let images = match ocr {
        Some(_) => embedded_images(path, image_dir.path()),
        None => BTreeMap::new(),
    };

    let mut out = String::new();
    match page_count(path) {
        Some(pages) => {
            debug!("{} has {} pages", path.display(), pages);
            for page in 1..=pages {
                out.push_str(&page_text(path, Some(page))?);
                out.push('\n');
                if let (Some(ocr), Some(files)) = (ocr, images.get(&page)) {
                    append_ocr(&mut out, ocr, files);
                }
            }
        }
        None => {
            debug!("Page count unavailable for {}, extracting in one pass", path.display());
            out.push_str(&page_text(path, None)?);
            out.push('\n');
            if let Some(ocr) = ocr {
                for files in images.values() {
                    append_ocr(&mut out, ocr, files);
                }
            }
        }
    }
    Ok(out)
}

fn append_ocr(out: &mut String, ocr: &dyn OcrBackend, files: &[PathBuf]) {
    for file in files {
        let text = ocr.recognize(OcrInput::Path(file));
        if !text.trim().is_empty() {
            out.push_str(&text);
            out.push('\n');
        }
    }
}

/// Get page count from a PDF using pdfinfo.
pub(super) fn page_count(path: &Path) -> Option<u32> {
    let output = Command::new("pdfinfo").arg(path).output().ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines() {
        if line.starts_with("Pages:") {
            return line.split_whitespace().nth(1).and_then(|s| s.parse().ok());
        }
    }
    None
}

/// Native text of one page (or the whole file when `page` is `None`).
fn page_text(path: &Path, page: Option<u32>) -> Result<String, ExtractionError> {
    let mut cmd = Command::new("pdftotext");
    cmd.args(["-enc", "UTF-8"]);
    if let Some(page) = page {
        let page = page.to_string();
        cmd.args(["-f", &page, "-l", &page]);
    }
    cmd.arg(path).arg("-");

    handle_cmd_output(
        cmd.output(),
        "pdftotext (install poppler-utils)",
        "pdftotext failed",
    )
}

/// Dump embedded raster images into `dir`, grouped by page.
///
/// Missing `pdfimages` or a failed dump degrades to text-only extraction.
fn embedded_images(path: &Path, dir: &Path) -> BTreeMap<u32, Vec<PathBuf>> {
    let status = Command::new("pdfimages")
        .args(["-png", "-p"])
        .arg(path)
        .arg(dir.join("img"))
        .status();

    if let Err(e) = check_cmd_status(
        status,
        "pdfimages (install poppler-utils)",
        "pdfimages failed to dump images",
    ) {
        warn!("Skipping image OCR for {}: {}", path.display(), e);
        return BTreeMap::new();
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot list extracted images for {}: {}", path.display(), e);
            return BTreeMap::new();
        }
    };

    let mut by_page: BTreeMap<u32, Vec<PathBuf>> = BTreeMap::new();
    for entry in entries.flatten() {
        let file = entry.path();
        let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let page = image_page(name).unwrap_or(WHOLE_DOCUMENT);
        by_page.entry(page).or_default().push(file);
    }
    for files in by_page.values_mut() {
        files.sort();
    }
    by_page
}

/// Page number from a `pdfimages -p` file name (`img-<page>-<index>.png`).
fn image_page(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix("img-")?
        .split('-')
        .next()?
        .parse()
        .ok()
}
