//! Tesseract OCR backend implementation.
//!
//! Uses Tesseract OCR via command-line for text extraction.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use tracing::debug;

use super::backend::{OcrBackend, OcrError, OcrInput};

/// Install locations checked before falling back to a PATH lookup.
const WELL_KNOWN_PATHS: &[&str] = &[
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
];

static TESSERACT_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Locate the tesseract executable, probing at most once per process.
///
/// The answer, including "not found", is memoized.
pub fn resolve_tesseract() -> Option<&'static Path> {
    TESSERACT_PATH.get_or_init(probe_tesseract).as_deref()
}

fn probe_tesseract() -> Option<PathBuf> {
    let found = WELL_KNOWN_PATHS
        .iter()
        .map(Path::new)
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
        .or_else(|| which::which("tesseract").ok());
    match found {
        Some(ref path) => debug!("Using tesseract at {}", path.display()),
        None => debug!("tesseract not found"),
    }
    found
}

/// Resolve a configured command. Bare names go through PATH like
/// `Command::new` would; anything with a directory part must be a file.
fn resolve_command(command: &Path) -> Option<PathBuf> {
    let bare = command
        .parent()
        .is_none_or(|parent| parent.as_os_str().is_empty());
    if bare {
        which::which(command).ok()
    } else if command.is_file() {
        Some(command.to_path_buf())
    } else {
        None
    }
}

/// Tesseract OCR backend.
pub struct TesseractBackend {
    /// Explicit executable; when unset the probed path is used.
    command: Option<PathBuf>,
    resolved_command: Option<PathBuf>,
    language: String,
}

impl TesseractBackend {
    /// Create a new Tesseract backend with default settings.
    pub fn new() -> Self {
        Self {
            command: None,
            resolved_command: None,
            language: "eng".to_string(),
        }
    }

    pub fn with_command(mut self, command: impl Into<PathBuf>) -> Self {
        let command = command.into();
        self.resolved_command = resolve_command(&command);
        self.command = Some(command);
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    fn executable(&self) -> Option<&Path> {
        match self.command {
            Some(_) => self.resolved_command.as_deref(),
            None => resolve_tesseract(),
        }
    }

    /// Run Tesseract on an image file.
    fn run_tesseract(&self, image_path: &Path) -> Result<String, OcrError> {
        let executable = self.executable().ok_or_else(|| match self.command {
            Some(ref command) => OcrError::BackendNotAvailable(format!(
                "configured tesseract {} not found",
                command.display()
            )),
            None => OcrError::BackendNotAvailable(
                "tesseract not found (install tesseract-ocr)".to_string(),
            ),
        })?;

        let output = Command::new(executable)
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output();

        match output {
            Ok(output) => {
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).to_string())
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(OcrError::OcrFailed(format!("tesseract failed: {}", stderr)))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(OcrError::BackendNotAvailable(format!(
                    "tesseract not found at {}",
                    executable.display()
                )))
            }
            Err(e) => Err(OcrError::Io(e)),
        }
    }
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrBackend for TesseractBackend {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        self.executable().is_some()
    }

    fn availability_hint(&self) -> String {
        match (self.executable(), &self.command) {
            (Some(path), _) => format!("Tesseract found at {}", path.display()),
            (None, Some(command)) => format!(
                "Configured tesseract {} not found (check TESSERACT_CMD)",
                command.display()
            ),
            (None, None) => {
                "Tesseract not installed. Install with: apt install tesseract-ocr".to_string()
            }
        }
    }

    fn try_recognize(&self, input: OcrInput<'_>) -> Result<String, OcrError> {
        match input {
            OcrInput::Path(path) => self.run_tesseract(path),
            OcrInput::Bytes { data, extension } => {
                let mut file = tempfile::Builder::new()
                    .prefix("intake-ocr-")
                    .suffix(&format!(".{}", extension))
                    .tempfile()?;
                file.write_all(data)?;
                file.flush()?;
                self.run_tesseract(file.path())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_is_memoized() {
        let first = resolve_tesseract();
        let second = resolve_tesseract();
        assert_eq!(first, second);
        if let (Some(a), Some(b)) = (first, second) {
            assert!(std::ptr::eq(a, b));
        }
    }

    #[test]
    fn test_missing_binary_yields_empty_text() {
        let backend = TesseractBackend::new().with_command("/nonexistent/bin/tesseract");
        assert!(!backend.is_available());
        assert!(backend.availability_hint().contains("not found"));

        let err = backend
            .try_recognize(OcrInput::Path(Path::new("/tmp/scan.png")))
            .unwrap_err();
        assert!(matches!(err, OcrError::BackendNotAvailable(_)));

        let text = backend.recognize(OcrInput::Bytes {
            data: b"\x89PNG\r\n\x1a\n",
            extension: "png",
        });
        assert_eq!(text, "");
    }

    #[test]
    fn test_bare_command_resolves_through_path() {
        let missing = TesseractBackend::new().with_command("intake-no-such-tesseract");
        assert!(!missing.is_available());
        assert!(missing
            .availability_hint()
            .contains("Configured tesseract intake-no-such-tesseract not found"));

        #[cfg(unix)]
        {
            let bare = TesseractBackend::new().with_command("sh");
            assert!(bare.is_available());
            assert!(bare.availability_hint().starts_with("Tesseract found at /"));
        }
    }
}
