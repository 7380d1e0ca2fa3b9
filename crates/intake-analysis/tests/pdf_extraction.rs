//! PDF extraction against generated fixtures. Needs poppler; each test
//! returns early when the tools it drives are not installed.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use intake_analysis::extract::check_binary;
use intake_analysis::{DocumentTextExtractor, OcrBackend, OcrError, OcrInput};

struct ScriptedOcr {
    text: &'static str,
    seen: Mutex<Vec<PathBuf>>,
}

impl ScriptedOcr {
    fn new(text: &'static str) -> Self {
        Self {
            text,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl OcrBackend for ScriptedOcr {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn availability_hint(&self) -> String {
        "always available".to_string()
    }

    fn try_recognize(&self, input: OcrInput<'_>) -> Result<String, OcrError> {
        if let OcrInput::Path(path) = input {
            self.seen.lock().unwrap().push(path.to_path_buf());
        }
        Ok(self.text.to_string())
    }
}

fn have_tools(tools: &[&str]) -> bool {
    let missing: Vec<&str> = tools.iter().copied().filter(|t| !check_binary(t)).collect();
    if !missing.is_empty() {
        eprintln!("skipping: {} not installed", missing.join(", "));
    }
    missing.is_empty()
}

/// One page of a generated PDF: its text (may be empty) and whether it
/// carries an embedded raster image.
struct PageSpec<'a> {
    text: &'a str,
    image: bool,
}

/// Minimal PDF 1.4 with a Helvetica text run per page and an optional 1x1
/// grayscale image XObject. The xref table carries real offsets.
fn build_pdf(pages: &[PageSpec<'_>]) -> Vec<u8> {
    let mut objects: Vec<Vec<u8>> = Vec::new();
    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", 5 + 2 * i))
        .collect();

    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
    objects.push(
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        )
        .into_bytes(),
    );
    objects.push(b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_vec());
    let mut image = b"<< /Type /XObject /Subtype /Image /Width 1 /Height 1 \
/ColorSpace /DeviceGray /BitsPerComponent 8 /Length 1 >>\nstream\n"
        .to_vec();
    image.push(0x80);
    image.extend_from_slice(b"\nendstream");
    objects.push(image);

    for (i, page) in pages.iter().enumerate() {
        let mut content = String::new();
        if !page.text.is_empty() {
            content.push_str(&format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET\n", page.text));
        }
        if page.image {
            content.push_str("q 20 0 0 20 72 600 cm /Im1 Do Q\n");
        }
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
/Resources << /Font << /F1 3 0 R >> /XObject << /Im1 4 0 R >> >> /Contents {} 0 R >>",
                6 + 2 * i
            )
            .into_bytes(),
        );
        objects.push(
            format!(
                "<< /Length {} >>\nstream\n{}endstream",
                content.len(),
                content
            )
            .into_bytes(),
        );
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }
    let xref = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref
        )
        .as_bytes(),
    );
    out
}

fn write_pdf(dir: &Path, name: &str, pages: &[PageSpec<'_>]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_pdf(pages)).unwrap();
    path
}

#[test]
fn page_text_precedes_that_pages_image_text() {
    if !have_tools(&["pdfinfo", "pdftotext", "pdfimages"]) {
        return;
    }
    let dir = TempDir::new().unwrap();
    let path = write_pdf(
        dir.path(),
        "resume.pdf",
        &[
            PageSpec {
                text: "Jane Doe native heading",
                image: true,
            },
            PageSpec {
                text: "Second page body",
                image: false,
            },
        ],
    );

    let ocr = Arc::new(ScriptedOcr::new("SCANNED CONTACT BLOCK"));
    let extractor = DocumentTextExtractor::new(Some(ocr.clone() as Arc<dyn OcrBackend>));
    let text = extractor.extract(&path).unwrap();
    let full = text.full_text();

    let native = full.find("Jane Doe native heading").expect("page one text");
    let scanned = full.find("SCANNED CONTACT BLOCK").expect("page one OCR text");
    let second = full.find("Second page body").expect("page two text");
    assert!(native < scanned, "{:?}", full);
    assert!(scanned < second, "{:?}", full);

    let seen = ocr.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(!seen[0].exists(), "extracted images are removed afterwards");
}

#[test]
fn native_text_does_not_suppress_ocr() {
    if !have_tools(&["pdfinfo", "pdftotext", "pdfimages"]) {
        return;
    }
    let dir = TempDir::new().unwrap();
    let path = write_pdf(
        dir.path(),
        "resume.pdf",
        &[PageSpec {
            text: "Plenty of native text on this page already",
            image: true,
        }],
    );

    let ocr = Arc::new(ScriptedOcr::new("Logo Text"));
    let text = DocumentTextExtractor::new(Some(ocr as Arc<dyn OcrBackend>))
        .extract(&path)
        .unwrap();
    assert!(text.full_text().contains("Plenty of native text"));
    assert!(text.full_text().contains("Logo Text"));
}

#[test]
fn blank_pdf_yields_empty_text() {
    if !have_tools(&["pdftotext"]) {
        return;
    }
    let dir = TempDir::new().unwrap();
    let path = write_pdf(
        dir.path(),
        "blank.pdf",
        &[PageSpec {
            text: "",
            image: false,
        }],
    );

    let ocr = Arc::new(ScriptedOcr::new("never used"));
    let text = DocumentTextExtractor::new(Some(ocr.clone() as Arc<dyn OcrBackend>))
        .extract(&path)
        .unwrap();
    assert!(text.is_empty(), "{:?}", text.full_text());
    assert!(ocr.seen.lock().unwrap().is_empty());
}
