//! End-to-end parsing of generated DOCX resumes.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use intake::batch::FileProcessor;
use intake::ParseError;
use intake_analysis::DocumentTextExtractor;
use intake_annotate::services::experience::ExperienceInferencer;
use intake_annotate::services::fields::RegexFieldExtractor;
use intake_annotate::services::skills::SkillVocabulary;
use intake_annotate::ResumeParser;

fn write_docx(dir: &Path, name: &str, paragraphs: &[&str]) -> PathBuf {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut zip = ZipWriter::new(file);
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
    path
}

fn parser() -> ResumeParser {
    let fields = RegexFieldExtractor::new(SkillVocabulary::new(
        ["python", "sql", "linux"].map(String::from).to_vec(),
    ))
    .with_experience(ExperienceInferencer::with_current_year(2025));
    ResumeParser::new(DocumentTextExtractor::new(None), Arc::new(fields))
}

#[tokio::test]
async fn parses_a_docx_resume() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(
        dir.path(),
        "jane.docx",
        &[
            "Resume",
            "Jane   Doe",
            "Email: jane@x.com, JANE@X.COM, b@x.com",
            "Phone: 555-123-4567",
            "Python and Linux administration",
            "Acme 2019 - present",
        ],
    );

    let record = parser().process(&path).await.unwrap();
    assert_eq!(record.name, "Jane Doe");
    assert_eq!(record.email, "b@x.com, jane@x.com");
    assert_eq!(record.phone, "555-123-4567");
    assert_eq!(record.skills, "python, linux");
    assert_eq!(record.experience_years, "6 years");
    assert!(record.source_path.is_absolute());
}

#[tokio::test]
async fn empty_document_has_no_extractable_content() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(dir.path(), "blank.docx", &["   "]);

    let err = parser().process(&path).await.unwrap_err();
    assert!(matches!(err, ParseError::NoExtractableContent(_)));
}

#[tokio::test]
async fn text_without_identity_fails_extraction() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(
        dir.path(),
        "anon.docx",
        &["Professional Summary", "loves python and sql"],
    );

    let err = parser().process(&path).await.unwrap_err();
    assert!(matches!(err, ParseError::ExtractionFailed(_)));
}

#[tokio::test]
async fn unsupported_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.txt");
    std::fs::write(&path, "Jane Doe").unwrap();

    let err = parser().process(&path).await.unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedFormat(_)));
}

#[tokio::test]
async fn corrupt_docx_is_a_document_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.docx");
    std::fs::write(&path, b"not a zip").unwrap();

    let err = parser().process(&path).await.unwrap_err();
    assert!(matches!(err, ParseError::Document(_)));
}
