//! DOCX text extraction straight from the WordprocessingML zip container.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tempfile::TempDir;
use tracing::debug;
use zip::ZipArchive;

use super::ExtractionError;
use crate::ocr::{OcrBackend, OcrInput};

const BODY_PART: &str = "word/document.xml";
const MEDIA_PREFIX: &str = "word/media/";
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff"];

/// OCR text of embedded images, then headers, body, and footers.
pub(super) fn extract(path: &Path, ocr: Option<&dyn OcrBackend>) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(File::open(path)?)?;

    let mut headers = Vec::new();
    let mut footers = Vec::new();
    let mut media = Vec::new();
    for i in 0..archive.len() {
        let name = archive.by_index(i)?.name().to_string();
        if is_part(&name, "word/header") {
            headers.push(name);
        } else if is_part(&name, "word/footer") {
            footers.push(name);
        } else if name.starts_with(MEDIA_PREFIX) && is_image(&name) {
            media.push(name);
        }
    }
    headers.sort();
    footers.sort();
    media.sort();

    let mut out = String::new();
    if let Some(ocr) = ocr {
        ocr_media(&mut archive, &media, ocr, &mut out)?;
    }

    for part in &headers {
        out.push_str(&part_text(&mut archive, part)?);
    }
    if !archive.file_names().any(|name| name == BODY_PART) {
        return Err(ExtractionError::ExtractionFailed(format!(
            "{} has no {}",
            path.display(),
            BODY_PART
        )));
    }
    out.push_str(&part_text(&mut archive, BODY_PART)?);
    for part in &footers {
        out.push_str(&part_text(&mut archive, part)?);
    }

    Ok(out)
}

fn is_part(name: &str, prefix: &str) -> bool {
    name.starts_with(prefix) && name.ends_with(".xml") && !name[prefix.len()..].contains('/')
}

fn is_image(name: &str) -> bool {
    extension(name).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Write each image into a scoped directory and OCR it.
fn ocr_media(
    archive: &mut ZipArchive<File>,
    media: &[String],
    ocr: &dyn OcrBackend,
    out: &mut String,
) -> Result<(), ExtractionError> {
    if media.is_empty() {
        return Ok(());
    }
    let dir = TempDir::new()?;
    for (index, name) in media.iter().enumerate() {
        let mut data = Vec::new();
        archive.by_name(name)?.read_to_end(&mut data)?;

        let ext = extension(name).unwrap_or_else(|| "png".to_string());
        let image_path = dir.path().join(format!("image-{:03}.{}", index, ext));
        std::fs::write(&image_path, &data)?;

        let text = ocr.recognize(OcrInput::Path(&image_path));
        debug!("OCR of {} recovered {} chars", name, text.trim().len());
        if !text.trim().is_empty() {
            out.push_str(&text);
            out.push('\n');
        }
    }
    Ok(())
}

fn part_text(archive: &mut ZipArchive<File>, name: &str) -> Result<String, ExtractionError> {
    let mut xml = String::new();
    archive.by_name(name)?.read_to_string(&mut xml)?;
    xml_to_text(&xml)
}

/// Flatten WordprocessingML into lines: one per paragraph, tabs as spaces,
/// explicit breaks as newlines.
pub(super) fn xml_to_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut out = String::new();
    let mut in_text = false;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if e.local_name().as_ref() == b"t" {
                    in_text = true;
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => out.push(' '),
                b"br" | b"cr" | b"p" => out.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => out.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}
