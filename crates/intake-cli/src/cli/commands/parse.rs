//! One-off parsing without touching the stores.

use std::path::PathBuf;

use console::style;

use intake::config::{Config, ExtractionMode};
use intake::models::CandidateRecord;
use intake_annotate::ResumeParser;

use crate::cli::helpers::{collect_inputs, file_label};
use crate::cli::icons::{error, success, warn};

/// Parse resumes and print what was recognized.
pub async fn cmd_parse(
    mut config: Config,
    inputs: &[PathBuf],
    mode: Option<ExtractionMode>,
    json: bool,
) -> anyhow::Result<()> {
    if let Some(mode) = mode {
        config.extraction.mode = mode;
    }
    let parser = ResumeParser::from_config(&config)?;
    let files = collect_inputs(inputs)?;

    if files.is_empty() {
        eprintln!("{} No PDF or DOCX files found", warn());
        return Ok(());
    }

    let mut failed = 0usize;
    for path in &files {
        match parser.parse(path).await {
            Ok(record) if json => println!("{}", serde_json::to_string(&record)?),
            Ok(record) => print_record(&record),
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {}", error(), file_label(path), e);
            }
        }
    }

    if failed > 0 {
        eprintln!(
            "\n{} {} of {} files could not be parsed",
            warn(),
            failed,
            files.len()
        );
    }
    Ok(())
}

fn print_record(record: &CandidateRecord) {
    println!(
        "{} {}",
        success(),
        style(file_label(&record.source_path)).bold()
    );
    for (label, value) in [
        ("Name", &record.name),
        ("Email", &record.email),
        ("Phone", &record.phone),
        ("Skills", &record.skills),
        ("Experience", &record.experience_years),
    ] {
        let shown = if value.is_empty() {
            style("-".to_string()).dim()
        } else {
            style(value.clone())
        };
        println!("    {:<12} {}", label, shown);
    }
}
