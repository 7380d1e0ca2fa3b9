//! Environment check for extraction tools, OCR, and the LLM.

use console::style;

use intake::config::{Config, ExtractionMode};
use intake::llm::LlmClient;
use intake_analysis::{DocumentTextExtractor, OcrBackend, TesseractBackend};

fn status(ok: bool, yes: &'static str, no: &'static str) -> console::StyledObject<&'static str> {
    if ok {
        style(yes).green()
    } else {
        style(no).red()
    }
}

/// Report which external dependencies are usable with this configuration.
pub async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    println!("\n{}", style("Extraction Status").bold());
    println!("{}", "-".repeat(50));

    println!("\n{}", style("PDF Tools:").cyan());
    let mut all_found = true;
    for (tool, available) in DocumentTextExtractor::check_tools() {
        all_found &= available;
        println!("  {:<15} {}", tool, status(available, "✓ found", "✗ not found"));
    }
    if !all_found {
        println!(
            "                  {}",
            style("Install poppler-utils to read PDFs").dim()
        );
    }

    println!("\n{}", style("OCR:").cyan());
    if config.ocr.enabled {
        let mut tesseract = TesseractBackend::new().with_language(&config.ocr.language);
        if let Some(ref command) = config.ocr.tesseract_path {
            tesseract = tesseract.with_command(command);
        }
        let available = tesseract.is_available();
        println!(
            "  {:<15} {}",
            "Tesseract",
            status(available, "✓ available", "✗ not available")
        );
        println!(
            "                  {}",
            style(tesseract.availability_hint()).dim()
        );
    } else {
        println!("  {:<15} {}", "Tesseract", style("disabled").dim());
    }

    println!("\n{}", style("Field Extraction:").cyan());
    println!("  {:<15} {}", "Mode", config.extraction.mode.as_str());
    match config.skill_vocabulary() {
        Ok(skills) => println!("  {:<15} {} terms", "Skills", skills.len()),
        Err(e) => println!("  {:<15} {}", "Skills", style(format!("✗ {}", e)).red()),
    }

    let llm = &config.llm;
    if config.extraction.mode == ExtractionMode::Llm || !llm.is_default() {
        let available = match LlmClient::new(llm.clone()) {
            Ok(client) => client.is_available().await,
            Err(_) => false,
        };
        println!(
            "  {:<15} {}",
            "LLM",
            status(available, "✓ reachable", "✗ unreachable")
        );
        println!(
            "                  {}",
            style(format!("{} (model: {})", llm.endpoint, llm.model)).dim()
        );
        if !llm.enabled {
            println!(
                "                  {}",
                style("LLM is disabled (set LLM_ENABLED=true)").dim()
            );
        }
    }

    println!("\n{}", style("Storage:").cyan());
    println!(
        "  {:<15} {}",
        "Rows",
        config.storage.rows_path.display()
    );
    println!(
        "  {:<15} {}",
        "Identity DB",
        config.storage.identity_db.display()
    );
    println!();

    Ok(())
}
