//! Record store inspection and review-status updates.

use console::style;

use intake::config::Config;
use intake::models::{RecordStatus, StoredRow};
use intake::repository::{CsvRecordStore, RecordStore};

use crate::cli::helpers::truncate;
use crate::cli::icons::{success, warn};

fn parse_status(value: &str) -> anyhow::Result<RecordStatus> {
    RecordStatus::from_str(value).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown status '{}' (expected New, Re-Applicant, Reviewed, Shortlisted, or Rejected)",
            value
        )
    })
}

/// List stored rows, optionally filtered by status.
pub fn cmd_rows_list(config: &Config, status: Option<&str>, json: bool) -> anyhow::Result<()> {
    let filter = status.map(parse_status).transpose()?;
    let store = CsvRecordStore::new(&config.storage.rows_path);
    let rows: Vec<StoredRow> = store
        .read_all()?
        .into_iter()
        .filter(|row| filter.is_none_or(|s| row.status == s))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        eprintln!(
            "{} No rows in {}",
            warn(),
            config.storage.rows_path.display()
        );
        return Ok(());
    }

    println!(
        "{:>5}  {:<24} {:<30} {:<12} {:<10} {}",
        style("#").bold(),
        style("Name").bold(),
        style("Email").bold(),
        style("Experience").bold(),
        style("Applied").bold(),
        style("Status").bold()
    );
    println!("{}", "-".repeat(96));
    for row in &rows {
        let status = match row.status {
            RecordStatus::New => style(row.status.as_str()).green(),
            RecordStatus::ReApplicant => style(row.status.as_str()).yellow(),
            RecordStatus::Rejected => style(row.status.as_str()).red(),
            _ => style(row.status.as_str()).cyan(),
        };
        println!(
            "{:>5}  {:<24} {:<30} {:<12} {:<10} {}",
            row.serial,
            truncate(&row.name, 24),
            truncate(&row.email, 30),
            row.experience,
            row.date_applied,
            status
        );
    }
    println!("\n{} rows", rows.len());
    Ok(())
}

/// Set the review status of one row.
pub fn cmd_rows_set_status(config: &Config, serial: u64, status: &str) -> anyhow::Result<()> {
    let status = parse_status(status)?;
    let mut store = CsvRecordStore::new(&config.storage.rows_path);

    if !store.update_status(serial, status)? {
        anyhow::bail!(
            "No row with serial {} in {}",
            serial,
            config.storage.rows_path.display()
        );
    }

    println!("{} Row {} marked {}", success(), serial, style(status).bold());
    Ok(())
}
