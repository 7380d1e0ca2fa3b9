//! Batch intake: parse, de-duplicate, and store.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use intake::batch::{BatchEvent, BatchRunner, DuplicateCheck, StopFlag};
use intake::config::{Config, DuplicatePolicyKind, ExtractionMode};
use intake::models::RecordStatus;
use intake::repository::{CsvRecordStore, SqliteIdentityStore};
use intake::services::DuplicateResolutionPolicy;
use intake_annotate::ResumeParser;

use crate::cli::helpers::{collect_inputs, file_label, truncate};
use crate::cli::icons::{dim_arrow, error, info, success, warn};

pub struct RunOptions {
    pub mode: Option<ExtractionMode>,
    pub duplicate_check: bool,
    pub window_days: Option<i64>,
}

fn duplicate_check(config: &Config, window_days: Option<i64>) -> anyhow::Result<DuplicateCheck> {
    if let Some(window_days) = window_days {
        return Ok(DuplicateCheck::TimeWindow { window_days });
    }
    Ok(match config.duplicates.policy {
        DuplicatePolicyKind::Identity => DuplicateCheck::Identity {
            policy: DuplicateResolutionPolicy::from_config(&config.duplicates),
            store: Box::new(SqliteIdentityStore::open(&config.storage.identity_db)?),
        },
        DuplicatePolicyKind::TimeWindow => DuplicateCheck::TimeWindow {
            window_days: config.duplicates.window_days,
        },
    })
}

/// Process resumes into the record store, honoring Ctrl-C between files.
pub async fn cmd_run(
    mut config: Config,
    inputs: &[PathBuf],
    options: RunOptions,
) -> anyhow::Result<()> {
    if let Some(mode) = options.mode {
        config.extraction.mode = mode;
    }

    let files = collect_inputs(inputs)?;
    if files.is_empty() {
        eprintln!("{} No PDF or DOCX files found", warn());
        return Ok(());
    }

    let parser = ResumeParser::from_config(&config)?;
    let records = CsvRecordStore::new(&config.storage.rows_path);
    let check_enabled = options.duplicate_check && config.duplicates.enabled;
    let mut runner = BatchRunner::new(
        Arc::new(parser),
        Box::new(records),
        duplicate_check(&config, options.window_days)?,
    )
    .with_duplicate_check(check_enabled)
    .with_file_timeout(Duration::from_secs(config.extraction.file_timeout_secs));

    println!(
        "{} Processing {} files (mode: {}, duplicate check: {})",
        info(),
        files.len(),
        config.extraction.mode.as_str(),
        if check_enabled { "on" } else { "off" }
    );
    println!(
        "  {} Rows: {}",
        dim_arrow(),
        config.storage.rows_path.display()
    );

    let stop = StopFlag::new();
    let ctrl_c_stop = stop.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_stop.request_stop();
            eprintln!(
                "\n{} Stopping after the current file...",
                style("!").yellow()
            );
        }
    });

    let (event_tx, mut event_rx) = mpsc::channel::<BatchEvent>(100);

    let event_handler = tokio::spawn(async move {
        let mut progress: Option<ProgressBar> = None;
        while let Some(event) = event_rx.recv().await {
            match event {
                BatchEvent::Started { total_files } => {
                    let bar = ProgressBar::new(total_files as u64);
                    bar.set_style(
                        ProgressStyle::default_bar()
                            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
                            .unwrap_or_else(|_| ProgressStyle::default_bar())
                            .progress_chars("█▓░"),
                    );
                    bar.enable_steady_tick(Duration::from_millis(120));
                    progress = Some(bar);
                }
                BatchEvent::FileStarted { path, .. } => {
                    if let Some(ref bar) = progress {
                        bar.set_message(truncate(&file_label(&path), 40));
                    }
                }
                BatchEvent::FileAdded {
                    path,
                    serial,
                    status,
                    record,
                } => {
                    if let Some(ref bar) = progress {
                        if status == RecordStatus::ReApplicant {
                            bar.println(format!(
                                "{} #{} {} ({}) re-applied",
                                warn(),
                                serial,
                                record.name,
                                file_label(&path)
                            ));
                        }
                        bar.inc(1);
                    }
                }
                BatchEvent::FileSkipped { path, reason } => {
                    if let Some(ref bar) = progress {
                        bar.println(format!(
                            "{} {} skipped: {}",
                            dim_arrow(),
                            file_label(&path),
                            reason
                        ));
                        bar.inc(1);
                    }
                }
                BatchEvent::FileFailed { path, error: e } => {
                    if let Some(ref bar) = progress {
                        bar.println(format!("{} {}: {}", error(), file_label(&path), e));
                        bar.inc(1);
                    }
                }
                BatchEvent::Finished(summary) => {
                    if let Some(bar) = progress.take() {
                        bar.finish_and_clear();
                    }
                    let icon = if summary.failed > 0 { warn() } else { success() };
                    println!("{} {}", icon, summary);
                }
            }
        }
        if let Some(bar) = progress.take() {
            bar.abandon();
        }
    });

    let result = runner.run(files, stop, event_tx).await;
    let _ = event_handler.await;
    ctrl_c.abort();

    result?;
    Ok(())
}
