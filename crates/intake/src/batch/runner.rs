//! Batch runner: drives files through processing, duplicate checks, and storage.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use super::{BatchEvent, BatchSummary, FileProcessor, StopFlag};
use crate::error::{ParseError, StoreError};
use crate::models::{CandidateRecord, RecordStatus};
use crate::repository::{IdentityStore, RecordStore};
use crate::services::{is_recent_duplicate, Disposition, DuplicateResolutionPolicy};

#[derive(Debug, Error)]
pub enum BatchError {
    /// A store write failed; the batch stops so the operator can retry.
    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),
}

/// Duplicate rule applied to each accepted candidate.
pub enum DuplicateCheck {
    Identity {
        policy: DuplicateResolutionPolicy,
        store: Box<dyn IdentityStore>,
    },
    TimeWindow {
        window_days: i64,
    },
}

/// Drives a list of files through a [`FileProcessor`] one at a time.
pub struct BatchRunner {
    processor: Arc<dyn FileProcessor>,
    records: Box<dyn RecordStore>,
    duplicates: DuplicateCheck,
    check_enabled: bool,
    file_timeout: Duration,
}

impl BatchRunner {
    pub fn new(
        processor: Arc<dyn FileProcessor>,
        records: Box<dyn RecordStore>,
        duplicates: DuplicateCheck,
    ) -> Self {
        Self {
            processor,
            records,
            duplicates,
            check_enabled: true,
            file_timeout: Duration::from_secs(300),
        }
    }

    pub fn with_duplicate_check(mut self, enabled: bool) -> Self {
        self.check_enabled = enabled;
        self
    }

    pub fn with_file_timeout(mut self, timeout: Duration) -> Self {
        self.file_timeout = timeout;
        self
    }

    /// Record store, for inspection after a run.
    pub fn records(&self) -> &dyn RecordStore {
        self.records.as_ref()
    }

    /// Process `files` in order until done or `stop` is raised.
    ///
    /// Per-file failures are reported and counted; a store failure aborts
    /// the batch with [`BatchError::Persistence`].
    pub async fn run(
        &mut self,
        files: Vec<PathBuf>,
        stop: StopFlag,
        event_tx: mpsc::Sender<BatchEvent>,
    ) -> Result<BatchSummary, BatchError> {
        let mut summary = BatchSummary {
            total: files.len(),
            ..Default::default()
        };
        let _ = event_tx
            .send(BatchEvent::Started {
                total_files: files.len(),
            })
            .await;
        info!("Starting batch of {} files", files.len());

        for (index, path) in files.into_iter().enumerate() {
            if stop.is_stop_requested() {
                warn!("Stop requested, {} files left unprocessed", summary.total - index);
                summary.stopped = true;
                break;
            }

            let _ = event_tx
                .send(BatchEvent::FileStarted {
                    index,
                    path: path.clone(),
                })
                .await;

            let processing = self.processor.process(&path);
            let outcome = match tokio::time::timeout(self.file_timeout, processing).await {
                Ok(result) => result,
                Err(_) => Err(ParseError::TimedOut(self.file_timeout.as_secs())),
            };

            let record = match outcome {
                Ok(record) => record,
                Err(e) => {
                    error!("Failed to process {}: {}", path.display(), e);
                    summary.failed += 1;
                    let _ = event_tx
                        .send(BatchEvent::FileFailed {
                            path,
                            error: e.to_string(),
                        })
                        .await;
                    continue;
                }
            };

            match self.persist(&record) {
                Ok(Some((serial, status))) => {
                    summary.added += 1;
                    let _ = event_tx
                        .send(BatchEvent::FileAdded {
                            path,
                            serial,
                            status,
                            record,
                        })
                        .await;
                }
                Ok(None) => {
                    summary.skipped += 1;
                    let _ = event_tx
                        .send(BatchEvent::FileSkipped {
                            path,
                            reason: "duplicate".to_string(),
                        })
                        .await;
                }
                Err(e) => {
                    error!("Failed to store {}: {}", path.display(), e);
                    summary.failed += 1;
                    let _ = event_tx
                        .send(BatchEvent::FileFailed {
                            path,
                            error: e.to_string(),
                        })
                        .await;
                    return Err(BatchError::Persistence(e));
                }
            }
        }

        info!("{}", summary);
        let _ = event_tx.send(BatchEvent::Finished(summary.clone())).await;
        Ok(summary)
    }

    /// Apply the duplicate rule and append the row. `None` means duplicate.
    ///
    /// The identity store is written only after the row is appended, so a
    /// failed append leaves nothing behind for a retry to trip over.
    fn persist(
        &mut self,
        record: &CandidateRecord,
    ) -> Result<Option<(u64, RecordStatus)>, StoreError> {
        let (disposition, resolution) = match &self.duplicates {
            DuplicateCheck::Identity { policy, store } => {
                let resolution = policy.decide(record, &**store, self.check_enabled)?;
                (resolution.disposition, Some(resolution))
            }
            DuplicateCheck::TimeWindow { window_days } => {
                let duplicate = self.check_enabled
                    && match record.primary_email() {
                        Some(email) => is_recent_duplicate(
                            &self.records.read_all()?,
                            &email,
                            *window_days,
                            Local::now().date_naive(),
                        ),
                        None => false,
                    };
                if duplicate {
                    (Disposition::Duplicate, None)
                } else {
                    (Disposition::New, None)
                }
            }
        };

        let status = match disposition {
            Disposition::Duplicate => return Ok(None),
            Disposition::New => RecordStatus::New,
            Disposition::ReApplicant => RecordStatus::ReApplicant,
        };
        let serial = self.records.append(record, status)?;

        if let (Some(resolution), DuplicateCheck::Identity { store, .. }) =
            (resolution, &mut self.duplicates)
        {
            resolution.commit(store.as_mut())?;
        }
        Ok(Some((serial, status)))
    }
}
