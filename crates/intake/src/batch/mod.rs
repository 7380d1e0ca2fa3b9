//! Sequential batch processing of resume files.
//!
//! A batch walks its file list in order on a single task. Each file goes
//! through a [`FileProcessor`], the duplicate check, and the record store;
//! progress is reported as [`BatchEvent`]s so a front end can render it
//! without blocking on extraction.

mod events;
mod runner;

pub use events::{BatchEvent, BatchSummary};
pub use runner::{BatchError, BatchRunner, DuplicateCheck};

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ParseError;
use crate::models::CandidateRecord;

/// Turns one file into a candidate record.
#[async_trait]
pub trait FileProcessor: Send + Sync {
    async fn process(&self, path: &Path) -> Result<CandidateRecord, ParseError>;
}

/// Cooperative cancellation shared between the controller and the batch.
///
/// The batch checks it before each file; the file in flight always finishes.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
