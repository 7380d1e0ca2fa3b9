//! Record store implementations.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::Local;
use tempfile::NamedTempFile;
use tracing::debug;

use super::{RecordStore, Result};
use crate::models::{CandidateRecord, RecordStatus, StoredRow};

/// Date format of the `DateApplied` column.
pub const ROW_DATE_FORMAT: &str = "%Y-%m-%d";

fn build_row(serial: u64, record: &CandidateRecord, status: RecordStatus) -> StoredRow {
    StoredRow {
        serial,
        name: record.name.clone(),
        email: record.email.clone(),
        phone: record.phone.clone(),
        skills: record.skills.clone(),
        experience: record.experience_years.clone(),
        date_applied: Local::now().format(ROW_DATE_FORMAT).to_string(),
        status,
        resume_path: record.source_path.display().to_string(),
    }
}

fn next_serial(rows: &[StoredRow]) -> u64 {
    rows.iter().map(|r| r.serial).max().unwrap_or(0) + 1
}

/// CSV file with a header row, readable by any spreadsheet tool.
///
/// Appends go straight to the end of the file; status updates rewrite it
/// through a temporary file in the same directory and rename it into place.
pub struct CsvRecordStore {
    path: PathBuf,
}

impl CsvRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_blank(&self) -> bool {
        std::fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true)
    }

    fn rewrite(&self, rows: &[StoredRow]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let temp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = csv::Writer::from_writer(temp.as_file());
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl RecordStore for CsvRecordStore {
    fn append(&mut self, record: &CandidateRecord, status: RecordStatus) -> Result<u64> {
        let write_header = self.is_blank();
        let serial = next_serial(&self.read_all()?);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(build_row(serial, record, status))?;
        writer.flush()?;

        debug!("Appended row {} to {}", serial, self.path.display());
        Ok(serial)
    }

    fn read_all(&self) -> Result<Vec<StoredRow>> {
        if self.is_blank() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row?);
        }
        Ok(rows)
    }

    fn update_status(&mut self, serial: u64, status: RecordStatus) -> Result<bool> {
        let mut rows = self.read_all()?;
        let Some(row) = rows.iter_mut().find(|r| r.serial == serial) else {
            return Ok(false);
        };
        row.status = status;
        self.rewrite(&rows)?;
        Ok(true)
    }
}

/// In-memory record store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    rows: Vec<StoredRow>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn append(&mut self, record: &CandidateRecord, status: RecordStatus) -> Result<u64> {
        let serial = next_serial(&self.rows);
        self.rows.push(build_row(serial, record, status));
        Ok(serial)
    }

    fn read_all(&self) -> Result<Vec<StoredRow>> {
        Ok(self.rows.clone())
    }

    fn update_status(&mut self, serial: u64, status: RecordStatus) -> Result<bool> {
        match self.rows.iter_mut().find(|r| r.serial == serial) {
            Some(row) => {
                row.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn candidate(name: &str, email: &str) -> CandidateRecord {
        CandidateRecord {
            name: name.to_string(),
            email: email.to_string(),
            phone: "+1 555 010 0100".to_string(),
            skills: "python, sql".to_string(),
            experience_years: "4 years".to_string(),
            source_path: PathBuf::from(format!("/resumes/{}.pdf", name)),
        }
    }

    #[test]
    fn test_csv_serials_follow_insertion_order() {
        let dir = TempDir::new().unwrap();
        let mut store = CsvRecordStore::new(dir.path().join("rows.csv"));

        let serials: Vec<u64> = ["ann", "bob", "cai"]
            .iter()
            .map(|n| store.append(&candidate(n, &format!("{}@x.com", n)), RecordStatus::New))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(serials, vec![1, 2, 3]);

        let rows = store.read_all().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].name, "bob");
        assert_eq!(rows[1].skills, "python, sql");
        assert_eq!(rows[2].status, RecordStatus::New);
        assert_eq!(rows[0].date_applied.len(), 10);
    }

    #[test]
    fn test_csv_header_written_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rows.csv");
        let mut store = CsvRecordStore::new(&path);
        store.append(&candidate("ann", "ann@x.com"), RecordStatus::New).unwrap();
        store.append(&candidate("bob", "bob@x.com"), RecordStatus::ReApplicant).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("Serial,Name,Email").count(), 1);
        assert!(contents.contains("Re-Applicant"));
    }

    #[test]
    fn test_csv_update_status_rewrites_in_place() {
        let dir = TempDir::new().unwrap();
        let mut store = CsvRecordStore::new(dir.path().join("nested").join("rows.csv"));
        store.append(&candidate("ann", "ann@x.com"), RecordStatus::New).unwrap();
        store.append(&candidate("bob", "bob@x.com"), RecordStatus::New).unwrap();

        assert!(store.update_status(2, RecordStatus::Shortlisted).unwrap());
        assert!(!store.update_status(9, RecordStatus::Rejected).unwrap());

        let rows = store.read_all().unwrap();
        assert_eq!(rows[0].status, RecordStatus::New);
        assert_eq!(rows[1].status, RecordStatus::Shortlisted);

        // appends continue after a rewrite
        let serial = store.append(&candidate("cai", "cai@x.com"), RecordStatus::New).unwrap();
        assert_eq!(serial, 3);
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let store = CsvRecordStore::new("/nonexistent/dir/rows.csv");
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryRecordStore::new();
        assert_eq!(store.append(&candidate("ann", "a@x.com"), RecordStatus::New).unwrap(), 1);
        assert_eq!(store.append(&candidate("bob", "b@x.com"), RecordStatus::New).unwrap(), 2);
        assert!(store.update_status(1, RecordStatus::Reviewed).unwrap());
        assert_eq!(store.read_all().unwrap()[0].status, RecordStatus::Reviewed);
    }
}
