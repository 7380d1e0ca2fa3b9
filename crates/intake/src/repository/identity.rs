//! Identity store implementations.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};
use tracing::debug;

use super::{IdentityStore, OptionalExt, Result};
use crate::models::{ExistingRecord, IdentityData, APPLIED_AT_FORMAT};

const SELECT_COLUMNS: &str =
    "email, name, phone, experience, last_applied_date, resume_path, application_count";

/// SQLite-backed identity store (`candidates` table, email primary key).
pub struct SqliteIdentityStore {
    conn: Connection,
}

impl SqliteIdentityStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let store = Self {
            conn: Connection::open(path)?,
        };
        store.init_schema()?;
        debug!("Opened identity store at {}", path.display());
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS candidates (
                email TEXT PRIMARY KEY,
                name TEXT,
                phone TEXT,
                experience TEXT,
                last_applied_date TEXT,
                resume_path TEXT,
                application_count INTEGER DEFAULT 1
            );
            "#,
        )?;
        Ok(())
    }

    fn row_to_record(row: &Row) -> rusqlite::Result<ExistingRecord> {
        let last_applied: Option<String> = row.get(4)?;
        Ok(ExistingRecord {
            email: row.get(0)?,
            name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            phone: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            experience: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            last_applied_date: last_applied
                .and_then(|s| NaiveDateTime::parse_from_str(&s, APPLIED_AT_FORMAT).ok()),
            resume_path: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            application_count: row.get::<_, Option<u32>>(6)?.unwrap_or(1),
        })
    }
}

impl IdentityStore for SqliteIdentityStore {
    fn get_by_email(&self, email: &str) -> Result<Option<ExistingRecord>> {
        let sql = format!("SELECT {} FROM candidates WHERE email = ?1", SELECT_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![email], Self::row_to_record)
            .optional()?)
    }

    fn get_by_name(&self, name: &str) -> Result<Vec<ExistingRecord>> {
        let sql = format!(
            "SELECT {} FROM candidates WHERE LOWER(TRIM(name)) = LOWER(TRIM(?1)) ORDER BY rowid",
            SELECT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![name], Self::row_to_record)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn upsert(&mut self, data: &IdentityData, is_update: bool) -> Result<bool> {
        let changed = if is_update {
            self.conn.execute(
                "UPDATE candidates
                 SET name = ?1, phone = ?2, experience = ?3, last_applied_date = ?4,
                     resume_path = ?5, application_count = application_count + 1
                 WHERE email = ?6",
                params![
                    data.name,
                    data.phone,
                    data.experience,
                    data.applied_at_str(),
                    data.resume_path,
                    data.email
                ],
            )?
        } else {
            self.conn.execute(
                "INSERT INTO candidates
                 (email, name, phone, experience, last_applied_date, resume_path, application_count)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1)",
                params![
                    data.email,
                    data.name,
                    data.phone,
                    data.experience,
                    data.applied_at_str(),
                    data.resume_path
                ],
            )?
        };
        Ok(changed > 0)
    }
}

/// In-memory identity store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    records: HashMap<String, ExistingRecord>,
    order: Vec<String>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing upsert bookkeeping.
    pub fn insert(&mut self, record: ExistingRecord) {
        if !self.records.contains_key(&record.email) {
            self.order.push(record.email.clone());
        }
        self.records.insert(record.email.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn get_by_email(&self, email: &str) -> Result<Option<ExistingRecord>> {
        Ok(self.records.get(email).cloned())
    }

    fn get_by_name(&self, name: &str) -> Result<Vec<ExistingRecord>> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .order
            .iter()
            .filter_map(|email| self.records.get(email))
            .filter(|r| r.name.trim().to_lowercase() == wanted)
            .cloned()
            .collect())
    }

    fn upsert(&mut self, data: &IdentityData, is_update: bool) -> Result<bool> {
        if is_update {
            let Some(record) = self.records.get_mut(&data.email) else {
                return Ok(false);
            };
            record.name = data.name.clone();
            record.phone = data.phone.clone();
            record.experience = data.experience.clone();
            record.last_applied_date = Some(data.applied_at);
            record.resume_path = data.resume_path.clone();
            record.application_count += 1;
            return Ok(true);
        }
        if self.records.contains_key(&data.email) {
            return Ok(false);
        }
        self.insert(ExistingRecord {
            email: data.email.clone(),
            name: data.name.clone(),
            phone: data.phone.clone(),
            experience: data.experience.clone(),
            last_applied_date: Some(data.applied_at),
            resume_path: data.resume_path.clone(),
            application_count: 1,
        });
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn data(email: &str, name: &str, experience: &str) -> IdentityData {
        IdentityData {
            email: email.to_string(),
            name: name.to_string(),
            phone: "555-0100".to_string(),
            experience: experience.to_string(),
            resume_path: "/resumes/cv.pdf".to_string(),
            applied_at: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_sqlite_insert_then_update_bumps_count() {
        let mut store = SqliteIdentityStore::open_in_memory().unwrap();
        assert!(store.upsert(&data("jane@x.com", "Jane Doe", "3"), false).unwrap());

        let record = store.get_by_email("jane@x.com").unwrap().unwrap();
        assert_eq!(record.application_count, 1);
        assert_eq!(record.experience, "3");
        assert_eq!(
            record.last_applied_date.unwrap().format(APPLIED_AT_FORMAT).to_string(),
            "2024-03-01 09:30:00"
        );

        assert!(store.upsert(&data("jane@x.com", "Jane Q. Doe", "4"), true).unwrap());
        let record = store.get_by_email("jane@x.com").unwrap().unwrap();
        assert_eq!(record.application_count, 2);
        assert_eq!(record.name, "Jane Q. Doe");
        assert_eq!(record.experience, "4");
    }

    #[test]
    fn test_sqlite_update_of_unknown_email_writes_nothing() {
        let mut store = SqliteIdentityStore::open_in_memory().unwrap();
        assert!(!store.upsert(&data("ghost@x.com", "Ghost", "1"), true).unwrap());
        assert!(store.get_by_email("ghost@x.com").unwrap().is_none());
    }

    #[test]
    fn test_sqlite_lookup_by_name_is_case_insensitive() {
        let mut store = SqliteIdentityStore::open_in_memory().unwrap();
        store.upsert(&data("jane@x.com", "Jane Doe", "3"), false).unwrap();
        store.upsert(&data("other@x.com", "Jane Doe", "9"), false).unwrap();

        let matches = store.get_by_name("  jane DOE").unwrap();
        let emails: Vec<&str> = matches.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(emails, vec!["jane@x.com", "other@x.com"]);
        assert!(store.get_by_name("John Roe").unwrap().is_empty());
    }

    #[test]
    fn test_sqlite_file_store_persists() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ids").join("candidates.db");
        {
            let mut store = SqliteIdentityStore::open(&path).unwrap();
            store.upsert(&data("jane@x.com", "Jane Doe", "3"), false).unwrap();
        }
        let store = SqliteIdentityStore::open(&path).unwrap();
        assert!(store.get_by_email("jane@x.com").unwrap().is_some());
    }

    #[test]
    fn test_memory_store_mirrors_sqlite() {
        let mut store = MemoryIdentityStore::new();
        assert!(store.upsert(&data("jane@x.com", "Jane Doe", "3"), false).unwrap());
        assert!(!store.upsert(&data("jane@x.com", "Jane Doe", "3"), false).unwrap());
        assert!(store.upsert(&data("jane@x.com", "Jane Doe", "5"), true).unwrap());

        let record = store.get_by_name("JANE DOE").unwrap().remove(0);
        assert_eq!(record.application_count, 2);
        assert_eq!(record.experience, "5");
        assert_eq!(store.len(), 1);
    }
}
