use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum length of a migration title.
pub const MAX_TITLE_LEN: usize = 64;
/// Maximum length of a stored checksum. Sha-256 hex is exactly 64 chars.
pub const MAX_CHECKSUM_LEN: usize = 64;

/// Errors from ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("migration {id} already recorded")]
    DuplicateId { id: i32 },
    #[error("title {0:?} exceeds {MAX_TITLE_LEN} characters")]
    TitleTooLong(String),
    #[error("checksum for migration {id} exceeds {MAX_CHECKSUM_LEN} characters")]
    ChecksumTooLong { id: i32 },
    #[error("migration {id} checksum mismatch: recorded {recorded}, current {current}")]
    ChecksumMismatch {
        id: i32,
        recorded: String,
        current: String,
    },
}

/// Outcome of checking a migration against the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationStatus {
    /// No record with this id exists; the migration should run.
    NotApplied,
    /// A record exists and its checksum matches the current source.
    Applied,
    /// A record exists but the source has changed since it ran.
    ChecksumMismatch { recorded: String },
}

/// One row of the migration store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationRecord {
    pub id: i32,
    pub title: String,
    pub checksum: String,
    /// Unix seconds at which the migration last ran.
    pub last_run: u64,
}

/// Sha-256 checksum of migration source text, lowercase hex.
pub fn checksum_of(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// File-backed migration ledger.
///
/// Stored as pretty-printed JSON, one record per applied migration, keyed
/// by id with deterministic ordering.
pub struct MigrationLedger {
    path: PathBuf,
    records: BTreeMap<i32, MigrationRecord>,
}

impl MigrationLedger {
    /// Open an existing ledger file or start an empty one at the path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref().to_path_buf();
        let records = if path.exists() {
            let list: Vec<MigrationRecord> =
                serde_json::from_reader(std::fs::File::open(&path)?)?;
            list.into_iter().map(|r| (r.id, r)).collect()
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), records = records.len(), "opened migration ledger");
        Ok(Self { path, records })
    }

    /// Check whether a migration needs to run, verifying the checksum before
    /// treating it as applied.
    pub fn status(&self, id: i32, checksum: &str) -> MigrationStatus {
        match self.records.get(&id) {
            None => MigrationStatus::NotApplied,
            Some(record) if record.checksum == checksum => MigrationStatus::Applied,
            Some(record) => MigrationStatus::ChecksumMismatch {
                recorded: record.checksum.clone(),
            },
        }
    }

    /// Record a migration as applied, keyed by id, with `last_run` set to
    /// the current time. Inserting an id twice is an error.
    pub fn record_applied(
        &mut self,
        id: i32,
        title: &str,
        source: &str,
    ) -> Result<&MigrationRecord, LedgerError> {
        if self.records.contains_key(&id) {
            return Err(LedgerError::DuplicateId { id });
        }
        if title.len() > MAX_TITLE_LEN {
            return Err(LedgerError::TitleTooLong(title.to_owned()));
        }
        let checksum = checksum_of(source);
        debug_assert!(checksum.len() <= MAX_CHECKSUM_LEN);

        let record = MigrationRecord {
            id,
            title: title.to_owned(),
            checksum,
            last_run: unix_now(),
        };
        tracing::info!(id, title, "recording applied migration");
        self.records.insert(id, record);
        self.save()?;
        Ok(&self.records[&id])
    }

    /// Re-check every stored record against the ledger invariants.
    /// Fail-closed: the first violation is returned.
    pub fn verify_all(&self) -> Result<(), LedgerError> {
        for record in self.records.values() {
            if record.title.len() > MAX_TITLE_LEN {
                return Err(LedgerError::TitleTooLong(record.title.clone()));
            }
            if record.checksum.len() > MAX_CHECKSUM_LEN {
                return Err(LedgerError::ChecksumTooLong { id: record.id });
            }
        }
        Ok(())
    }

    /// Verify a migration source against its stored record, erroring on
    /// mismatch. Missing records are not an error here; they simply have
    /// not run yet.
    pub fn verify_source(&self, id: i32, source: &str) -> Result<(), LedgerError> {
        let current = checksum_of(source);
        match self.status(id, &current) {
            MigrationStatus::ChecksumMismatch { recorded } => {
                Err(LedgerError::ChecksumMismatch {
                    id,
                    recorded,
                    current,
                })
            }
            _ => Ok(()),
        }
    }

    /// Records in id order.
    pub fn records(&self) -> impl Iterator<Item = &MigrationRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let list: Vec<&MigrationRecord> = self.records.values().collect();
        serde_json::to_writer_pretty(std::fs::File::create(&self.path)?, &list)?;
        Ok(())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "ALTER TABLE body ADD COLUMN species SMALLINT;";

    fn temp_ledger() -> (tempfile::TempDir, MigrationLedger) {
        let tmp = tempfile::tempdir().unwrap();
        let ledger = MigrationLedger::open(tmp.path().join("migrations.json")).unwrap();
        (tmp, ledger)
    }

    #[test]
    fn fresh_migration_is_not_applied() {
        let (_tmp, ledger) = temp_ledger();
        assert_eq!(
            ledger.status(1, &checksum_of(SOURCE)),
            MigrationStatus::NotApplied
        );
    }

    #[test]
    fn recorded_migration_is_applied() {
        let (_tmp, mut ledger) = temp_ledger();
        ledger.record_applied(1, "add species column", SOURCE).unwrap();
        assert_eq!(
            ledger.status(1, &checksum_of(SOURCE)),
            MigrationStatus::Applied
        );
    }

    #[test]
    fn changed_source_is_a_mismatch_not_applied() {
        let (_tmp, mut ledger) = temp_ledger();
        ledger.record_applied(1, "add species column", SOURCE).unwrap();

        let status = ledger.status(1, &checksum_of("DROP TABLE body;"));
        assert!(matches!(status, MigrationStatus::ChecksumMismatch { .. }));
        assert!(ledger.verify_source(1, "DROP TABLE body;").is_err());
        assert!(ledger.verify_source(1, SOURCE).is_ok());
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let (_tmp, mut ledger) = temp_ledger();
        ledger.record_applied(1, "first", SOURCE).unwrap();
        let err = ledger.record_applied(1, "second", SOURCE).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateId { id: 1 }));
    }

    #[test]
    fn over_length_title_is_rejected() {
        let (_tmp, mut ledger) = temp_ledger();
        let title = "x".repeat(MAX_TITLE_LEN + 1);
        let err = ledger.record_applied(1, &title, SOURCE).unwrap_err();
        assert!(matches!(err, LedgerError::TitleTooLong(_)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn exact_length_title_is_accepted() {
        let (_tmp, mut ledger) = temp_ledger();
        let title = "x".repeat(MAX_TITLE_LEN);
        assert!(ledger.record_applied(1, &title, SOURCE).is_ok());
    }

    #[test]
    fn checksum_is_64_hex_chars() {
        let sum = checksum_of(SOURCE);
        assert_eq!(sum.len(), 64);
        assert!(sum.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn last_run_is_populated() {
        let (_tmp, mut ledger) = temp_ledger();
        let record = ledger.record_applied(1, "t", SOURCE).unwrap();
        assert!(record.last_run > 0);
    }

    #[test]
    fn reopen_preserves_records() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("migrations.json");

        {
            let mut ledger = MigrationLedger::open(&path).unwrap();
            ledger.record_applied(3, "third", SOURCE).unwrap();
            ledger.record_applied(1, "first", SOURCE).unwrap();
        }

        let ledger = MigrationLedger::open(&path).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(
            ledger.status(3, &checksum_of(SOURCE)),
            MigrationStatus::Applied
        );
        // BTreeMap keeps id order on iteration.
        let ids: Vec<i32> = ledger.records().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn verify_all_passes_on_valid_ledger() {
        let (_tmp, mut ledger) = temp_ledger();
        ledger.record_applied(1, "ok", SOURCE).unwrap();
        assert!(ledger.verify_all().is_ok());
    }
}
