//! Migration record store.
//!
//! Tracks one-time data migrations: one record per applied migration, keyed
//! by id, with a sha-256 checksum of the migration source. A migration is
//! treated as already applied only when its id exists *and* the stored
//! checksum matches the current source; a changed source surfaces as a
//! checksum mismatch, never as silently applied.
//!
//! This crate has no dependency on the rendering stack; the ledger is a
//! wholly separate artifact.
//!
//! # Invariants
//! - Every record field is present (no nullable columns).
//! - Title and checksum never exceed 64 characters.
//! - Records are never rewritten once inserted; `last_run` is set at insert.

mod ledger;

pub use ledger::{
    checksum_of, LedgerError, MigrationLedger, MigrationRecord, MigrationStatus, MAX_CHECKSUM_LEN,
    MAX_TITLE_LEN,
};

pub fn crate_info() -> &'static str {
    "shadowcast-migrate v0.1.0"
}
