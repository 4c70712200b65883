//! Append-only hash-chained audit logger.
//!
//! One JSON object per line, each linking to its predecessor's SHA-256.
//! Appends take a single mutex so the chain never forks; filesystem
//! append atomicity alone is not trusted for ordering.

use crate::audit::entry::AuditEntry;
use crate::error::AuditError;
use parking_lot::Mutex;
use serde_json::Value;
use shared_types::{zero_hash_hex, SystemTimeSource, TimeSource};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

struct LoggerState {
    entries: Vec<AuditEntry>,
    file: File,
}

/// Tamper-evident audit log.
pub struct AuditLogger {
    path: PathBuf,
    time_source: Arc<dyn TimeSource>,
    state: Mutex<LoggerState>,
}

impl AuditLogger {
    /// Open a logger at `path`, writing the genesis entry iff the file
    /// does not exist yet. An existing log is loaded and continued.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, AuditError> {
        Self::with_time_source(path, Arc::new(SystemTimeSource))
    }

    pub fn with_time_source<P: AsRef<Path>>(
        path: P,
        time_source: Arc<dyn TimeSource>,
    ) -> Result<Self, AuditError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AuditError::Io {
                message: format!("creating {}: {e}", parent.display()),
            })?;
        }

        let needs_genesis = !path.exists();
        let entries = if needs_genesis {
            Vec::new()
        } else {
            Self::load_entries(&path)?
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| AuditError::Io {
                message: format!("opening {}: {e}", path.display()),
            })?;

        let logger = Self {
            path,
            time_source,
            state: Mutex::new(LoggerState { entries, file }),
        };

        if needs_genesis {
            logger.append("genesis", serde_json::json!({}))?;
        }
        Ok(logger)
    }

    fn load_entries(path: &Path) -> Result<Vec<AuditEntry>, AuditError> {
        let file = File::open(path).map_err(|e| AuditError::Io {
            message: format!("opening {}: {e}", path.display()),
        })?;
        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| AuditError::Io {
                message: e.to_string(),
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: AuditEntry =
                serde_json::from_str(&line).map_err(|e| AuditError::Encode {
                    message: format!("undecodable audit record: {e}"),
                })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Append an event to the chain. Strictly ordered: one append lock.
    pub fn log_event(&self, event_type: &str, details: Value) -> Result<AuditEntry, AuditError> {
        self.append(event_type, details)
    }

    fn append(&self, event_type: &str, details: Value) -> Result<AuditEntry, AuditError> {
        let mut state = self.state.lock();

        let index = state.entries.len() as u64;
        let previous_hash = state
            .entries
            .last()
            .map(|e| e.hash.clone())
            .unwrap_or_else(zero_hash_hex);
        let entry = AuditEntry::new(
            index,
            self.time_source.now(),
            event_type,
            details,
            previous_hash,
        )?;

        let mut line = serde_json::to_string(&entry).map_err(|e| AuditError::Encode {
            message: e.to_string(),
        })?;
        line.push('\n');
        state
            .file
            .write_all(line.as_bytes())
            .and_then(|_| state.file.flush())
            .map_err(|e| AuditError::Io {
                message: format!("appending to {}: {e}", self.path.display()),
            })?;

        tracing::debug!(index, event_type, "audit entry appended");
        colossus_telemetry::AUDIT_ENTRIES.inc();
        state.entries.push(entry.clone());
        Ok(entry)
    }

    /// Walk every link in the chain.
    ///
    /// Returns the entry count on success. A broken link is an error
    /// naming the first bad index - chain corruption is never swallowed.
    pub fn verify_integrity(&self) -> Result<usize, AuditError> {
        let state = self.state.lock();
        let mut expected_previous = zero_hash_hex();

        for (i, entry) in state.entries.iter().enumerate() {
            let index = i as u64;
            if entry.index != index || entry.previous_hash != expected_previous {
                return Err(AuditError::BrokenChain { index });
            }
            if entry.recompute_hash()? != entry.hash {
                return Err(AuditError::HashMismatch { index });
            }
            expected_previous = entry.hash.clone();
        }
        Ok(state.entries.len())
    }

    /// Snapshot of all entries.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.state.lock().entries.clone()
    }

    /// Number of entries (genesis included).
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
