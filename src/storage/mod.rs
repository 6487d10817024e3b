//! Storage layer for finmaster
//!
//! Persists the whole record store as one versioned JSON blob, written
//! atomically after every mutation. Unreadable blobs are moved aside and the
//! store starts empty. Imports are serialized through a lock file.

pub mod file_io;
pub mod migrate;

pub use file_io::{read_json_value, write_json_atomic};
pub use migrate::{StoredBlob, CURRENT_SCHEMA_VERSION};

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::Local;
use tracing::{debug, info, warn};

use crate::config::paths::FinancePaths;
use crate::error::{FinanceError, FinanceResult};
use crate::models::AppState;

/// Owner of the record store and its on-disk blob
pub struct Storage {
    paths: FinancePaths,
    state: AppState,
}

impl Storage {
    /// Open the store, creating directories as needed
    ///
    /// A missing blob yields an empty store. A blob that cannot be decoded is
    /// moved aside to a timestamped `.corrupt-*` file and the store starts
    /// empty.
    pub fn open(paths: FinancePaths) -> FinanceResult<Self> {
        paths.ensure_directories()?;
        let state = load_state(&paths);
        Ok(Self { paths, state })
    }

    /// Re-read the blob from disk, dropping any unsaved changes
    ///
    /// Imports call this once they hold the import lock.
    pub fn reload(&mut self) -> FinanceResult<()> {
        self.paths.ensure_directories()?;
        self.state = load_state(&self.paths);
        Ok(())
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FinancePaths {
        &self.paths
    }

    /// Current records
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Current records, mutably; call [`Storage::save`] afterwards
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Replace every record at once
    pub fn replace(&mut self, state: AppState) {
        self.state = state;
    }

    /// Write the store to disk
    pub fn save(&self) -> FinanceResult<()> {
        let blob = StoredBlob::current(self.state.clone());
        write_json_atomic(self.paths.store_file(), &blob)?;
        debug!(path = %self.paths.store_file().display(), "record store saved");
        Ok(())
    }

    /// Take the exclusive import lock
    pub fn begin_import(&self) -> FinanceResult<ImportGuard> {
        ImportGuard::acquire(self.paths.import_lock_file())
    }
}

fn load_state(paths: &FinancePaths) -> AppState {
    let store_file = paths.store_file();
    let loaded = read_json_value(&store_file).and_then(|v| match v {
        Some(value) => migrate::decode(value),
        None => Ok(AppState::default()),
    });

    match loaded {
        Ok(state) => {
            debug!(records = state.counts().total(), "record store loaded");
            state
        }
        Err(e) => {
            let corrupt = unused_corrupt_path(paths);
            warn!(
                error = %e,
                moved_to = %corrupt.display(),
                "could not load record store, starting empty"
            );
            if let Err(e) = fs::rename(&store_file, &corrupt) {
                warn!(error = %e, "failed to move unreadable store aside");
            }
            AppState::default()
        }
    }
}

/// Timestamped destination for an unreadable blob that never clobbers an
/// earlier one
fn unused_corrupt_path(paths: &FinancePaths) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d%H%M%S").to_string();
    let first = paths.corrupt_store_file(&stamp);
    if !first.exists() {
        return first;
    }
    (1u32..)
        .map(|n| paths.corrupt_store_file(&format!("{}-{}", stamp, n)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

/// Exclusive right to run an import, released on drop
#[derive(Debug)]
pub struct ImportGuard {
    path: PathBuf,
}

impl ImportGuard {
    /// Create the lock file; fails if another import holds it
    pub fn acquire(path: PathBuf) -> FinanceResult<Self> {
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => {
                info!(lock = %path.display(), "import lock acquired");
                Ok(Self { path })
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(FinanceError::Import(
                format!(
                    "import already in progress (remove {} if no import is running)",
                    path.display()
                ),
            )),
            Err(e) => Err(FinanceError::Io(format!("Failed to create import lock: {}", e))),
        }
    }
}

impl Drop for ImportGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(error = %e, "failed to release import lock");
        }
    }
}
