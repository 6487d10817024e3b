//! Path management for finmaster
//!
//! Provides platform-aware path resolution for configuration, data, and backups.
//!
//! ## Path Resolution Order
//!
//! 1. `FINMASTER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`$XDG_CONFIG_HOME/finmaster`,
//!    `~/Library/Application Support/finmaster`, `%APPDATA%\finmaster`)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::FinanceError;

/// Fixed storage key of the persisted record store
pub const STORAGE_KEY: &str = "finance_app_data";

/// Manages all paths used by finmaster
#[derive(Debug, Clone)]
pub struct FinancePaths {
    /// Base directory for all finmaster data
    base_dir: PathBuf,
}

impl FinancePaths {
    /// Create a new FinancePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FinanceError> {
        let base_dir = if let Ok(custom) = std::env::var("FINMASTER_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create FinancePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory (`<base>/backups/`)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the persisted record store
    pub fn store_file(&self) -> PathBuf {
        self.data_dir().join(format!("{}.json", STORAGE_KEY))
    }

    /// Where an unreadable store is moved aside on startup
    pub fn corrupt_store_file(&self, stamp: &str) -> PathBuf {
        self.data_dir()
            .join(format!("{}.json.corrupt-{}", STORAGE_KEY, stamp))
    }

    /// Lock file held while an import is running
    pub fn import_lock_file(&self) -> PathBuf {
        self.data_dir().join("import.lock")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), FinanceError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FinanceError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FinanceError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| FinanceError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, FinanceError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| FinanceError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("finmaster"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.backup_dir(), temp_dir.path().join("backups"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.backup_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.store_file(),
            temp_dir.path().join("data").join("finance_app_data.json")
        );
        assert_eq!(
            paths.import_lock_file(),
            temp_dir.path().join("data").join("import.lock")
        );
    }
}
