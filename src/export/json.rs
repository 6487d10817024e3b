//! JSON backup export and import
//!
//! A backup wraps the whole record store with a schema version, timestamps
//! and record counts. Importing accepts such a backup, a bare store blob, or
//! a blob from the unversioned store.

use std::collections::HashSet;
use std::hash::Hash;
use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{AppState, Record, RecordCounts};
use crate::storage::migrate;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full backup structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Every record
    pub data: AppState,

    /// Record counts for reference
    pub metadata: RecordCounts,
}

impl FullExport {
    /// Create a new full export from a state snapshot
    pub fn from_state(state: &AppState) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            data: state.clone(),
            metadata: state.counts(),
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        let major = |v: &str| v.split('.').next().map(str::to_string);
        if major(&self.schema_version) != major(EXPORT_SCHEMA_VERSION) {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        check_unique(&self.data.months)?;
        check_unique(&self.data.loans)?;
        check_unique(&self.data.trips)?;
        check_unique(&self.data.vehicle_expenses)?;
        check_unique(&self.data.savings)?;
        check_unique(&self.data.categorized_expenses)?;
        Ok(())
    }
}

fn check_unique<R>(records: &[R]) -> Result<(), String>
where
    R: Record,
    R::Id: Hash,
{
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.id()) {
            return Err(format!("Duplicate {} id {}", R::ENTITY, record.id()));
        }
    }
    Ok(())
}

/// Default backup file name for a date, e.g. `finance_backup_2025-01-31.json`
pub fn default_backup_filename(date: NaiveDate, extension: &str) -> String {
    format!("finance_backup_{}.{}", date.format("%Y-%m-%d"), extension)
}

/// Export the full store to JSON
pub fn export_full_json<W: Write>(state: &AppState, writer: &mut W, pretty: bool) -> FinanceResult<()> {
    let export = FullExport::from_state(state);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FinanceError::Export(e.to_string()))?;

    Ok(())
}

/// Decode a backup into the state it holds
///
/// Accepts a [`FullExport`], a bare store blob with `schema_version`, or an
/// unversioned legacy blob. Anything else is an import error.
pub fn import_from_json(json_str: &str) -> FinanceResult<AppState> {
    let value: Value =
        serde_json::from_str(json_str).map_err(|e| FinanceError::Import(e.to_string()))?;

    let is_full_export = value
        .as_object()
        .is_some_and(|o| o.contains_key("data") && o.contains_key("exported_at"));

    if is_full_export {
        let export: FullExport =
            serde_json::from_value(value).map_err(|e| FinanceError::Import(e.to_string()))?;
        export.validate().map_err(FinanceError::Import)?;
        return Ok(export.data);
    }

    let is_blob = value
        .as_object()
        .is_some_and(|o| o.contains_key("schema_version"));

    if is_blob || migrate::is_legacy(&value) {
        return migrate::decode(value).map_err(|e| FinanceError::Import(e.to_string()));
    }

    Err(FinanceError::Import(
        "Unrecognized backup format: expected a finmaster backup or store file".into(),
    ))
}
