//! Export module for finmaster
//!
//! Provides complete backups of the record store:
//! - JSON: machine-readable backup that can be imported again
//! - YAML: human-readable rendering of the same backup

pub mod json;
pub mod yaml;

pub use json::{
    default_backup_filename, export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION,
};
pub use yaml::export_full_yaml;
