//! CLI command for backup export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{FinanceError, FinanceResult};
use crate::export::{default_backup_filename, export_full_json, export_full_yaml};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON backup (can be imported back)
    Json,
    /// YAML rendering of the same backup, for reading
    Yaml,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file (defaults to finance_backup_YYYY-MM-DD.<ext> in the backups directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> FinanceResult<()> {
    let output = args.output.unwrap_or_else(|| {
        let today = chrono::Local::now().date_naive();
        storage
            .paths()
            .backup_dir()
            .join(default_backup_filename(today, args.format.extension()))
    });

    let file = File::create(&output).map_err(|e| {
        FinanceError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    match args.format {
        ExportFormat::Json => export_full_json(storage.state(), &mut writer, true)?,
        ExportFormat::Yaml => export_full_yaml(storage.state(), &mut writer)?,
    }
    writer
        .flush()
        .map_err(|e| FinanceError::Export(format!("Failed to write backup: {}", e)))?;

    let counts = storage.state().counts();
    println!("Exported {} records to: {}", counts.total(), output.display());
    Ok(())
}
