//! CLI commands for spreadsheet and backup import

use std::path::PathBuf;

use clap::Subcommand;

use crate::error::FinanceResult;
use crate::services::ImportService;
use crate::storage::Storage;

/// Import subcommands
#[derive(Subcommand, Debug)]
pub enum ImportCommands {
    /// Append one month record per row of a spreadsheet
    Spreadsheet {
        /// Path to the file: first sheet of an xlsx/xls/ods workbook, or a
        /// comma or semicolon separated CSV
        file: PathBuf,
    },
    /// Replace every record with the contents of a JSON backup
    Backup {
        /// Path to the backup file
        file: PathBuf,
    },
}

/// Handle import commands
///
/// The store is saved by the import service; a failed import leaves it
/// untouched.
pub fn handle_import_command(storage: &mut Storage, cmd: ImportCommands) -> FinanceResult<()> {
    let mut service = ImportService::new(storage);

    match cmd {
        ImportCommands::Spreadsheet { file } => {
            let count = service.import_spreadsheet(&file)?;
            println!("Imported {} month records from {}", count, file.display());
        }
        ImportCommands::Backup { file } => {
            let count = service.import_backup(&file)?;
            println!("Restored {} records from {}", count, file.display());
        }
    }

    Ok(())
}
