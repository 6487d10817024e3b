//! Month CLI commands
//!
//! Implements CLI commands for the monthly fixed-expense and income records.

use clap::Subcommand;

use super::{apply_assignments, parse_month_arg};
use crate::config::Settings;
use crate::display::{format_month_details, format_month_list};
use crate::error::FinanceResult;
use crate::models::{MonthName, MonthRecord};
use crate::services::RecordService;
use crate::storage::Storage;

/// Month subcommands
#[derive(Subcommand)]
pub enum MonthCommands {
    /// Add a month record (defaults to the month after the last one)
    Add {
        /// Month label (e.g. Janeiro, Março or 3)
        #[arg(value_parser = parse_month_arg)]
        month: Option<MonthName>,
        /// Calendar year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
        /// Initial field values, e.g. --set expenses.inter=150 --set salario=3000
        #[arg(short, long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    /// List all month records
    List,
    /// Show every field and the balances of a month
    Show {
        /// Month ID (full, short or prefix)
        month: String,
    },
    /// Set a field of a month
    Set {
        /// Month ID (full, short or prefix)
        month: String,
        /// Field name (month, year, expenses.<name>, income.<name>)
        field: String,
        /// New value; invalid amounts become 0
        value: String,
    },
    /// Change the label of a month and of every record linked to it
    Rename {
        /// Month ID (full, short or prefix)
        month: String,
        /// New label
        #[arg(value_parser = parse_month_arg)]
        label: MonthName,
    },
    /// Delete a month record
    Delete {
        /// Month ID (full, short or prefix)
        month: String,
    },
}

/// Handle a month command
pub fn handle_month_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: MonthCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        MonthCommands::Add { month, year, set } => {
            let mut service = RecordService::new(storage.state_mut());
            let id = service.add_month(month, year);
            apply_assignments::<MonthRecord>(&mut service, &id.as_uuid().to_string(), &set)?;
            let added = service.get::<MonthRecord>(&id.as_uuid().to_string())?;
            println!("Added month: {} {}", added.month, added.year);
            println!("  ID: {}", id);
            storage.save()?;
        }

        MonthCommands::List => {
            println!("{}", format_month_list(storage.state(), symbol));
        }

        MonthCommands::Show { month } => {
            let service = RecordService::new(storage.state_mut());
            let found = service.get::<MonthRecord>(&month)?;
            print!("{}", format_month_details(found, service.state(), symbol));
        }

        MonthCommands::Set { month, field, value } => {
            let mut service = RecordService::new(storage.state_mut());
            service.update::<MonthRecord>(&month, &field, &value)?;
            let updated = service.get::<MonthRecord>(&month)?;
            println!("Updated month {} {}: {}", updated.month, updated.year, field);
            storage.save()?;
        }

        MonthCommands::Rename { month, label } => {
            let mut service = RecordService::new(storage.state_mut());
            let id = service.rename_month(&month, label)?;
            println!("Renamed month {} to {}", id, label);
            storage.save()?;
        }

        MonthCommands::Delete { month } => {
            let mut service = RecordService::new(storage.state_mut());
            let removed = service.delete::<MonthRecord>(&month)?;
            println!("Deleted month: {} {}", removed.month, removed.year);
            storage.save()?;
        }
    }

    Ok(())
}
