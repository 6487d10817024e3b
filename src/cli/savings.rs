//! Savings CLI commands

use clap::Subcommand;

use super::{apply_assignments, parse_month_arg};
use crate::config::Settings;
use crate::display::format_savings_list;
use crate::error::FinanceResult;
use crate::models::{MonthName, SavingsKind, SavingsTransaction};
use crate::services::RecordService;
use crate::storage::Storage;

fn parse_kind_arg(s: &str) -> Result<SavingsKind, String> {
    SavingsKind::parse(s)
        .ok_or_else(|| format!("'{}' is not a movement (entrada, retirada or rendimento)", s))
}

/// Savings subcommands
#[derive(Subcommand)]
pub enum SavingsCommands {
    /// Add a savings movement
    Add {
        /// Movement type (entrada, retirada or rendimento)
        #[arg(value_parser = parse_kind_arg)]
        kind: SavingsKind,
        /// Amount; invalid amounts become 0
        value: Option<String>,
        /// Month of the movement (defaults to the current month)
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<MonthName>,
        /// Initial field values, e.g. --set description=Reserva
        #[arg(short, long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    /// List savings movements with the balance and yields
    List,
    /// Set a field of a savings movement
    Set {
        /// Movement ID (full, short or prefix)
        movement: String,
        /// Field name (type, value, month, description)
        field: String,
        /// New value; invalid amounts become 0
        value: String,
    },
    /// Delete a savings movement
    Delete {
        /// Movement ID (full, short or prefix)
        movement: String,
    },
}

/// Handle a savings command
pub fn handle_savings_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: SavingsCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        SavingsCommands::Add {
            kind,
            value,
            month,
            mut set,
        } => {
            if let Some(value) = value {
                set.insert(0, format!("value={}", value));
            }
            let mut service = RecordService::new(storage.state_mut());
            let id = service.add_savings(kind, month);
            apply_assignments::<SavingsTransaction>(&mut service, &id.as_uuid().to_string(), &set)?;
            let tx = service.get::<SavingsTransaction>(&id.as_uuid().to_string())?;
            println!(
                "Added {}: {} ({})",
                tx.kind,
                tx.value.format_with_symbol(symbol),
                tx.month
            );
            println!("  ID: {}", id);
            storage.save()?;
        }

        SavingsCommands::List => {
            print!("{}", format_savings_list(&storage.state().savings, symbol));
        }

        SavingsCommands::Set {
            movement,
            field,
            value,
        } => {
            let mut service = RecordService::new(storage.state_mut());
            service.update::<SavingsTransaction>(&movement, &field, &value)?;
            let updated = service.get::<SavingsTransaction>(&movement)?;
            println!("Updated savings movement {}: {}", updated.description, field);
            storage.save()?;
        }

        SavingsCommands::Delete { movement } => {
            let removed =
                RecordService::new(storage.state_mut()).delete::<SavingsTransaction>(&movement)?;
            println!("Deleted savings movement: {}", removed.description);
            storage.save()?;
        }
    }

    Ok(())
}
