//! Vehicle expense CLI commands

use clap::Subcommand;

use super::{apply_assignments, parse_month_arg};
use crate::config::Settings;
use crate::display::format_vehicle_list;
use crate::error::FinanceResult;
use crate::models::{MonthName, VehicleExpense, VehicleType};
use crate::services::RecordService;
use crate::storage::Storage;

fn parse_vehicle_arg(s: &str) -> Result<VehicleType, String> {
    VehicleType::parse(s).ok_or_else(|| format!("'{}' is not a vehicle (carro or moto)", s))
}

/// Vehicle subcommands
#[derive(Subcommand)]
pub enum VehicleCommands {
    /// Add a fuel expense for a vehicle
    Add {
        /// Vehicle (carro or moto)
        #[arg(value_parser = parse_vehicle_arg)]
        vehicle: VehicleType,
        /// Month of the expense (defaults to the current month)
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<MonthName>,
        /// Initial field values, e.g. --set category=manutencao --set value=320
        #[arg(short, long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    /// List vehicle expenses and the per-vehicle breakdown
    List,
    /// Set a field of a vehicle expense
    Set {
        /// Expense ID (full, short or prefix)
        expense: String,
        /// Field name (type, category, description, value, month)
        field: String,
        /// New value; invalid amounts become 0
        value: String,
    },
    /// Delete a vehicle expense
    Delete {
        /// Expense ID (full, short or prefix)
        expense: String,
    },
}

/// Handle a vehicle command
pub fn handle_vehicle_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: VehicleCommands,
) -> FinanceResult<()> {
    match cmd {
        VehicleCommands::Add {
            vehicle,
            month,
            set,
        } => {
            let mut service = RecordService::new(storage.state_mut());
            let id = service.add_vehicle_expense(vehicle, month);
            apply_assignments::<VehicleExpense>(&mut service, &id.as_uuid().to_string(), &set)?;
            let expense = service.get::<VehicleExpense>(&id.as_uuid().to_string())?;
            println!(
                "Added vehicle expense: {} ({}, {})",
                expense.description, expense.category, expense.month
            );
            println!("  ID: {}", id);
            storage.save()?;
        }

        VehicleCommands::List => {
            println!(
                "{}",
                format_vehicle_list(&storage.state().vehicle_expenses, &settings.currency_symbol)
            );
        }

        VehicleCommands::Set {
            expense,
            field,
            value,
        } => {
            let mut service = RecordService::new(storage.state_mut());
            service.update::<VehicleExpense>(&expense, &field, &value)?;
            let updated = service.get::<VehicleExpense>(&expense)?;
            println!("Updated vehicle expense {}: {}", updated.description, field);
            storage.save()?;
        }

        VehicleCommands::Delete { expense } => {
            let removed =
                RecordService::new(storage.state_mut()).delete::<VehicleExpense>(&expense)?;
            println!("Deleted vehicle expense: {}", removed.description);
            storage.save()?;
        }
    }

    Ok(())
}
