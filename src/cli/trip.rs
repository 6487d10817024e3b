//! Trip CLI commands

use clap::Subcommand;

use super::{apply_assignments, parse_month_arg};
use crate::config::Settings;
use crate::display::format_trip_list;
use crate::error::FinanceResult;
use crate::models::{MonthName, Trip};
use crate::services::RecordService;
use crate::storage::Storage;

/// Trip subcommands
#[derive(Subcommand)]
pub enum TripCommands {
    /// Add a trip
    Add {
        /// Destination (defaults to "Nova Viagem")
        destination: Option<String>,
        /// Month of the trip (defaults to the current month)
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<MonthName>,
        /// Initial field values, e.g. --set fuel=180 --set food=95,50
        #[arg(short, long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    /// List trips with their costs
    List,
    /// Set a field of a trip
    Set {
        /// Trip ID (full, short or prefix)
        trip: String,
        /// Field name (destination, month, car_rental, fuel, food, others,
        /// credit_card, pix)
        field: String,
        /// New value; invalid amounts become 0
        value: String,
    },
    /// Delete a trip
    Delete {
        /// Trip ID (full, short or prefix)
        trip: String,
    },
}

/// Handle a trip command
pub fn handle_trip_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: TripCommands,
) -> FinanceResult<()> {
    match cmd {
        TripCommands::Add {
            destination,
            month,
            set,
        } => {
            let mut service = RecordService::new(storage.state_mut());
            let id = service.add_trip(destination.as_deref(), month);
            apply_assignments::<Trip>(&mut service, &id.as_uuid().to_string(), &set)?;
            let trip = service.get::<Trip>(&id.as_uuid().to_string())?;
            println!("Added trip: {} ({})", trip.destination, trip.month);
            println!("  ID: {}", id);
            storage.save()?;
        }

        TripCommands::List => {
            println!("{}", format_trip_list(&storage.state().trips, &settings.currency_symbol));
        }

        TripCommands::Set { trip, field, value } => {
            let mut service = RecordService::new(storage.state_mut());
            service.update::<Trip>(&trip, &field, &value)?;
            let updated = service.get::<Trip>(&trip)?;
            println!("Updated trip {}: {}", updated.destination, field);
            storage.save()?;
        }

        TripCommands::Delete { trip } => {
            let removed = RecordService::new(storage.state_mut()).delete::<Trip>(&trip)?;
            println!("Deleted trip: {}", removed.destination);
            storage.save()?;
        }
    }

    Ok(())
}
