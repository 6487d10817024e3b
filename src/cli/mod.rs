//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod categorized;
pub mod chart;
pub mod config;
pub mod export;
pub mod import;
pub mod loan;
pub mod month;
pub mod report;
pub mod savings;
pub mod trip;
pub mod vehicle;

pub use categorized::{handle_categorized_command, CategorizedCommands};
pub use chart::{handle_chart_command, ChartCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use export::{handle_export_command, ExportArgs};
pub use import::{handle_import_command, ImportCommands};
pub use loan::{handle_loan_command, LoanCommands};
pub use month::{handle_month_command, MonthCommands};
pub use report::{handle_report_command, ReportArgs};
pub use savings::{handle_savings_command, SavingsCommands};
pub use trip::{handle_trip_command, TripCommands};
pub use vehicle::{handle_vehicle_command, VehicleCommands};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{MonthName, Record};
use crate::services::RecordService;

/// Clap value parser for month labels
pub(crate) fn parse_month_arg(s: &str) -> Result<MonthName, String> {
    MonthName::parse(s).ok_or_else(|| format!("'{}' is not a month (e.g. Janeiro, Março or 3)", s))
}

/// Split a `field=value` assignment
pub(crate) fn parse_assignment(assignment: &str) -> FinanceResult<(&str, &str)> {
    assignment
        .split_once('=')
        .map(|(field, value)| (field.trim(), value.trim()))
        .filter(|(field, _)| !field.is_empty())
        .ok_or_else(|| {
            FinanceError::Validation(format!(
                "Expected field=value, got '{}'",
                assignment
            ))
        })
}

/// Apply `--set field=value` assignments to one record
pub(crate) fn apply_assignments<R: Record>(
    service: &mut RecordService<'_>,
    reference: &str,
    assignments: &[String],
) -> FinanceResult<()> {
    for assignment in assignments {
        let (field, value) = parse_assignment(assignment)?;
        service.update::<R>(reference, field, value)?;
    }
    Ok(())
}
