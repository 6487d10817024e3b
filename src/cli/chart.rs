//! CLI commands for the charts

use clap::Subcommand;

use crate::chart::{category_series, monthly_series, render_categories, render_monthly, series_json};
use crate::config::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::storage::Storage;

/// Chart subcommands
#[derive(Subcommand, Debug)]
pub enum ChartCommands {
    /// Expenses, income and balance per month
    Monthly {
        /// Print the series as JSON
        #[arg(long)]
        json: bool,
    },
    /// Categorized expenses per category
    Categories {
        /// Print the series as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle chart commands
pub fn handle_chart_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ChartCommands,
) -> FinanceResult<()> {
    let state = storage.state();

    match cmd {
        ChartCommands::Monthly { json } => {
            let series = monthly_series(state, settings.balance_mode);
            if json {
                println!("{}", series_json(&series).map_err(|e| FinanceError::Json(e.to_string()))?);
            } else {
                print!("{}", render_monthly(&series));
            }
        }
        ChartCommands::Categories { json } => {
            let series = category_series(&state.categorized_expenses);
            if json {
                println!("{}", series_json(&series).map_err(|e| FinanceError::Json(e.to_string()))?);
            } else {
                print!("{}", render_categories(&series));
            }
        }
    }

    Ok(())
}
