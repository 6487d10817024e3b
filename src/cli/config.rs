//! CLI commands for settings and paths

use clap::Subcommand;

use crate::config::{FinancePaths, Settings};
use crate::error::FinanceResult;

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show settings and data paths
    Show,
    /// Change a setting
    Set {
        /// currency_symbol, balance_mode, categorized_expenses or lines_per_page
        key: String,
        /// New value
        value: String,
    },
}

/// Handle config commands
pub fn handle_config_command(
    paths: &FinancePaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> FinanceResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("finmaster configuration");
            println!("=======================");
            println!("Config file:    {}", paths.settings_file().display());
            println!("Record store:   {}", paths.store_file().display());
            println!("Backups:        {}", paths.backup_dir().display());
            println!();
            println!("Settings:");
            println!("  currency_symbol:      {}", settings.currency_symbol);
            println!("  balance_mode:         {}", settings.balance_mode);
            println!("  categorized_expenses: {}", settings.categorized_expenses);
            println!("  lines_per_page:       {}", settings.lines_per_page);
        }
        ConfigCommands::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(paths)?;
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}
