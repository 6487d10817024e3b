use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use finmaster::cli::{
    handle_categorized_command, handle_chart_command, handle_config_command,
    handle_export_command, handle_import_command, handle_loan_command, handle_month_command,
    handle_report_command, handle_savings_command, handle_trip_command, handle_vehicle_command,
};
use finmaster::config::{FinancePaths, Settings};
use finmaster::display::format_dashboard;
use finmaster::services::RecordService;
use finmaster::storage::Storage;

#[derive(Parser)]
#[command(
    name = "finmaster",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based personal finance tracker",
    long_about = "finmaster keeps monthly fixed bills and income, loans, trips, vehicle \
                  costs, savings and categorized expenses in one local store, and turns \
                  them into a dashboard, charts and a consolidated report."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Top-line figures and charts
    Dashboard,

    /// Chart series, as bars or JSON
    #[command(subcommand)]
    Chart(finmaster::cli::ChartCommands),

    /// Monthly fixed expenses and income
    #[command(subcommand)]
    Month(finmaster::cli::MonthCommands),

    /// Categorized expenses
    #[command(subcommand, alias = "expense")]
    Category(finmaster::cli::CategorizedCommands),

    /// Loans
    #[command(subcommand)]
    Loan(finmaster::cli::LoanCommands),

    /// Trips
    #[command(subcommand)]
    Trip(finmaster::cli::TripCommands),

    /// Car and motorcycle expenses
    #[command(subcommand)]
    Vehicle(finmaster::cli::VehicleCommands),

    /// Savings deposits, withdrawals and yields
    #[command(subcommand)]
    Savings(finmaster::cli::SavingsCommands),

    /// Write the consolidated financial report
    Report(finmaster::cli::ReportArgs),

    /// Import a spreadsheet or restore a backup
    #[command(subcommand)]
    Import(finmaster::cli::ImportCommands),

    /// Export a full backup
    Export(finmaster::cli::ExportArgs),

    /// Delete every record
    Clear {
        /// Confirm the irreversible reset
        #[arg(long)]
        force: bool,
    },

    /// Show or change settings
    #[command(subcommand)]
    Config(finmaster::cli::ConfigCommands),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = FinancePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Dashboard) => {
            print!("{}", format_dashboard(storage.state(), &settings));
        }
        Some(Commands::Chart(cmd)) => handle_chart_command(&storage, &settings, cmd)?,
        Some(Commands::Month(cmd)) => handle_month_command(&mut storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => {
            handle_categorized_command(&mut storage, &settings, cmd)?
        }
        Some(Commands::Loan(cmd)) => handle_loan_command(&mut storage, &settings, cmd)?,
        Some(Commands::Trip(cmd)) => handle_trip_command(&mut storage, &settings, cmd)?,
        Some(Commands::Vehicle(cmd)) => handle_vehicle_command(&mut storage, &settings, cmd)?,
        Some(Commands::Savings(cmd)) => handle_savings_command(&mut storage, &settings, cmd)?,
        Some(Commands::Report(args)) => handle_report_command(&storage, &settings, args)?,
        Some(Commands::Import(cmd)) => handle_import_command(&mut storage, cmd)?,
        Some(Commands::Export(args)) => handle_export_command(&storage, args)?,
        Some(Commands::Clear { force }) => {
            let counts = storage.state().counts();
            if RecordService::new(storage.state_mut()).clear_all(force) {
                storage.save()?;
                println!("Deleted {} records.", counts.total());
            } else {
                println!(
                    "This deletes all {} records and cannot be undone. Run 'finmaster clear --force' to confirm.",
                    counts.total()
                );
            }
        }
        Some(Commands::Config(cmd)) => handle_config_command(&paths, &mut settings, cmd)?,
        None => {
            println!("finmaster - Terminal-based personal finance tracker");
            println!();
            println!("Run 'finmaster --help' for usage information.");
            println!("Run 'finmaster dashboard' for an overview.");
        }
    }

    Ok(())
}
