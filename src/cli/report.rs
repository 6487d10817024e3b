//! CLI command for the consolidated financial report

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::reports::{render_document, FinancialReport, DEFAULT_REPORT_FILE};
use crate::storage::Storage;

/// Report arguments
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Output file (defaults to relatorio_financeiro_completo.txt, or .csv with --csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the report as CSV instead of a paginated document
    #[arg(long)]
    pub csv: bool,

    /// Print the report to the terminal instead of writing a file
    #[arg(long, conflicts_with_all = ["output", "csv"])]
    pub print: bool,
}

/// Handle the report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    args: ReportArgs,
) -> FinanceResult<()> {
    let report = FinancialReport::generate(storage.state(), settings);

    if args.print {
        print!("{}", report.format_terminal());
        return Ok(());
    }

    let path = args.output.unwrap_or_else(|| {
        let default = PathBuf::from(DEFAULT_REPORT_FILE);
        if args.csv {
            default.with_extension("csv")
        } else {
            default
        }
    });

    let file = File::create(&path).map_err(|e| {
        FinanceError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    if args.csv {
        report.export_csv(&mut writer)?;
    } else {
        writer
            .write_all(render_document(&report, settings.lines_per_page).as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| FinanceError::Export(format!("Failed to write report: {}", e)))?;
    }

    println!("Report exported to: {}", path.display());
    Ok(())
}
