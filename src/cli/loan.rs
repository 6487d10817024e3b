//! Loan CLI commands

use clap::Subcommand;

use super::apply_assignments;
use crate::config::Settings;
use crate::display::format_loan_list;
use crate::error::FinanceResult;
use crate::models::Loan;
use crate::services::RecordService;
use crate::storage::Storage;

/// Loan subcommands
#[derive(Subcommand)]
pub enum LoanCommands {
    /// Add a loan
    Add {
        /// Description (defaults to "Novo Empréstimo")
        description: Option<String>,
        /// Initial field values, e.g. --set installments=12 --set installment_value=350
        #[arg(short, long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    /// List loans with paid and remaining amounts
    List,
    /// Set a field of a loan
    Set {
        /// Loan ID (full, short or prefix)
        loan: String,
        /// Field name (description, total_value, installments, paid_installments,
        /// installment_value, interest_monthly)
        field: String,
        /// New value; invalid numbers become 0
        value: String,
    },
    /// Delete a loan
    Delete {
        /// Loan ID (full, short or prefix)
        loan: String,
    },
}

/// Handle a loan command
pub fn handle_loan_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: LoanCommands,
) -> FinanceResult<()> {
    match cmd {
        LoanCommands::Add { description, set } => {
            let mut service = RecordService::new(storage.state_mut());
            let id = service.add_loan(description.as_deref());
            apply_assignments::<Loan>(&mut service, &id.as_uuid().to_string(), &set)?;
            let loan = service.get::<Loan>(&id.as_uuid().to_string())?;
            println!("Added loan: {}", loan.description);
            println!("  Installments: {}/{}", loan.paid_installments, loan.installments);
            println!("  ID: {}", id);
            storage.save()?;
        }

        LoanCommands::List => {
            println!("{}", format_loan_list(&storage.state().loans, &settings.currency_symbol));
        }

        LoanCommands::Set { loan, field, value } => {
            let mut service = RecordService::new(storage.state_mut());
            service.update::<Loan>(&loan, &field, &value)?;
            let updated = service.get::<Loan>(&loan)?;
            println!("Updated loan {}: {}", updated.description, field);
            storage.save()?;
        }

        LoanCommands::Delete { loan } => {
            let removed = RecordService::new(storage.state_mut()).delete::<Loan>(&loan)?;
            println!("Deleted loan: {}", removed.description);
            storage.save()?;
        }
    }

    Ok(())
}
