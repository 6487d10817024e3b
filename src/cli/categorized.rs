//! Categorized expense CLI commands

use clap::Subcommand;

use super::{apply_assignments, parse_month_arg};
use crate::config::Settings;
use crate::display::format_categorized_list;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{CategorizedExpense, MonthName, CATEGORIES};
use crate::services::RecordService;
use crate::storage::Storage;

/// Categorized expense subcommands
#[derive(Subcommand)]
pub enum CategorizedCommands {
    /// Add a categorized expense (defaults to the last month record)
    Add {
        /// Category label (free text; suggestions are shown by `category list`)
        category: Option<String>,
        /// Amount; invalid amounts become 0
        value: Option<String>,
        /// Month of the expense
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<MonthName>,
        /// Initial field values, e.g. --set description=Farmácia
        #[arg(short, long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    /// List categorized expenses
    List,
    /// Set a field of a categorized expense
    Set {
        /// Expense ID (full, short or prefix)
        expense: String,
        /// Field name (category, value, month, description)
        field: String,
        /// New value; invalid amounts become 0
        value: String,
    },
    /// Delete a categorized expense
    Delete {
        /// Expense ID (full, short or prefix)
        expense: String,
    },
}

/// Handle a categorized expense command
pub fn handle_categorized_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: CategorizedCommands,
) -> FinanceResult<()> {
    if !settings.categorized_expenses {
        return Err(FinanceError::Config(
            "Categorized expenses are disabled. Enable them with \
             `finmaster config set categorized_expenses true`"
                .into(),
        ));
    }
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        CategorizedCommands::Add {
            category,
            value,
            month,
            mut set,
        } => {
            if let Some(value) = value {
                set.insert(0, format!("value={}", value));
            }
            let mut service = RecordService::new(storage.state_mut());
            let id = service.add_categorized_expense(category.as_deref(), month);
            apply_assignments::<CategorizedExpense>(&mut service, &id.as_uuid().to_string(), &set)?;
            let expense = service.get::<CategorizedExpense>(&id.as_uuid().to_string())?;
            println!(
                "Added expense: {} {} ({})",
                expense.category,
                expense.value.format_with_symbol(symbol),
                expense.month
            );
            println!("  ID: {}", id);
            storage.save()?;
        }

        CategorizedCommands::List => {
            println!("{}", format_categorized_list(&storage.state().categorized_expenses, symbol));
            println!();
            println!("Categorias sugeridas: {}", CATEGORIES.join(", "));
        }

        CategorizedCommands::Set {
            expense,
            field,
            value,
        } => {
            let mut service = RecordService::new(storage.state_mut());
            service.update::<CategorizedExpense>(&expense, &field, &value)?;
            let updated = service.get::<CategorizedExpense>(&expense)?;
            println!("Updated expense {}: {}", updated.category, field);
            storage.save()?;
        }

        CategorizedCommands::Delete { expense } => {
            let removed =
                RecordService::new(storage.state_mut()).delete::<CategorizedExpense>(&expense)?;
            println!("Deleted expense: {} ({})", removed.category, removed.description);
            storage.save()?;
        }
    }

    Ok(())
}
