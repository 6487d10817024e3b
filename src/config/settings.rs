//! User settings for finmaster
//!
//! Manages user preferences: currency symbol, how the monthly balance is
//! derived, whether the categorized-expenses feature is on, and report layout.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::paths::FinancePaths;
use crate::error::FinanceError;

/// How the balance of a month is derived for charts and the monthly report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BalanceMode {
    /// Income of the month minus its expenses (default)
    #[default]
    Income,
    /// Next month's confirmed salary minus this month's expenses
    NextMonthSalary,
}

impl BalanceMode {
    /// Parse a balance mode from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "next-month-salary" | "next_month_salary" | "next-salary" => {
                Some(Self::NextMonthSalary)
            }
            _ => None,
        }
    }
}

impl fmt::Display for BalanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::NextMonthSalary => write!(f, "next-month-salary"),
        }
    }
}

/// User settings for finmaster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used by the shared currency formatter
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// How monthly balances are derived
    #[serde(default)]
    pub balance_mode: BalanceMode,

    /// Whether the categorized-expenses feature is enabled
    #[serde(default = "default_true")]
    pub categorized_expenses: bool,

    /// Lines per page of the exported report document
    #[serde(default = "default_lines_per_page")]
    pub lines_per_page: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_true() -> bool {
    true
}

fn default_lines_per_page() -> usize {
    56
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            balance_mode: BalanceMode::default(),
            categorized_expenses: default_true(),
            lines_per_page: default_lines_per_page(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinanceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Update a single setting by its key
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FinanceError> {
        match key {
            "currency_symbol" | "currency-symbol" => {
                self.currency_symbol = value.trim().to_string();
            }
            "balance_mode" | "balance-mode" => {
                self.balance_mode = BalanceMode::parse(value).ok_or_else(|| {
                    FinanceError::Validation(format!(
                        "Invalid balance mode '{}'. Use income or next-month-salary",
                        value
                    ))
                })?;
            }
            "categorized_expenses" | "categorized-expenses" => {
                self.categorized_expenses = parse_bool(value).ok_or_else(|| {
                    FinanceError::Validation(format!("Invalid boolean '{}'", value))
                })?;
            }
            "lines_per_page" | "lines-per-page" => {
                let lines: usize = value.trim().parse().map_err(|_| {
                    FinanceError::Validation(format!("Invalid line count '{}'", value))
                })?;
                if lines < 10 {
                    return Err(FinanceError::Validation(
                        "A report page needs at least 10 lines".into(),
                    ));
                }
                self.lines_per_page = lines;
            }
            other => {
                return Err(FinanceError::Config(format!("Unknown setting '{}'", other)));
            }
        }
        Ok(())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
