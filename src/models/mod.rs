//! Core data models for finmaster
//!
//! This module contains the record types of the personal-finance domain:
//! monthly fixed expenses and income, loans, trips, vehicle costs, savings
//! movements and categorized variable expenses, plus the `AppState` root
//! that owns them all.

pub mod categorized;
pub mod ids;
pub mod loan;
pub mod money;
pub mod month;
pub mod record;
pub mod savings;
pub mod state;
pub mod trip;
pub mod vehicle;

pub use categorized::{CategorizedExpense, CATEGORIES};
pub use ids::{CategorizedExpenseId, LoanId, MonthId, SavingsId, TripId, VehicleExpenseId};
pub use loan::Loan;
pub use money::Money;
pub use month::{FixedExpenses, MonthName, MonthRecord, MonthRef, MonthlyIncome};
pub use record::{parse_count_or_zero, Record};
pub use savings::{SavingsKind, SavingsTransaction};
pub use state::{AppState, RecordCounts};
pub use trip::Trip;
pub use vehicle::{VehicleCategory, VehicleExpense, VehicleType};
