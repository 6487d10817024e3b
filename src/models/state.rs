//! The aggregate root of all records
//!
//! `AppState` owns every record collection in insertion order. It is passed
//! by reference to the statistics, chart and report builders, and serialized
//! wholesale by the storage layer.

use serde::{Deserialize, Serialize};

use super::categorized::CategorizedExpense;
use super::loan::Loan;
use super::month::{MonthName, MonthRecord, MonthRef};
use super::savings::SavingsTransaction;
use super::trip::Trip;
use super::vehicle::VehicleExpense;

/// Every record of the application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub months: Vec<MonthRecord>,
    #[serde(default)]
    pub loans: Vec<Loan>,
    #[serde(default)]
    pub trips: Vec<Trip>,
    #[serde(default)]
    pub vehicle_expenses: Vec<VehicleExpense>,
    #[serde(default)]
    pub savings: Vec<SavingsTransaction>,
    #[serde(default)]
    pub categorized_expenses: Vec<CategorizedExpense>,
}

/// Number of records per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCounts {
    pub months: usize,
    pub loans: usize,
    pub trips: usize,
    pub vehicle_expenses: usize,
    pub savings: usize,
    pub categorized_expenses: usize,
}

impl RecordCounts {
    /// Total number of records
    pub fn total(&self) -> usize {
        self.months
            + self.loans
            + self.trips
            + self.vehicle_expenses
            + self.savings
            + self.categorized_expenses
    }
}

impl AppState {
    /// Whether no record of any kind exists
    pub fn is_empty(&self) -> bool {
        self.counts().total() == 0
    }

    /// Record counts per collection
    pub fn counts(&self) -> RecordCounts {
        RecordCounts {
            months: self.months.len(),
            loans: self.loans.len(),
            trips: self.trips.len(),
            vehicle_expenses: self.vehicle_expenses.len(),
            savings: self.savings.len(),
            categorized_expenses: self.categorized_expenses.len(),
        }
    }

    /// The most recently added month record
    pub fn last_month(&self) -> Option<&MonthRecord> {
        self.months.last()
    }

    /// Reference for a label, linked to the first month record carrying it
    pub fn month_ref_for(&self, label: MonthName) -> MonthRef {
        self.months
            .iter()
            .find(|m| m.month == label)
            .map(MonthRef::linked)
            .unwrap_or_else(|| MonthRef::unlinked(label))
    }

    /// Categorized expenses belonging to a month record
    pub fn categorized_for<'a>(
        &'a self,
        month: &'a MonthRecord,
    ) -> impl Iterator<Item = &'a CategorizedExpense> + 'a {
        self.categorized_expenses
            .iter()
            .filter(move |e| e.month.belongs_to(month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_empty_state() {
        let state = AppState::default();
        assert!(state.is_empty());
        assert!(state.last_month().is_none());
    }

    #[test]
    fn test_month_ref_for_links_first_match() {
        let mut state = AppState::default();
        let first = MonthRecord::new(MonthName::Maio, 2024);
        let second = MonthRecord::new(MonthName::Maio, 2025);
        let first_id = first.id;
        state.months.push(first);
        state.months.push(second);

        let r = state.month_ref_for(MonthName::Maio);
        assert_eq!(r.month_id, Some(first_id));

        let unlinked = state.month_ref_for(MonthName::Junho);
        assert_eq!(unlinked.month_id, None);
    }

    #[test]
    fn test_categorized_for_month() {
        let mut state = AppState::default();
        let jan = MonthRecord::new(MonthName::Janeiro, 2025);
        let mut linked = CategorizedExpense::new(jan.month_ref());
        linked.value = Money::from_cents(1000);
        let mut other = CategorizedExpense::new(MonthRef::unlinked(MonthName::Fevereiro));
        other.value = Money::from_cents(999);
        state.categorized_expenses = vec![linked, other];
        state.months.push(jan.clone());

        let total: Money = state.categorized_for(&jan).map(|e| e.value).sum();
        assert_eq!(total.cents(), 1000);
        assert_eq!(state.counts().total(), 3);
    }

    #[test]
    fn test_json_roundtrip_preserves_state() {
        let mut state = AppState::default();
        let month = MonthRecord::new(MonthName::Marco, 2025);
        state.trips.push(Trip::new("Salvador", month.month_ref()));
        state.months.push(month);
        state.loans.push(Loan::default());

        let json = serde_json::to_string(&state).unwrap();
        let back: AppState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
