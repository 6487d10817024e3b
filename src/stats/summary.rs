//! Dashboard figures computed in one pass over the state

use serde::Serialize;

use super::{
    categorized_total, loan_position, savings_position, travel_total, vehicle_breakdown,
    LoanPosition, SavingsPosition, VehicleBreakdown,
};
use crate::models::{AppState, Money};

/// Top-line figures shown on the dashboard and in the executive summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub vehicle: VehicleBreakdown,
    pub loans: LoanPosition,
    pub savings: SavingsPosition,
    pub travel: Money,
    pub categorized: Money,
}

impl Stats {
    /// Compute every dashboard figure from a state snapshot
    pub fn compute(state: &AppState) -> Self {
        Self {
            vehicle: vehicle_breakdown(&state.vehicle_expenses),
            loans: loan_position(&state.loans),
            savings: savings_position(&state.savings),
            travel: travel_total(&state.trips),
            categorized: categorized_total(&state.categorized_expenses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_is_all_zero() {
        let stats = Stats::compute(&AppState::default());
        assert_eq!(stats, Stats::default());
        assert_eq!(stats.savings.total.to_string(), "R$ 0,00");
    }
}
