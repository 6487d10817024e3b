//! Field-level editing shared by every record kind
//!
//! The [`Record`] trait lets the record service add, update and delete any
//! kind of record without knowing its concrete type.

use std::fmt;

use super::categorized::CategorizedExpense;
use super::loan::Loan;
use super::money::Money;
use super::month::{FixedExpenses, MonthName, MonthRecord, MonthRef, MonthlyIncome};
use super::savings::{SavingsKind, SavingsTransaction};
use super::state::AppState;
use super::trip::Trip;
use super::vehicle::{VehicleCategory, VehicleExpense, VehicleType};
use super::ids::{
    CategorizedExpenseId, LoanId, MonthId, SavingsId, TripId, VehicleExpenseId,
};
use crate::error::{FinanceError, FinanceResult};

/// A record kind stored in one of the [`AppState`] collections
pub trait Record: Sized {
    /// Typed identifier
    type Id: Copy + Eq + fmt::Display;

    /// Human-readable kind name used in messages
    const ENTITY: &'static str;

    /// This record's id
    fn id(&self) -> Self::Id;

    /// Whether a user-supplied reference (full id, short id or prefix) designates this record
    fn matches_ref(&self, reference: &str) -> bool;

    /// The collection holding this kind
    fn collection(state: &AppState) -> &Vec<Self>;

    /// The collection holding this kind, mutably
    fn collection_mut(state: &mut AppState) -> &mut Vec<Self>;

    /// Set a scalar field from user input
    ///
    /// Numeric input that does not parse is stored as zero. Unknown field
    /// names and unparseable enum values are validation errors. The `month`
    /// association is handled through [`Record::month_mut`].
    fn set_field(&mut self, field: &str, value: &str) -> FinanceResult<()>;

    /// The month association, for kinds that have one
    fn month_mut(&mut self) -> Option<&mut MonthRef> {
        None
    }

    /// For month records, a reference to the month this record is
    fn owned_month(&self) -> Option<MonthRef> {
        None
    }
}

/// Parse a whole count from user input, coercing anything invalid to zero
///
/// Fractional input is truncated; negative input becomes zero.
pub fn parse_count_or_zero(s: &str) -> u32 {
    let s = s.trim();
    if let Ok(n) = s.parse::<u32>() {
        return n;
    }
    match s.replace(',', ".").parse::<f64>() {
        Ok(f) if f.is_finite() && f > 0.0 && f < u32::MAX as f64 => f.trunc() as u32,
        _ => 0,
    }
}

/// Parse a decimal rate from user input, coercing anything invalid to zero
pub fn parse_rate_or_zero(s: &str) -> f64 {
    match s.trim().replace(',', ".").parse::<f64>() {
        Ok(f) if f.is_finite() => f,
        _ => 0.0,
    }
}

fn parse_enum<T>(entity: &str, field: &str, value: &str, parsed: Option<T>) -> FinanceResult<T> {
    parsed.ok_or_else(|| {
        FinanceError::Validation(format!(
            "Invalid {} for {}: '{}'",
            field, entity, value
        ))
    })
}

/// Parse a month label, failing with a validation error
pub fn parse_month_label(value: &str) -> FinanceResult<MonthName> {
    MonthName::parse(value)
        .ok_or_else(|| FinanceError::Validation(format!("Unknown month '{}'", value)))
}

impl Record for MonthRecord {
    type Id = MonthId;
    const ENTITY: &'static str = "Month";

    fn id(&self) -> MonthId {
        self.id
    }

    fn matches_ref(&self, reference: &str) -> bool {
        self.id.matches_ref(reference)
    }

    fn collection(state: &AppState) -> &Vec<Self> {
        &state.months
    }

    fn collection_mut(state: &mut AppState) -> &mut Vec<Self> {
        &mut state.months
    }

    /// Accepts `month`, `year`, `expenses.<field>`, `income.<field>` and
    /// unqualified field names when they are unambiguous.
    fn set_field(&mut self, field: &str, value: &str) -> FinanceResult<()> {
        let field = field.trim().to_lowercase();
        match field.as_str() {
            "month" => {
                self.month = parse_month_label(value)?;
                return Ok(());
            }
            "year" => {
                self.year = value.trim().parse().unwrap_or(0);
                return Ok(());
            }
            "outros" => {
                return Err(FinanceError::Validation(
                    "Field 'outros' is ambiguous, use expenses.outros or income.outros".into(),
                ));
            }
            _ => {}
        }

        let amount = Money::parse_or_zero(value);
        let found = match field.split_once('.') {
            Some(("expenses", name)) => self.expenses.set(name, amount),
            Some(("income", name)) => self.income.set(name, amount),
            Some(_) => false,
            None => self.expenses.set(&field, amount) || self.income.set(&field, amount),
        };

        if found {
            Ok(())
        } else {
            let known: Vec<&str> = ["month", "year", "expenses.outros", "income.outros"]
                .into_iter()
                .chain(FixedExpenses::FIELDS)
                .chain(MonthlyIncome::FIELDS)
                .filter(|f| *f != "outros")
                .collect();
            Err(FinanceError::unknown_field(Self::ENTITY, &field, &known))
        }
    }

    fn owned_month(&self) -> Option<MonthRef> {
        Some(self.month_ref())
    }
}

impl Record for Loan {
    type Id = LoanId;
    const ENTITY: &'static str = "Loan";

    fn id(&self) -> LoanId {
        self.id
    }

    fn matches_ref(&self, reference: &str) -> bool {
        self.id.matches_ref(reference)
    }

    fn collection(state: &AppState) -> &Vec<Self> {
        &state.loans
    }

    fn collection_mut(state: &mut AppState) -> &mut Vec<Self> {
        &mut state.loans
    }

    fn set_field(&mut self, field: &str, value: &str) -> FinanceResult<()> {
        match field.trim().to_lowercase().as_str() {
            "description" => self.description = value.to_string(),
            "total_value" => self.total_value = Money::parse_or_zero(value),
            "installments" => self.installments = parse_count_or_zero(value),
            "paid_installments" => self.paid_installments = parse_count_or_zero(value),
            "installment_value" => self.installment_value = Money::parse_or_zero(value),
            "interest_monthly" => self.interest_monthly = parse_rate_or_zero(value),
            other => return Err(FinanceError::unknown_field(Self::ENTITY, other, &Self::FIELDS)),
        }
        Ok(())
    }
}

impl Record for Trip {
    type Id = TripId;
    const ENTITY: &'static str = "Trip";

    fn id(&self) -> TripId {
        self.id
    }

    fn matches_ref(&self, reference: &str) -> bool {
        self.id.matches_ref(reference)
    }

    fn collection(state: &AppState) -> &Vec<Self> {
        &state.trips
    }

    fn collection_mut(state: &mut AppState) -> &mut Vec<Self> {
        &mut state.trips
    }

    fn set_field(&mut self, field: &str, value: &str) -> FinanceResult<()> {
        let field = field.trim().to_lowercase();
        if field == "destination" {
            self.destination = value.to_string();
            return Ok(());
        }
        if self.set_cost(&field, Money::parse_or_zero(value)) {
            Ok(())
        } else {
            Err(FinanceError::unknown_field(Self::ENTITY, &field, &Self::FIELDS))
        }
    }

    fn month_mut(&mut self) -> Option<&mut MonthRef> {
        Some(&mut self.month)
    }
}

impl Record for VehicleExpense {
    type Id = VehicleExpenseId;
    const ENTITY: &'static str = "Vehicle expense";

    fn id(&self) -> VehicleExpenseId {
        self.id
    }

    fn matches_ref(&self, reference: &str) -> bool {
        self.id.matches_ref(reference)
    }

    fn collection(state: &AppState) -> &Vec<Self> {
        &state.vehicle_expenses
    }

    fn collection_mut(state: &mut AppState) -> &mut Vec<Self> {
        &mut state.vehicle_expenses
    }

    fn set_field(&mut self, field: &str, value: &str) -> FinanceResult<()> {
        match field.trim().to_lowercase().as_str() {
            "type" | "vehicle" => {
                self.vehicle = parse_enum(Self::ENTITY, "type", value, VehicleType::parse(value))?
            }
            "category" => {
                self.category =
                    parse_enum(Self::ENTITY, "category", value, VehicleCategory::parse(value))?
            }
            "description" => self.description = value.to_string(),
            "value" => self.value = Money::parse_or_zero(value),
            other => return Err(FinanceError::unknown_field(Self::ENTITY, other, &Self::FIELDS)),
        }
        Ok(())
    }

    fn month_mut(&mut self) -> Option<&mut MonthRef> {
        Some(&mut self.month)
    }
}

impl Record for SavingsTransaction {
    type Id = SavingsId;
    const ENTITY: &'static str = "Savings transaction";

    fn id(&self) -> SavingsId {
        self.id
    }

    fn matches_ref(&self, reference: &str) -> bool {
        self.id.matches_ref(reference)
    }

    fn collection(state: &AppState) -> &Vec<Self> {
        &state.savings
    }

    fn collection_mut(state: &mut AppState) -> &mut Vec<Self> {
        &mut state.savings
    }

    fn set_field(&mut self, field: &str, value: &str) -> FinanceResult<()> {
        match field.trim().to_lowercase().as_str() {
            "type" | "kind" => {
                self.kind = parse_enum(Self::ENTITY, "type", value, SavingsKind::parse(value))?
            }
            "value" => self.value = Money::parse_or_zero(value),
            "description" => self.description = value.to_string(),
            other => return Err(FinanceError::unknown_field(Self::ENTITY, other, &Self::FIELDS)),
        }
        Ok(())
    }

    fn month_mut(&mut self) -> Option<&mut MonthRef> {
        Some(&mut self.month)
    }
}

impl Record for CategorizedExpense {
    type Id = CategorizedExpenseId;
    const ENTITY: &'static str = "Categorized expense";

    fn id(&self) -> CategorizedExpenseId {
        self.id
    }

    fn matches_ref(&self, reference: &str) -> bool {
        self.id.matches_ref(reference)
    }

    fn collection(state: &AppState) -> &Vec<Self> {
        &state.categorized_expenses
    }

    fn collection_mut(state: &mut AppState) -> &mut Vec<Self> {
        &mut state.categorized_expenses
    }

    fn set_field(&mut self, field: &str, value: &str) -> FinanceResult<()> {
        match field.trim().to_lowercase().as_str() {
            "category" => self.category = value.trim().to_string(),
            "value" => self.value = Money::parse_or_zero(value),
            "description" => self.description = value.to_string(),
            other => return Err(FinanceError::unknown_field(Self::ENTITY, other, &Self::FIELDS)),
        }
        Ok(())
    }

    fn month_mut(&mut self) -> Option<&mut MonthRef> {
        Some(&mut self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_or_zero() {
        assert_eq!(parse_count_or_zero("12"), 12);
        assert_eq!(parse_count_or_zero(" 3,9 "), 3);
        assert_eq!(parse_count_or_zero("-4"), 0);
        assert_eq!(parse_count_or_zero("doze"), 0);
        assert_eq!(parse_count_or_zero("NaN"), 0);
    }

    #[test]
    fn test_month_fields() {
        let mut month = MonthRecord::new(MonthName::Janeiro, 2025);
        month.set_field("expenses.outros", "10").unwrap();
        month.set_field("income.outros", "20").unwrap();
        month.set_field("nubank", "100,50").unwrap();
        month.set_field("salario", "abc").unwrap();
        month.set_field("month", "abril").unwrap();

        assert_eq!(month.expenses.outros.cents(), 1000);
        assert_eq!(month.income.outros.cents(), 2000);
        assert_eq!(month.expenses.nubank.cents(), 10050);
        assert!(month.income.salario.is_zero());
        assert_eq!(month.month, MonthName::Abril);

        assert!(month.set_field("outros", "1").unwrap_err().is_validation());
        assert!(month.set_field("aluguel", "1").unwrap_err().is_validation());
        assert!(month.set_field("month", "Smarch").is_err());
    }

    #[test]
    fn test_loan_fields_coerce_invalid_numbers() {
        let mut loan = Loan::default();
        loan.set_field("installments", "doze").unwrap();
        loan.set_field("installment_value", "150,00").unwrap();
        loan.set_field("interest_monthly", "1,99").unwrap();
        assert_eq!(loan.installments, 0);
        assert_eq!(loan.installment_value.cents(), 15000);
        assert!((loan.interest_monthly - 1.99).abs() < f64::EPSILON);
    }

    #[test]
    fn test_enum_fields_reject_unknown_values() {
        let mut expense = VehicleExpense::new(VehicleType::Car);
        expense.set_field("type", "moto").unwrap();
        assert_eq!(expense.vehicle, VehicleType::Motorcycle);
        assert!(expense.set_field("category", "parking").is_err());

        let mut tx = SavingsTransaction::new(SavingsKind::Deposit);
        tx.set_field("type", "retirada").unwrap();
        assert_eq!(tx.kind, SavingsKind::Withdrawal);
    }

    #[test]
    fn test_month_association_not_a_scalar_field() {
        let mut trip = Trip::default();
        assert!(trip.set_field("month", "Maio").is_err());
        assert!(trip.month_mut().is_some());
        assert!(MonthRecord::new(MonthName::Maio, 2025).month_mut().is_none());
    }
}
