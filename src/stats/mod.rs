//! Aggregation engine
//!
//! Pure functions that derive totals from the records. Every function is
//! total: it never fails and always yields a finite amount. Invalid numeric
//! input is coerced to zero before it reaches a record, so nothing here has
//! to guard against it.
//!
//! The dashboard, the chart feed and the report builder all read their
//! figures from this module.

mod summary;

pub use summary::Stats;

use serde::Serialize;

use crate::models::{
    CategorizedExpense, FixedExpenses, Loan, MonthName, MonthRecord, MonthlyIncome, Money,
    SavingsKind, SavingsTransaction, Trip, VehicleCategory, VehicleExpense, VehicleType,
};

/// Sum of the seven fixed bills
pub fn total_expenses(expenses: &FixedExpenses) -> Money {
    expenses.fields().iter().map(|(_, value)| *value).sum()
}

/// Sum of the four income sources
pub fn total_income(income: &MonthlyIncome) -> Money {
    income.fields().iter().map(|(_, value)| *value).sum()
}

/// Sum of the categorized expenses belonging to a month record
pub fn categorized_for_month(month: &MonthRecord, categorized: &[CategorizedExpense]) -> Money {
    categorized
        .iter()
        .filter(|e| e.month.belongs_to(month))
        .map(|e| e.value)
        .sum()
}

/// Fixed bills plus categorized expenses of a month
pub fn month_outflow(month: &MonthRecord, categorized: &[CategorizedExpense]) -> Money {
    total_expenses(&month.expenses) + categorized_for_month(month, categorized)
}

/// Income minus fixed bills and categorized expenses of a month
pub fn monthly_balance(month: &MonthRecord, categorized: &[CategorizedExpense]) -> Money {
    total_income(&month.income) - month_outflow(month, categorized)
}

/// Salary of the month following `label`
///
/// Looks for the first month record (insertion order) carrying the successor
/// label, wrapping Dezembro to Janeiro. Zero when there is none.
pub fn next_month_salary(label: MonthName, months: &[MonthRecord]) -> Money {
    let next = label.succ();
    months
        .iter()
        .find(|m| m.month == next)
        .map(|m| m.income.salario)
        .unwrap_or_default()
}

/// Fuel and maintenance totals of one vehicle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VehicleCosts {
    pub fuel: Money,
    pub maintenance: Money,
}

impl VehicleCosts {
    pub fn total(&self) -> Money {
        self.fuel + self.maintenance
    }

    fn add(&mut self, category: VehicleCategory, value: Money) {
        match category {
            VehicleCategory::Fuel => self.fuel += value,
            VehicleCategory::Maintenance => self.maintenance += value,
        }
    }
}

/// Vehicle spending split by vehicle and category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VehicleBreakdown {
    pub car: VehicleCosts,
    pub moto: VehicleCosts,
}

impl VehicleBreakdown {
    /// Spending over both vehicles
    pub fn total(&self) -> Money {
        self.car.total() + self.moto.total()
    }
}

/// Split vehicle expenses by vehicle and category
pub fn vehicle_breakdown(expenses: &[VehicleExpense]) -> VehicleBreakdown {
    let mut breakdown = VehicleBreakdown::default();
    for expense in expenses {
        let costs = match expense.vehicle {
            VehicleType::Car => &mut breakdown.car,
            VehicleType::Motorcycle => &mut breakdown.moto,
        };
        costs.add(expense.category, expense.value);
    }
    breakdown
}

/// Amounts paid and still owed over all loans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoanPosition {
    pub paid: Money,
    pub remaining: Money,
}

/// Paid and remaining amounts of one loan, from its installments
///
/// `total_value` and `interest_monthly` are not part of this arithmetic.
/// Remaining goes negative when more installments were paid than contracted.
pub fn loan_amounts(loan: &Loan) -> LoanPosition {
    LoanPosition {
        paid: loan
            .installment_value
            .times(i64::from(loan.paid_installments)),
        remaining: loan.installment_value.times(loan.open_installments()),
    }
}

/// Paid and remaining amounts over all loans
pub fn loan_position(loans: &[Loan]) -> LoanPosition {
    loans
        .iter()
        .map(loan_amounts)
        .fold(LoanPosition::default(), |acc, p| LoanPosition {
            paid: acc.paid + p.paid,
            remaining: acc.remaining + p.remaining,
        })
}

/// Savings balance and the part of it that came from yields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SavingsPosition {
    pub total: Money,
    pub earnings: Money,
}

/// Net savings position: deposits and yields add, withdrawals subtract
pub fn savings_position(transactions: &[SavingsTransaction]) -> SavingsPosition {
    SavingsPosition {
        total: transactions.iter().map(SavingsTransaction::signed_value).sum(),
        earnings: transactions
            .iter()
            .filter(|t| t.kind == SavingsKind::Yield)
            .map(|t| t.value)
            .sum(),
    }
}

/// Sum of the six cost fields of a trip
pub fn trip_total(trip: &Trip) -> Money {
    trip.costs().iter().map(|(_, value)| *value).sum()
}

/// Sum over all trips
pub fn travel_total(trips: &[Trip]) -> Money {
    trips.iter().map(trip_total).sum()
}

/// Sum of all categorized expenses
pub fn categorized_total(expenses: &[CategorizedExpense]) -> Money {
    expenses.iter().map(|e| e.value).sum()
}

/// Categorized spending per category label, in first-seen order
pub fn category_totals(expenses: &[CategorizedExpense]) -> Vec<(String, Money)> {
    let mut totals: Vec<(String, Money)> = Vec::new();
    for expense in expenses {
        match totals.iter_mut().find(|(category, _)| *category == expense.category) {
            Some((_, total)) => *total += expense.value,
            None => totals.push((expense.category.clone(), expense.value)),
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonthRef, SavingsTransaction};

    fn money(units: i64) -> Money {
        Money::from_units_cents(units, 0)
    }

    fn month(label: MonthName) -> MonthRecord {
        MonthRecord::new(label, 2025)
    }

    #[test]
    fn test_january_scenario() {
        let mut jan = month(MonthName::Janeiro);
        jan.expenses.inter = money(100);
        jan.expenses.nubank = money(50);
        jan.income.salario = money(1000);

        assert_eq!(total_expenses(&jan.expenses), money(150));
        assert_eq!(total_income(&jan.income), money(1000));
        assert_eq!(monthly_balance(&jan, &[]), money(850));
    }

    #[test]
    fn test_totals_ignore_field_order() {
        let mut a = FixedExpenses::default();
        a.inter = money(10);
        a.pix = money(3);
        let mut b = FixedExpenses::default();
        b.pix = money(10);
        b.inter = money(3);
        assert_eq!(total_expenses(&a), total_expenses(&b));

        // Fields left at their defaults count as zero
        assert_eq!(total_income(&MonthlyIncome::default()), Money::zero());
    }

    #[test]
    fn test_totals_clamp_instead_of_overflowing() {
        let mut jan = month(MonthName::Janeiro);
        jan.expenses.inter = Money::parse_or_zero("90000000000000000");
        jan.expenses.nubank = Money::parse_or_zero("90000000000000000");

        let total = total_expenses(&jan.expenses);
        assert_eq!(total.cents(), i64::MAX);
        assert_eq!(monthly_balance(&jan, &[]).cents(), -i64::MAX);
    }

    #[test]
    fn test_monthly_balance_includes_linked_categorized() {
        let mut jan = month(MonthName::Janeiro);
        jan.income.salario = money(1000);
        let other_jan = month(MonthName::Janeiro);

        let mut linked = CategorizedExpense::new(jan.month_ref());
        linked.value = money(200);
        let mut elsewhere = CategorizedExpense::new(other_jan.month_ref());
        elsewhere.value = money(999);
        let mut by_label = CategorizedExpense::new(MonthRef::unlinked(MonthName::Janeiro));
        by_label.value = money(50);

        let categorized = vec![linked, elsewhere, by_label];
        assert_eq!(categorized_for_month(&jan, &categorized), money(250));
        assert_eq!(monthly_balance(&jan, &categorized), money(750));
    }

    #[test]
    fn test_next_month_salary_wraps() {
        let mut jan = month(MonthName::Janeiro);
        jan.income.salario = money(3000);
        let dec = month(MonthName::Dezembro);
        let months = vec![dec, jan];

        assert_eq!(next_month_salary(MonthName::Dezembro, &months), money(3000));
        assert_eq!(next_month_salary(MonthName::Janeiro, &months), Money::zero());
    }

    #[test]
    fn test_next_month_salary_uses_first_match() {
        let mut first = month(MonthName::Fevereiro);
        first.income.salario = money(1);
        let mut second = month(MonthName::Fevereiro);
        second.income.salario = money(2);
        assert_eq!(
            next_month_salary(MonthName::Janeiro, &[first, second]),
            money(1)
        );
    }

    #[test]
    fn test_vehicle_scenario() {
        let mut fuel = VehicleExpense::new(VehicleType::Car);
        fuel.value = money(200);
        let mut repair = VehicleExpense::new(VehicleType::Motorcycle);
        repair.category = VehicleCategory::Maintenance;
        repair.value = money(50);

        let breakdown = vehicle_breakdown(&[fuel, repair]);
        assert_eq!(
            breakdown,
            VehicleBreakdown {
                car: VehicleCosts {
                    fuel: money(200),
                    maintenance: Money::zero(),
                },
                moto: VehicleCosts {
                    fuel: Money::zero(),
                    maintenance: money(50),
                },
            }
        );
        assert_eq!(breakdown.total(), money(250));
    }

    #[test]
    fn test_loan_position_adds_up_to_installment_total() {
        let mut loans = Vec::new();
        for (installments, paid, value) in [(12, 3, 250), (10, 12, 99), (1, 0, 0), (0, 0, 40)] {
            let mut loan = Loan::new("x");
            loan.installments = installments;
            loan.paid_installments = paid;
            loan.installment_value = money(value);
            loans.push(loan);
        }

        let position = loan_position(&loans);
        let expected: Money = loans.iter().map(Loan::installment_total).sum();
        assert_eq!(position.paid + position.remaining, expected);
        // Over-paid loan contributes a negative remainder
        assert_eq!(loan_amounts(&loans[1]).remaining, money(-198));
    }

    #[test]
    fn test_loan_position_ignores_total_value() {
        let mut loan = Loan::new("Carro");
        loan.total_value = money(50_000);
        loan.installments = 2;
        loan.installment_value = money(100);
        assert_eq!(loan_position(&[loan]).remaining, money(200));
    }

    #[test]
    fn test_savings_position_is_permutation_invariant() {
        let mut txs = Vec::new();
        for (kind, value) in [
            (SavingsKind::Deposit, 1000),
            (SavingsKind::Withdrawal, 300),
            (SavingsKind::Yield, 25),
            (SavingsKind::Deposit, 75),
        ] {
            let mut tx = SavingsTransaction::new(kind);
            tx.value = money(value);
            txs.push(tx);
        }

        let expected = SavingsPosition {
            total: money(800),
            earnings: money(25),
        };
        assert_eq!(savings_position(&txs), expected);

        for shift in 1..txs.len() {
            txs.rotate_left(shift);
            assert_eq!(savings_position(&txs), expected);
        }
        txs.reverse();
        assert_eq!(savings_position(&txs), expected);
    }

    #[test]
    fn test_trip_totals() {
        let mut trip = Trip::default();
        trip.car_rental = money(300);
        trip.food = money(120);
        trip.pix = money(30);
        assert_eq!(trip_total(&trip), money(450));
        assert_eq!(travel_total(&[trip.clone(), trip]), money(900));
        assert_eq!(travel_total(&[]), Money::zero());
    }

    #[test]
    fn test_category_totals_first_seen_order() {
        let jan = MonthRef::unlinked(MonthName::Janeiro);
        let mut expenses = Vec::new();
        for (category, value) in [("Lazer", 10), ("Saúde", 5), ("Lazer", 7)] {
            let mut e = CategorizedExpense::new(jan);
            e.category = category.to_string();
            e.value = money(value);
            expenses.push(e);
        }

        let totals = category_totals(&expenses);
        assert_eq!(
            totals,
            vec![("Lazer".to_string(), money(17)), ("Saúde".to_string(), money(5))]
        );
        assert_eq!(categorized_total(&expenses), money(22));
    }
}
