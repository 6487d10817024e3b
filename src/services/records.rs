//! Record service
//!
//! Add, update and delete operations over every record collection of an
//! [`AppState`], including the month association of dependent records.

use chrono::Datelike;
use tracing::{debug, info};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    AppState, CategorizedExpense, CategorizedExpenseId, Loan, LoanId, MonthId, MonthName,
    MonthRecord, MonthRef, Record, SavingsId, SavingsKind, SavingsTransaction, Trip, TripId,
    VehicleExpense, VehicleExpenseId, VehicleType,
};

/// Service for record management
pub struct RecordService<'a> {
    state: &'a mut AppState,
}

impl<'a> RecordService<'a> {
    /// Create a new record service over a state
    pub fn new(state: &'a mut AppState) -> Self {
        Self { state }
    }

    /// Read-only view of the underlying state
    pub fn state(&self) -> &AppState {
        self.state
    }

    /// Add a month record
    ///
    /// Without an explicit label the month following the last record is used,
    /// or the current calendar month when there is none. The year defaults to
    /// the current year.
    pub fn add_month(&mut self, month: Option<MonthName>, year: Option<i32>) -> MonthId {
        let month = month.unwrap_or_else(|| {
            self.state
                .last_month()
                .map(|last| last.month.succ())
                .unwrap_or_else(MonthName::current)
        });
        let year = year.unwrap_or_else(|| chrono::Local::now().year());

        let record = MonthRecord::new(month, year);
        let id = record.id;
        self.state.months.push(record);
        info!(%id, %month, year, "month added");
        id
    }

    /// Add a loan with a single unpaid installment
    pub fn add_loan(&mut self, description: Option<&str>) -> LoanId {
        let loan = match description {
            Some(description) => Loan::new(description),
            None => Loan::default(),
        };
        let id = loan.id;
        self.state.loans.push(loan);
        info!(%id, "loan added");
        id
    }

    /// Add a trip in the given month (current calendar month by default)
    pub fn add_trip(&mut self, destination: Option<&str>, month: Option<MonthName>) -> TripId {
        let mut trip = Trip::default();
        if let Some(destination) = destination {
            trip.destination = destination.to_string();
        }
        trip.month = self.month_ref(month.unwrap_or_else(MonthName::current));
        let id = trip.id;
        self.state.trips.push(trip);
        info!(%id, "trip added");
        id
    }

    /// Add a zero-value fuel expense for a vehicle
    pub fn add_vehicle_expense(
        &mut self,
        vehicle: VehicleType,
        month: Option<MonthName>,
    ) -> VehicleExpenseId {
        let mut expense = VehicleExpense::new(vehicle);
        expense.month = self.month_ref(month.unwrap_or(expense.month.label));
        let id = expense.id;
        self.state.vehicle_expenses.push(expense);
        info!(%id, %vehicle, "vehicle expense added");
        id
    }

    /// Add a zero-value savings movement
    pub fn add_savings(&mut self, kind: SavingsKind, month: Option<MonthName>) -> SavingsId {
        let mut tx = SavingsTransaction::new(kind);
        tx.month = self.month_ref(month.unwrap_or(tx.month.label));
        let id = tx.id;
        self.state.savings.push(tx);
        info!(%id, %kind, "savings transaction added");
        id
    }

    /// Add a categorized expense
    ///
    /// Defaults to the last month record, linked by id, or the current
    /// calendar month when no month record exists.
    pub fn add_categorized_expense(
        &mut self,
        category: Option<&str>,
        month: Option<MonthName>,
    ) -> CategorizedExpenseId {
        let month = match month {
            Some(label) => self.month_ref(label),
            None => self
                .state
                .last_month()
                .map(MonthRecord::month_ref)
                .unwrap_or_else(|| MonthRef::unlinked(MonthName::current())),
        };
        let mut expense = CategorizedExpense::new(month);
        if let Some(category) = category {
            expense.category = category.trim().to_string();
        }
        let id = expense.id;
        self.state.categorized_expenses.push(expense);
        info!(%id, "categorized expense added");
        id
    }

    /// Find a record by a user-supplied reference
    pub fn get<R: Record>(&self, reference: &str) -> FinanceResult<&R> {
        let index = find_index::<R>(self.state, reference)?;
        Ok(&R::collection(self.state)[index])
    }

    /// Update one field of a record
    ///
    /// `month` on a dependent record accepts a month record reference or a
    /// month label; on a month record it renames the month (see
    /// [`RecordService::rename_month`]).
    pub fn update<R: Record>(&mut self, reference: &str, field: &str, value: &str) -> FinanceResult<()> {
        let index = find_index::<R>(self.state, reference)?;
        let is_month_field = field.trim().eq_ignore_ascii_case("month");

        let resolved = if is_month_field {
            Some(self.resolve_month(value)?)
        } else {
            None
        };

        let record = &mut R::collection_mut(self.state)[index];
        let id = record.id();
        match (resolved, record.month_mut()) {
            (Some(month_ref), Some(slot)) => *slot = month_ref,
            _ => record.set_field(field, value)?,
        }

        if is_month_field {
            if let Some(MonthRef { label, month_id: Some(month_id) }) = record.owned_month() {
                self.relabel_dependents(month_id, label);
            }
        }

        debug!(entity = R::ENTITY, %id, field, "record updated");
        Ok(())
    }

    /// Rename a month record and every record linked to it
    pub fn rename_month(&mut self, reference: &str, label: MonthName) -> FinanceResult<MonthId> {
        let index = find_index::<MonthRecord>(self.state, reference)?;
        let month = &mut self.state.months[index];
        month.month = label;
        let id = month.id;
        let relabeled = self.relabel_dependents(id, label);
        info!(%id, %label, relabeled, "month renamed");
        Ok(id)
    }

    /// Delete a record by reference
    ///
    /// Deleting a month record does not cascade: linked records keep their
    /// label and stop contributing to any month's detail view.
    pub fn delete<R: Record>(&mut self, reference: &str) -> FinanceResult<R> {
        let index = find_index::<R>(self.state, reference)?;
        let removed = R::collection_mut(self.state).remove(index);
        info!(entity = R::ENTITY, id = %removed.id(), "record deleted");
        Ok(removed)
    }

    /// Reset the store to empty
    ///
    /// Does nothing and returns false unless `confirmed` is set.
    pub fn clear_all(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        let counts = self.state.counts();
        *self.state = AppState::default();
        info!(removed = counts.total(), "all records cleared");
        true
    }

    fn month_ref(&self, label: MonthName) -> MonthRef {
        self.state.month_ref_for(label)
    }

    /// Resolve user input for a month association: a month record reference
    /// links by id, otherwise the input is parsed as a label
    fn resolve_month(&self, value: &str) -> FinanceResult<MonthRef> {
        if let Some(label) = MonthName::parse(value) {
            return Ok(self.month_ref(label));
        }
        let index = find_index::<MonthRecord>(self.state, value).map_err(|e| match e {
            FinanceError::NotFound { .. } => {
                FinanceError::Validation(format!("Unknown month '{}'", value))
            }
            other => other,
        })?;
        Ok(self.state.months[index].month_ref())
    }

    fn relabel_dependents(&mut self, id: MonthId, label: MonthName) -> usize {
        let state = &mut *self.state;
        let refs = state
            .trips
            .iter_mut()
            .map(|t| &mut t.month)
            .chain(state.vehicle_expenses.iter_mut().map(|v| &mut v.month))
            .chain(state.savings.iter_mut().map(|s| &mut s.month))
            .chain(state.categorized_expenses.iter_mut().map(|c| &mut c.month));

        let mut count = 0;
        for month_ref in refs {
            if month_ref.month_id == Some(id) {
                month_ref.label = label;
                count += 1;
            }
        }
        count
    }
}

/// Position of the single record matching a reference
fn find_index<R: Record>(state: &AppState, reference: &str) -> FinanceResult<usize> {
    let mut matches = R::collection(state)
        .iter()
        .enumerate()
        .filter(|(_, r)| r.matches_ref(reference))
        .map(|(i, _)| i);

    match (matches.next(), matches.next()) {
        (Some(index), None) => Ok(index),
        (None, _) => Err(FinanceError::not_found(R::ENTITY, reference)),
        (Some(_), Some(_)) => Err(FinanceError::Validation(format!(
            "{} reference '{}' is ambiguous, use more characters",
            R::ENTITY,
            reference
        ))),
    }
}
