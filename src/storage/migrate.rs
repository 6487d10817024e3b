//! Schema versioning of the persisted blob
//!
//! Current blobs carry `schema_version`. Blobs without it come from the
//! unversioned store: camelCase keys, amounts as floating-point reais,
//! free-form string ids and bare month labels. Those are converted
//! deterministically, so migrating the same legacy blob twice yields the
//! same ids and the same state.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    parse_count_or_zero, AppState, CategorizedExpense, CategorizedExpenseId, FixedExpenses, Loan,
    LoanId, MonthId, MonthName, MonthRecord, MonthlyIncome, Money, SavingsId, SavingsKind,
    SavingsTransaction, Trip, TripId, VehicleCategory, VehicleExpense, VehicleExpenseId,
    VehicleType,
};

/// Schema version written by this build
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// On-disk layout of the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredBlob {
    pub schema_version: u32,
    #[serde(flatten)]
    pub state: AppState,
}

impl StoredBlob {
    pub fn current(state: AppState) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            state,
        }
    }
}

/// Decode a blob of any supported version into the current state
pub fn decode(value: Value) -> FinanceResult<AppState> {
    let version = match value.as_object() {
        Some(object) => object.get("schema_version").cloned(),
        None => return Err(FinanceError::Storage("Store is not a JSON object".into())),
    };

    match version {
        Some(version) => {
            let version = version.as_u64().ok_or_else(|| {
                FinanceError::Storage(format!("Invalid schema_version: {}", version))
            })?;
            if version > u64::from(CURRENT_SCHEMA_VERSION) {
                return Err(FinanceError::Storage(format!(
                    "Store schema version {} is newer than supported version {}",
                    version, CURRENT_SCHEMA_VERSION
                )));
            }
            let blob: StoredBlob = serde_json::from_value(value)?;
            Ok(blob.state)
        }
        None => {
            debug!("migrating unversioned store");
            let empty = Map::new();
            Ok(migrate_legacy(value.as_object().unwrap_or(&empty)))
        }
    }
}

/// Whether a JSON value looks like an unversioned store
pub fn is_legacy(value: &Value) -> bool {
    value.as_object().is_some_and(|o| {
        !o.contains_key("schema_version")
            && ["months", "loans", "trips", "vehicleExpenses", "savings", "categorizedExpenses"]
                .iter()
                .any(|key| o.contains_key(*key))
    })
}

/// Convert an unversioned store
///
/// Never fails: missing or malformed fields fall back to their defaults.
pub fn migrate_legacy(object: &Map<String, Value>) -> AppState {
    let mut state = AppState::default();

    state.months = items(object, "months")
        .map(|(i, item)| migrate_month(i, item))
        .collect();

    let loans: Vec<Loan> = items(object, "loans")
        .map(|(i, item)| Loan {
            id: LoanId::from_legacy(&legacy_key(item, "loans", i)),
            description: text(item, "description"),
            total_value: amount(item.get("totalValue")),
            installments: count(item.get("installments")),
            paid_installments: count(item.get("paidInstallments")),
            installment_value: amount(item.get("installmentValue")),
            interest_monthly: rate(item.get("interestMonthly")),
        })
        .collect();
    state.loans = loans;

    let trips: Vec<Trip> = items(object, "trips")
        .map(|(i, item)| Trip {
            id: TripId::from_legacy(&legacy_key(item, "trips", i)),
            destination: text(item, "destination"),
            month: state.month_ref_for(month_label(item)),
            car_rental: amount(item.get("carRental")),
            fuel: amount(item.get("fuel")),
            food: amount(item.get("food")),
            others: amount(item.get("others")),
            credit_card: amount(item.get("creditCard")),
            pix: amount(item.get("pix")),
        })
        .collect();
    state.trips = trips;

    let vehicle_expenses: Vec<VehicleExpense> = items(object, "vehicleExpenses")
        .map(|(i, item)| VehicleExpense {
            id: VehicleExpenseId::from_legacy(&legacy_key(item, "vehicleExpenses", i)),
            vehicle: item
                .get("type")
                .and_then(Value::as_str)
                .and_then(VehicleType::parse)
                .unwrap_or(VehicleType::Car),
            category: item
                .get("category")
                .and_then(Value::as_str)
                .and_then(VehicleCategory::parse)
                .unwrap_or(VehicleCategory::Fuel),
            description: text(item, "description"),
            value: amount(item.get("value")),
            month: state.month_ref_for(month_label(item)),
        })
        .collect();
    state.vehicle_expenses = vehicle_expenses;

    let savings: Vec<SavingsTransaction> = items(object, "savings")
        .map(|(i, item)| SavingsTransaction {
            id: SavingsId::from_legacy(&legacy_key(item, "savings", i)),
            kind: item
                .get("type")
                .and_then(Value::as_str)
                .and_then(SavingsKind::parse)
                .unwrap_or(SavingsKind::Deposit),
            value: amount(item.get("value")),
            month: state.month_ref_for(month_label(item)),
            description: text(item, "description"),
        })
        .collect();
    state.savings = savings;

    let categorized: Vec<CategorizedExpense> = items(object, "categorizedExpenses")
        .map(|(i, item)| CategorizedExpense {
            id: CategorizedExpenseId::from_legacy(&legacy_key(item, "categorizedExpenses", i)),
            category: text(item, "category"),
            value: amount(item.get("value")),
            month: state.month_ref_for(month_label(item)),
            description: text(item, "description"),
        })
        .collect();
    state.categorized_expenses = categorized;

    state
}

fn migrate_month(index: usize, item: &Map<String, Value>) -> MonthRecord {
    let empty = Map::new();
    let expenses = item.get("expenses").and_then(Value::as_object).unwrap_or(&empty);
    let income = item.get("income").and_then(Value::as_object).unwrap_or(&empty);

    MonthRecord {
        id: MonthId::from_legacy(&legacy_key(item, "months", index)),
        month: month_label(item),
        year: year(item.get("year")),
        expenses: FixedExpenses {
            inter: amount(expenses.get("inter")),
            nubank: amount(expenses.get("nubank")),
            m_pago: amount(expenses.get("mPago")),
            agua: amount(expenses.get("agua")),
            energia: amount(expenses.get("energia")),
            outros: amount(expenses.get("outros")),
            pix: amount(expenses.get("pix")),
        },
        income: MonthlyIncome {
            salario: amount(income.get("salario")),
            bonus: amount(income.get("bonus")),
            outros: amount(income.get("outros")),
            recarga_pay: amount(income.get("recargaPay")),
        },
    }
}

/// Objects of a collection with their positions; non-objects are skipped
fn items<'a>(
    object: &'a Map<String, Value>,
    key: &str,
) -> impl Iterator<Item = (usize, &'a Map<String, Value>)> + 'a {
    object
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .enumerate()
        .filter_map(|(i, v)| v.as_object().map(|o| (i, o)))
}

/// Stable key for id derivation: the legacy id, or collection and position
fn legacy_key(item: &Map<String, Value>, collection: &str, index: usize) -> String {
    match item.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => format!("{}#{}", collection, index),
    }
}

fn text(item: &Map<String, Value>, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn month_label(item: &Map<String, Value>) -> MonthName {
    let raw = item.get("month").and_then(Value::as_str).unwrap_or_default();
    MonthName::parse(raw).unwrap_or_else(|| {
        warn!(label = raw, "unknown month label in legacy store, using Janeiro");
        MonthName::Janeiro
    })
}

/// Legacy amount: number of reais, numeric string, anything else is zero
pub(crate) fn amount(value: Option<&Value>) -> Money {
    match value {
        Some(Value::Number(n)) => n.as_f64().map(Money::from_f64).unwrap_or_default(),
        Some(Value::String(s)) => Money::parse_or_zero(s),
        _ => Money::zero(),
    }
}

fn count(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(n)) => parse_count_or_zero(&n.to_string()),
        Some(Value::String(s)) => parse_count_or_zero(s),
        _ => 0,
    }
}

fn rate(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
}

fn year(value: Option<&Value>) -> i32 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.unwrap_or_else(|| chrono::Local::now().year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn legacy_blob() -> Value {
        json!({
            "months": [
                {
                    "id": "k3j2h4g5f",
                    "month": "Março",
                    "year": 2024,
                    "expenses": {"inter": 100.5, "nubank": "50", "mPago": null, "agua": 0,
                                 "energia": 80.25, "outros": "abc", "pix": 10},
                    "income": {"salario": 3000, "bonus": 0, "outros": 0, "recargaPay": 12.3}
                }
            ],
            "loans": [
                {"id": "l1", "description": "Carro", "totalValue": 20000, "installments": 24,
                 "paidInstallments": 6, "installmentValue": 950.9, "interestMonthly": 1.2}
            ],
            "trips": [
                {"destination": "Natal", "month": "Março", "carRental": 300, "fuel": 120,
                 "food": 200, "others": 0, "creditCard": 0, "pix": 50}
            ],
            "vehicleExpenses": [
                {"id": "v1", "type": "Moto", "category": "Manutenção", "description": "Pneu",
                 "value": 250, "month": "Abril"}
            ],
            "savings": [
                {"id": "s1", "type": "rendimento", "value": 15.75, "month": "Março",
                 "description": "CDB"}
            ],
            "categorizedExpenses": [
                {"id": "c1", "category": "Lazer", "value": 80, "month": "Marco",
                 "description": "Cinema"}
            ]
        })
    }

    #[test]
    fn test_legacy_blob_is_detected() {
        assert!(is_legacy(&legacy_blob()));
        assert!(!is_legacy(&json!({"schema_version": 1, "months": []})));
        assert!(!is_legacy(&json!({"name": "something else"})));
    }

    #[test]
    fn test_migrate_legacy_amounts_and_links() {
        let state = decode(legacy_blob()).unwrap();

        let month = &state.months[0];
        assert_eq!(month.month, MonthName::Marco);
        assert_eq!(month.year, 2024);
        assert_eq!(month.expenses.inter.cents(), 10050);
        assert_eq!(month.expenses.nubank.cents(), 5000);
        assert!(month.expenses.m_pago.is_zero());
        assert!(month.expenses.outros.is_zero());
        assert_eq!(month.income.recarga_pay.cents(), 1230);

        let loan = &state.loans[0];
        assert_eq!(loan.installments, 24);
        assert_eq!(loan.paid_installments, 6);
        assert_eq!(loan.installment_value.cents(), 95090);

        // Dependents with a matching label are linked by id
        assert_eq!(state.trips[0].month.month_id, Some(month.id));
        assert_eq!(state.categorized_expenses[0].month.month_id, Some(month.id));
        // Abril has no month record
        assert_eq!(state.vehicle_expenses[0].month.month_id, None);
        assert_eq!(state.vehicle_expenses[0].vehicle, VehicleType::Motorcycle);
        assert_eq!(state.vehicle_expenses[0].category, VehicleCategory::Maintenance);
        assert_eq!(state.savings[0].kind, SavingsKind::Yield);
    }

    #[test]
    fn test_migration_is_deterministic() {
        assert_eq!(decode(legacy_blob()).unwrap(), decode(legacy_blob()).unwrap());
    }

    #[test]
    fn test_unknown_month_falls_back() {
        let state = decode(json!({"months": [{"month": "Smarch", "year": "2023"}]})).unwrap();
        assert_eq!(state.months[0].month, MonthName::Janeiro);
        assert_eq!(state.months[0].year, 2023);
    }

    #[test]
    fn test_current_blob_roundtrip() {
        let mut state = AppState::default();
        state.loans.push(Loan::default());
        let value = serde_json::to_value(StoredBlob::current(state.clone())).unwrap();
        assert_eq!(value["schema_version"], 1);
        assert_eq!(decode(value).unwrap(), state);
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let err = decode(json!({"schema_version": 99})).unwrap_err();
        assert!(matches!(err, FinanceError::Storage(_)));
        assert!(decode(json!([1, 2, 3])).is_err());
    }
}
