//! Chart feed builder
//!
//! Turns the record collections into series for the monthly and the
//! per-category charts. The series carry plain amounts; rendering them is the
//! job of the terminal renderer in this module or of any external tool fed
//! with `--json`.

use serde::Serialize;

use crate::config::BalanceMode;
use crate::display::report::{format_bar, format_percentage, truncate};
use crate::models::{AppState, CategorizedExpense, Money, MonthName};
use crate::stats::{category_totals, month_outflow, next_month_salary, total_income};

/// Color for categories outside the built-in palette
pub const FALLBACK_COLOR: &str = "#6366f1";

const PALETTE: [(&str, &str); 9] = [
    ("Alimentação", "#fb923c"),
    ("Saúde", "#f87171"),
    ("Lazer", "#c084fc"),
    ("Educação", "#60a5fa"),
    ("Transporte", "#4ade80"),
    ("Vestuário", "#f472b6"),
    ("Presentes", "#fbbf24"),
    ("Assinaturas", "#2dd4bf"),
    ("Outros", "#94a3b8"),
];

/// Display color of a category label
pub fn category_color(category: &str) -> &'static str {
    PALETTE
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

/// One month in the monthly chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub label: MonthName,
    pub year: i32,
    pub total_expenses: Money,
    pub total_income: Money,
    pub balance: Money,
}

/// One slice of the per-category chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPoint {
    pub category: String,
    pub value: Money,
    pub color: &'static str,
}

/// One point per month record, in insertion order
///
/// Expenses include the categorized expenses belonging to each month. The
/// balance is income minus expenses, or next month's salary minus expenses
/// under [`BalanceMode::NextMonthSalary`].
pub fn monthly_series(state: &AppState, mode: BalanceMode) -> Vec<MonthlyPoint> {
    state
        .months
        .iter()
        .map(|month| {
            let expenses = month_outflow(month, &state.categorized_expenses);
            let income = total_income(&month.income);
            let reference = match mode {
                BalanceMode::Income => income,
                BalanceMode::NextMonthSalary => next_month_salary(month.month, &state.months),
            };
            MonthlyPoint {
                label: month.month,
                year: month.year,
                total_expenses: expenses,
                total_income: income,
                balance: reference - expenses,
            }
        })
        .collect()
}

/// One point per distinct category, in first-seen order
pub fn category_series(expenses: &[CategorizedExpense]) -> Vec<CategoryPoint> {
    category_totals(expenses)
        .into_iter()
        .map(|(category, value)| CategoryPoint {
            color: category_color(&category),
            category,
            value,
        })
        .collect()
}

/// JSON rendering of a series for external chart tools
///
/// Amounts are emitted as decimal numbers of whole units.
pub fn series_json<T: Serialize>(series: &[T]) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(series)?;
    cents_to_units(&mut value);
    serde_json::to_string_pretty(&value)
}

fn cents_to_units(value: &mut serde_json::Value) {
    const AMOUNT_KEYS: [&str; 4] = ["total_expenses", "total_income", "balance", "value"];
    if let Some(items) = value.as_array_mut() {
        for item in items.iter_mut().filter_map(|i| i.as_object_mut()) {
            for key in AMOUNT_KEYS {
                if let Some(cents) = item.get(key).and_then(|v| v.as_i64()) {
                    item.insert(key.to_string(), serde_json::json!(Money::from_cents(cents).as_f64()));
                }
            }
        }
    }
}

const BAR_WIDTH: usize = 30;
const LABEL_WIDTH: usize = 16;

/// Terminal rendering of the monthly chart
pub fn render_monthly(series: &[MonthlyPoint]) -> String {
    if series.is_empty() {
        return "Nenhum mês cadastrado. Use `finmaster month add` para começar.\n".to_string();
    }

    let max = series
        .iter()
        .flat_map(|p| [p.total_expenses.as_f64(), p.total_income.as_f64()])
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    for point in series {
        let label = format!("{} {}", point.label, point.year);
        out.push_str(&format!(
            "{:<width$} receitas {} {}\n",
            label,
            format_bar(point.total_income.as_f64(), max, BAR_WIDTH),
            point.total_income,
            width = LABEL_WIDTH
        ));
        out.push_str(&format!(
            "{:<width$} gastos   {} {}\n",
            "",
            format_bar(point.total_expenses.as_f64(), max, BAR_WIDTH),
            point.total_expenses,
            width = LABEL_WIDTH
        ));
        out.push_str(&format!(
            "{:<width$} saldo    {}\n",
            "",
            point.balance,
            width = LABEL_WIDTH
        ));
    }
    out
}

/// Terminal rendering of the per-category chart
pub fn render_categories(series: &[CategoryPoint]) -> String {
    if series.is_empty() {
        return "Nenhum gasto categorizado registrado.\n".to_string();
    }

    let total: f64 = series.iter().map(|p| p.value.as_f64()).sum();
    let max = series.iter().map(|p| p.value.as_f64()).fold(0.0_f64, f64::max);

    let mut out = String::new();
    for point in series {
        let share = if total > 0.0 {
            point.value.as_f64() / total * 100.0
        } else {
            0.0
        };
        out.push_str(&format!(
            "{:<width$} {} {:>14} {:>6} {}\n",
            truncate(&point.category, LABEL_WIDTH),
            format_bar(point.value.as_f64(), max, BAR_WIDTH),
            point.value.to_string(),
            format_percentage(share),
            point.color,
            width = LABEL_WIDTH
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonthRecord, MonthRef};

    fn sample_state() -> AppState {
        let mut state = AppState::default();
        let mut jan = MonthRecord::new(MonthName::Janeiro, 2025);
        jan.expenses.inter = Money::from_cents(10000);
        jan.expenses.nubank = Money::from_cents(5000);
        jan.income.salario = Money::from_cents(100000);
        let mut feb = MonthRecord::new(MonthName::Fevereiro, 2025);
        feb.income.salario = Money::from_cents(200000);

        let mut food = CategorizedExpense::new(jan.month_ref());
        food.value = Money::from_cents(2500);
        state.categorized_expenses.push(food);
        state.months = vec![jan, feb];
        state
    }

    #[test]
    fn test_empty_state_has_empty_series() {
        let state = AppState::default();
        assert!(monthly_series(&state, BalanceMode::Income).is_empty());
        assert!(category_series(&state.categorized_expenses).is_empty());
        assert!(render_monthly(&[]).contains("Nenhum mês"));
        assert!(render_categories(&[]).contains("Nenhum gasto"));
    }

    #[test]
    fn test_monthly_series_income_mode() {
        let series = monthly_series(&sample_state(), BalanceMode::Income);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, MonthName::Janeiro);
        assert_eq!(series[0].total_expenses.cents(), 17500);
        assert_eq!(series[0].total_income.cents(), 100000);
        assert_eq!(series[0].balance.cents(), 82500);
    }

    #[test]
    fn test_monthly_series_next_salary_mode() {
        let series = monthly_series(&sample_state(), BalanceMode::NextMonthSalary);
        assert_eq!(series[0].balance.cents(), 200000 - 17500);
        // No Março record, so February is measured against zero
        assert_eq!(series[1].balance.cents(), 0);
    }

    #[test]
    fn test_category_series_colors() {
        let jan = MonthRef::unlinked(MonthName::Janeiro);
        let mut gym = CategorizedExpense::new(jan);
        gym.category = "Academia".to_string();
        gym.value = Money::from_cents(100);
        let mut food = CategorizedExpense::new(jan);
        food.value = Money::from_cents(300);

        let series = category_series(&[gym, food]);
        assert_eq!(series[0].color, FALLBACK_COLOR);
        assert_eq!(series[1].category, "Alimentação");
        assert_eq!(series[1].color, "#fb923c");
    }

    #[test]
    fn test_series_json_uses_units() {
        let series = monthly_series(&sample_state(), BalanceMode::Income);
        let json = series_json(&series).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["total_expenses"], serde_json::json!(175.0));
        assert_eq!(value[0]["label"], "Janeiro");
    }
}
