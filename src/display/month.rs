//! Month record display formatting
//!
//! The month list and the per-month detail view.

use super::table::{format_table, Align};
use crate::models::{AppState, MonthRecord};
use crate::stats::{
    categorized_for_month, month_outflow, monthly_balance, next_month_salary, total_expenses,
    total_income,
};

/// Format the month records as a table
pub fn format_month_list(state: &AppState, symbol: &str) -> String {
    if state.months.is_empty() {
        return "Nenhum mês cadastrado.".to_string();
    }

    let rows: Vec<Option<Vec<String>>> = state
        .months
        .iter()
        .map(|month| {
            Some(vec![
                month.id.to_string(),
                month.month.to_string(),
                month.year.to_string(),
                month_outflow(month, &state.categorized_expenses).format_with_symbol(symbol),
                total_income(&month.income).format_with_symbol(symbol),
                monthly_balance(month, &state.categorized_expenses).format_with_symbol(symbol),
            ])
        })
        .collect();

    format_table(
        &[
            ("ID", Align::Left),
            ("Mês", Align::Left),
            ("Ano", Align::Left),
            ("Despesas", Align::Right),
            ("Receitas", Align::Right),
            ("Saldo", Align::Right),
        ],
        &rows,
    )
}

/// Format one month with every field and both balances
pub fn format_month_details(month: &MonthRecord, state: &AppState, symbol: &str) -> String {
    let fmt = |m: crate::models::Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str(&format!("{} {}  ({})\n\n", month.month, month.year, month.id));

    output.push_str("Gastos fixos\n");
    for (name, value) in month.expenses.fields() {
        output.push_str(&format!("  {:<14} {:>16}\n", name, fmt(value)));
    }
    output.push_str(&format!("  {:<14} {:>16}\n\n", "total", fmt(total_expenses(&month.expenses))));

    output.push_str("Receitas\n");
    for (name, value) in month.income.fields() {
        output.push_str(&format!("  {:<14} {:>16}\n", name, fmt(value)));
    }
    output.push_str(&format!("  {:<14} {:>16}\n\n", "total", fmt(total_income(&month.income))));

    let linked: Vec<_> = state.categorized_for(month).collect();
    if !linked.is_empty() {
        output.push_str("Gastos categorizados\n");
        for expense in &linked {
            output.push_str(&format!(
                "  {:<14} {:<20} {:>16}\n",
                expense.category,
                expense.description,
                fmt(expense.value)
            ));
        }
        output.push_str(&format!(
            "  {:<14} {:<20} {:>16}\n\n",
            "total",
            "",
            fmt(categorized_for_month(month, &state.categorized_expenses))
        ));
    }

    let outflow = month_outflow(month, &state.categorized_expenses);
    let next_salary = next_month_salary(month.month, &state.months);
    output.push_str(&format!(
        "Saldo do mês:                  {}\n",
        fmt(monthly_balance(month, &state.categorized_expenses))
    ));
    output.push_str(&format!(
        "Salário de {:<10}          {}\n",
        format!("{}:", month.month.succ()),
        fmt(next_salary)
    ));
    output.push_str(&format!(
        "Saldo contra próximo salário:  {}\n",
        fmt(next_salary - outflow)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategorizedExpense, MonthName, Money};

    #[test]
    fn test_empty_list() {
        assert_eq!(format_month_list(&AppState::default(), "R$"), "Nenhum mês cadastrado.");
    }

    #[test]
    fn test_details_show_both_balances() {
        let mut state = AppState::default();
        let mut jan = MonthRecord::new(MonthName::Janeiro, 2025);
        jan.expenses.inter = Money::from_cents(10000);
        jan.income.salario = Money::from_cents(100000);
        let mut feb = MonthRecord::new(MonthName::Fevereiro, 2025);
        feb.income.salario = Money::from_cents(300000);
        let mut gift = CategorizedExpense::new(jan.month_ref());
        gift.category = "Presentes".into();
        gift.value = Money::from_cents(5000);
        state.categorized_expenses.push(gift);
        state.months = vec![jan.clone(), feb];

        let details = format_month_details(&jan, &state, "R$");
        assert!(details.contains("Presentes"));
        assert!(details.contains("R$ 850,00"));
        assert!(details.contains("R$ 2.850,00"));

        let list = format_month_list(&state, "R$");
        assert!(list.contains("R$ 150,00"));
    }
}
