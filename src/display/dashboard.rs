//! Dashboard overview
//!
//! Top-line figures followed by both charts.

use super::report::{double_separator, format_header, separator};
use crate::chart::{category_series, monthly_series, render_categories, render_monthly};
use crate::config::Settings;
use crate::models::AppState;
use crate::stats::Stats;

const WIDTH: usize = 64;

/// Format the dashboard for a state
pub fn format_dashboard(state: &AppState, settings: &Settings) -> String {
    let stats = Stats::compute(state);
    let fmt = |m: crate::models::Money| m.format_with_symbol(&settings.currency_symbol);

    let mut output = String::new();
    output.push_str(&format_header("finmaster", WIDTH));
    output.push('\n');
    output.push_str(&double_separator(WIDTH));
    output.push('\n');

    let mut figures = vec![
        ("Patrimônio na poupança", fmt(stats.savings.total)),
        ("Rendimentos", fmt(stats.savings.earnings)),
        ("Saldo devedor de empréstimos", fmt(stats.loans.remaining)),
        ("Investimento em viagens", fmt(stats.travel)),
        ("Gastos com veículos", fmt(stats.vehicle.total())),
    ];
    if settings.categorized_expenses {
        figures.push(("Gastos categorizados", fmt(stats.categorized)));
    }
    for (label, value) in figures {
        output.push_str(&format!("{:<32}{:>20}\n", label, value));
    }

    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str("Controle mensal\n");
    output.push_str(&render_monthly(&monthly_series(state, settings.balance_mode)));

    if settings.categorized_expenses {
        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str("Gastos por categoria\n");
        output.push_str(&render_categories(&category_series(&state.categorized_expenses)));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dashboard_shows_zeroes() {
        let output = format_dashboard(&AppState::default(), &Settings::default());
        assert!(output.contains("Patrimônio na poupança"));
        assert!(output.contains("R$ 0,00"));
        assert!(output.contains("Nenhum mês cadastrado"));
        assert!(output.contains("Nenhum gasto categorizado"));
    }

    #[test]
    fn test_categorized_section_follows_setting() {
        let settings = Settings {
            categorized_expenses: false,
            ..Settings::default()
        };
        let output = format_dashboard(&AppState::default(), &settings);
        assert!(!output.contains("Gastos por categoria"));
        assert!(!output.contains("Gastos categorizados"));
    }
}
