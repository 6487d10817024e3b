//! Consolidated financial report
//!
//! Builds the numbered sections of the report from the aggregation engine.
//! Every currency cell goes through `Money::format_with_symbol`, the same
//! formatter the terminal views use, so the exported document and the screen
//! always agree.

use std::io::Write;

use chrono::{DateTime, Local};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::chart::monthly_series;
use crate::config::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{AppState, Money};
use crate::stats::{category_totals, loan_amounts, trip_total, Stats};

/// Title printed at the top of the report
pub const REPORT_TITLE: &str = "Relatório Financeiro Consolidado";

/// One numbered table of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    /// Position in the report, starting at 1
    pub number: usize,
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    fn new(number: usize, title: &str, headers: &[&str]) -> Self {
        Self {
            number,
            title: title.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Section heading, e.g. `1. Resumo Executivo`
    pub fn heading(&self) -> String {
        format!("{}. {}", self.number, self.title)
    }

    /// Lay the table out as text lines in the given style
    pub fn render_lines(&self, style: TableStyle) -> Vec<String> {
        if self.rows.is_empty() {
            return vec!["(sem registros)".to_string()];
        }

        let mut builder = Builder::default();
        builder.push_record(self.headers.iter().cloned());
        for row in &self.rows {
            builder.push_record(row.iter().cloned());
        }

        let mut table = builder.build();
        match style {
            TableStyle::Document => table.with(Style::psql()),
            TableStyle::Terminal => table.with(Style::rounded()),
        };
        table.to_string().lines().map(str::to_string).collect()
    }
}

/// Border style of rendered tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Plain ASCII rules for the exported document
    Document,
    /// Rounded box-drawing borders for the terminal
    Terminal,
}

/// The complete report
#[derive(Debug, Clone)]
pub struct FinancialReport {
    pub generated_at: DateTime<Local>,
    pub stats: Stats,
    pub sections: Vec<ReportTable>,
}

impl FinancialReport {
    /// Build every section from a state snapshot
    ///
    /// With categorized expenses enabled and recorded the third section lists
    /// them; otherwise it is replaced by loan, vehicle and trip tables.
    pub fn generate(state: &AppState, settings: &Settings) -> Self {
        let stats = Stats::compute(state);
        let categorized = settings.categorized_expenses && !state.categorized_expenses.is_empty();
        let fmt = |m: Money| m.format_with_symbol(&settings.currency_symbol);

        let mut sections = Vec::new();

        let mut summary = ReportTable::new(1, "Resumo Executivo", &["Categoria", "Valor Total"]);
        summary.push(vec!["Patrimônio na Poupança".into(), fmt(stats.savings.total)]);
        summary.push(vec!["Saldo Devedor de Empréstimos".into(), fmt(stats.loans.remaining)]);
        if categorized {
            summary.push(vec!["Gastos Variáveis por Categoria".into(), fmt(stats.categorized)]);
        }
        summary.push(vec!["Investimento em Viagens".into(), fmt(stats.travel)]);
        summary.push(vec!["Gastos Totais com Veículos".into(), fmt(stats.vehicle.total())]);
        sections.push(summary);

        let mut monthly = ReportTable::new(
            2,
            "Controle Mensal Detalhado",
            &["Mês", "Ano", "Total Despesas", "Total Receitas", "Balanço"],
        );
        for point in monthly_series(state, settings.balance_mode) {
            monthly.push(vec![
                point.label.to_string(),
                point.year.to_string(),
                fmt(point.total_expenses),
                fmt(point.total_income),
                fmt(point.balance),
            ]);
        }
        sections.push(monthly);

        if categorized {
            let mut detail = ReportTable::new(
                3,
                "Gastos por Categoria",
                &["Categoria", "Mês", "Descrição", "Valor"],
            );
            for expense in &state.categorized_expenses {
                detail.push(vec![
                    expense.category.clone(),
                    expense.month.to_string(),
                    expense.description.clone(),
                    fmt(expense.value),
                ]);
            }
            sections.push(detail);

            let mut rollup = ReportTable::new(4, "Resumo por Categoria", &["Categoria", "Total"]);
            for (category, total) in category_totals(&state.categorized_expenses) {
                rollup.push(vec![category, fmt(total)]);
            }
            sections.push(rollup);
        } else {
            let mut loans = ReportTable::new(
                3,
                "Empréstimos",
                &[
                    "Descrição",
                    "Parcelas",
                    "Pagas",
                    "Valor Parcela",
                    "Valor Contratado",
                    "Pago",
                    "Restante",
                ],
            );
            for loan in &state.loans {
                let amounts = loan_amounts(loan);
                loans.push(vec![
                    loan.description.clone(),
                    loan.installments.to_string(),
                    loan.paid_installments.to_string(),
                    fmt(loan.installment_value),
                    fmt(loan.total_value),
                    fmt(amounts.paid),
                    fmt(amounts.remaining),
                ]);
            }
            sections.push(loans);

            let mut vehicles = ReportTable::new(
                4,
                "Veículos",
                &["Veículo", "Categoria", "Mês", "Descrição", "Valor"],
            );
            for expense in &state.vehicle_expenses {
                vehicles.push(vec![
                    expense.vehicle.to_string(),
                    expense.category.to_string(),
                    expense.month.to_string(),
                    expense.description.clone(),
                    fmt(expense.value),
                ]);
            }
            sections.push(vehicles);

            let mut trips = ReportTable::new(5, "Viagens", &["Destino", "Mês", "Total"]);
            for trip in &state.trips {
                trips.push(vec![
                    trip.destination.clone(),
                    trip.month.to_string(),
                    fmt(trip_total(trip)),
                ]);
            }
            sections.push(trips);
        }

        Self {
            generated_at: Local::now(),
            stats,
            sections,
        }
    }

    /// Find a section by title
    pub fn section(&self, title: &str) -> Option<&ReportTable> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str(REPORT_TITLE);
        output.push('\n');
        output.push_str(&"=".repeat(REPORT_TITLE.chars().count()));
        output.push('\n');

        for section in &self.sections {
            output.push('\n');
            output.push_str(&section.heading());
            output.push('\n');
            for line in section.render_lines(TableStyle::Terminal) {
                output.push_str(&line);
                output.push('\n');
            }
        }
        output
    }

    /// Export the report to CSV format
    ///
    /// Every row starts with its section title; each section opens with a
    /// header row whose first cell is `section`.
    pub fn export_csv<W: Write>(&self, writer: W) -> FinanceResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(writer);

        for section in &self.sections {
            let header = std::iter::once("section".to_string()).chain(section.headers.iter().cloned());
            csv_writer
                .write_record(header)
                .map_err(|e| FinanceError::Export(e.to_string()))?;

            for row in &section.rows {
                let record = std::iter::once(section.title.clone()).chain(row.iter().cloned());
                csv_writer
                    .write_record(record)
                    .map_err(|e| FinanceError::Export(e.to_string()))?;
            }
        }

        csv_writer
            .flush()
            .map_err(|e| FinanceError::Export(e.to_string()))?;
        Ok(())
    }
}
