//! Paginated text rendering of the report
//!
//! Lays the report sections out on fixed-height pages, breaking before a
//! section heading that would otherwise sit alone at the bottom of a page,
//! and stamps a `Página i de N` footer on every page. Pages are separated by
//! a form feed.

use super::financial::{FinancialReport, TableStyle, REPORT_TITLE};
use crate::display::report::{double_separator, format_header};

/// Default file name of the exported report
pub const DEFAULT_REPORT_FILE: &str = "relatorio_financeiro_completo.txt";

const APP_NAME: &str = "FinanceMaster";
const PAGE_WIDTH: usize = 80;
const FOOTER_LINES: usize = 2;
/// Lines of a section that must fit under its heading
const KEEP_WITH_HEADING: usize = 5;

struct Paginator {
    height: usize,
    pages: Vec<Vec<String>>,
}

impl Paginator {
    fn new(height: usize) -> Self {
        Self {
            height,
            pages: vec![Vec::new()],
        }
    }

    fn current(&mut self) -> &mut Vec<String> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn break_page(&mut self) {
        self.pages.push(Vec::new());
    }

    /// Append a block, starting a new page first when its leading
    /// `keep_together` lines would not fit on the current one
    fn push_block(&mut self, lines: Vec<String>, keep_together: usize) {
        let height = self.height;
        let needed = keep_together.min(lines.len());
        let used = self.current().len();
        if used > 0 && used + needed > height {
            self.break_page();
        }

        for line in lines {
            if self.current().len() >= height {
                self.break_page();
            }
            self.current().push(line);
        }
    }

    fn finish(self) -> String {
        let total = self.pages.len();
        let mut out = String::new();
        for (i, mut page) in self.pages.into_iter().enumerate() {
            if i > 0 {
                out.push('\u{c}');
            }
            page.resize(self.height, String::new());
            page.push(String::new());
            page.push(format_header(&format!("Página {} de {}", i + 1, total), PAGE_WIDTH));
            for line in page {
                out.push_str(line.trim_end());
                out.push('\n');
            }
        }
        out
    }
}

/// Render the report as a paginated text document
///
/// `lines_per_page` includes the footer; very small values are raised to
/// fit at least a section heading and a few rows.
pub fn render_document(report: &FinancialReport, lines_per_page: usize) -> String {
    let height = lines_per_page
        .saturating_sub(FOOTER_LINES)
        .max(KEEP_WITH_HEADING + 1);
    let mut pages = Paginator::new(height);

    let generated = format!("Gerado em: {}", report.generated_at.format("%d/%m/%Y %H:%M:%S"));
    pages.push_block(
        vec![
            double_separator(PAGE_WIDTH),
            format_header(REPORT_TITLE, PAGE_WIDTH),
            format!(
                "{}{:>width$}",
                generated,
                APP_NAME,
                width = PAGE_WIDTH.saturating_sub(generated.chars().count())
            ),
            double_separator(PAGE_WIDTH),
            String::new(),
        ],
        5,
    );

    for section in &report.sections {
        let mut block = vec![section.heading(), String::new()];
        block.extend(section.render_lines(TableStyle::Document));
        block.push(String::new());
        pages.push_block(block, KEEP_WITH_HEADING);
    }

    pages.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{AppState, CategorizedExpense, MonthName, MonthRef, Money};

    fn page_count(document: &str) -> usize {
        document.split('\u{c}').count()
    }

    #[test]
    fn test_empty_report_is_one_page() {
        let report = FinancialReport::generate(&AppState::default(), &Settings::default());
        let document = render_document(&report, 56);

        assert_eq!(page_count(&document), 1);
        assert!(document.contains("Página 1 de 1"));
        assert!(document.contains("1. Resumo Executivo"));
        assert!(document.contains("R$ 0,00"));
        assert_eq!(document.lines().count(), 56);
    }

    #[test]
    fn test_long_report_paginates_with_footers() {
        let mut state = AppState::default();
        for i in 0..60 {
            let mut expense = CategorizedExpense::new(MonthRef::unlinked(MonthName::Maio));
            expense.description = format!("Gasto {}", i);
            expense.value = Money::from_cents(100 * i);
            state.categorized_expenses.push(expense);
        }

        let report = FinancialReport::generate(&state, &Settings::default());
        let document = render_document(&report, 30);
        let pages = page_count(&document);

        assert!(pages > 2);
        for (i, page) in document.split('\u{c}').enumerate() {
            assert!(page.contains(&format!("Página {} de {}", i + 1, pages)));
            assert_eq!(page.lines().count(), 30);
        }
    }

    #[test]
    fn test_heading_not_orphaned() {
        let mut paginator = Paginator::new(8);
        paginator.push_block((0..6).map(|i| format!("line {}", i)).collect(), 1);
        paginator.push_block(
            vec!["2. Heading".into(), "".into(), "a".into(), "b".into()],
            KEEP_WITH_HEADING,
        );
        assert_eq!(paginator.pages.len(), 2);
        assert_eq!(paginator.pages[1][0], "2. Heading");
    }
}
