//! Report builder
//!
//! Assembles the consolidated financial report from the aggregation engine
//! and renders it for the terminal, as a paginated document, or as CSV.

pub mod document;
pub mod financial;

pub use document::{render_document, DEFAULT_REPORT_FILE};
pub use financial::{FinancialReport, ReportTable, TableStyle};
