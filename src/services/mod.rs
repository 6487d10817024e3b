//! Service layer for finmaster
//!
//! The service layer holds the operations that change the record store:
//! record editing and file imports.

pub mod import;
pub mod records;

pub use import::{parse_spreadsheet, parse_workbook, read_spreadsheet, ImportService};
pub use records::RecordService;
