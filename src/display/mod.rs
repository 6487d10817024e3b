//! Display formatting for terminal output
//!
//! Provides utilities for formatting the records and the overview for
//! terminal display.

pub mod dashboard;
pub mod month;
pub mod records;
pub mod report;
pub mod table;

pub use dashboard::format_dashboard;
pub use month::{format_month_details, format_month_list};
pub use records::{
    format_categorized_list, format_loan_list, format_savings_list, format_trip_list,
    format_vehicle_list,
};
pub use table::{format_table, Align};
