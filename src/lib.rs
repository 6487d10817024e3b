//! finmaster - Terminal-based personal finance tracker
//!
//! This library provides the core functionality for the finmaster
//! application: a local record store of monthly fixed expenses and income,
//! loans, trips, vehicle costs, savings movements and categorized expenses,
//! with the aggregations, charts and reports derived from it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Record types and the in-memory store
//! - `stats`: Aggregation engine
//! - `chart`: Chart series and their terminal rendering
//! - `reports`: Consolidated financial report
//! - `storage`: JSON blob persistence and legacy migration
//! - `export`: Backup export and import
//! - `services`: Record editing and file imports
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use finmaster::config::{FinancePaths, Settings};
//! use finmaster::storage::Storage;
//! use finmaster::stats::Stats;
//!
//! let paths = FinancePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! let stats = Stats::compute(storage.state());
//! ```

pub mod chart;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod stats;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
