//! Configuration module for finmaster
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence
//! - Feature and balance preferences

pub mod paths;
pub mod settings;

pub use paths::FinancePaths;
pub use settings::{BalanceMode, Settings};
