//! Vehicle expense model
//!
//! Fuel and maintenance spending for the car and the motorcycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::VehicleExpenseId;
use super::month::{MonthName, MonthRef};
use super::money::Money;

/// Which vehicle an expense is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Motorcycle,
}

impl VehicleType {
    /// Parse vehicle type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "car" | "carro" => Some(Self::Car),
            "motorcycle" | "moto" | "motorbike" => Some(Self::Motorcycle),
            _ => None,
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Car => write!(f, "Carro"),
            Self::Motorcycle => write!(f, "Moto"),
        }
    }
}

/// Kind of vehicle spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleCategory {
    Fuel,
    Maintenance,
}

impl VehicleCategory {
    /// Parse vehicle category from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fuel" | "combustível" | "combustivel" => Some(Self::Fuel),
            "maintenance" | "manutenção" | "manutencao" => Some(Self::Maintenance),
            _ => None,
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fuel => write!(f, "Combustível"),
            Self::Maintenance => write!(f, "Manutenção"),
        }
    }
}

/// A single vehicle expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleExpense {
    /// Unique identifier
    pub id: VehicleExpenseId,

    /// Car or motorcycle
    #[serde(rename = "type")]
    pub vehicle: VehicleType,

    /// Fuel or maintenance
    pub category: VehicleCategory,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Amount spent
    #[serde(default)]
    pub value: Money,

    /// Month the expense belongs to
    pub month: MonthRef,
}

impl VehicleExpense {
    /// Field names accepted by field-level updates
    pub const FIELDS: [&'static str; 5] = ["type", "category", "description", "value", "month"];

    /// Create a zero-value fuel expense for a vehicle in the current month
    pub fn new(vehicle: VehicleType) -> Self {
        let description = match vehicle {
            VehicleType::Car => "Novo Gasto Carro",
            VehicleType::Motorcycle => "Novo Gasto Moto",
        };
        Self {
            id: VehicleExpenseId::new(),
            vehicle,
            category: VehicleCategory::Fuel,
            description: description.to_string(),
            value: Money::zero(),
            month: MonthRef::unlinked(MonthName::current()),
        }
    }
}
