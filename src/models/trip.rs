//! Trip model
//!
//! Costs of one trip, split by kind of spending.

use serde::{Deserialize, Serialize};

use super::ids::TripId;
use super::month::{MonthName, MonthRef};
use super::money::Money;

/// Costs of a single trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// Unique identifier
    pub id: TripId,

    /// Where the trip went
    pub destination: String,

    /// Month the trip belongs to
    pub month: MonthRef,

    #[serde(default)]
    pub car_rental: Money,
    #[serde(default)]
    pub fuel: Money,
    #[serde(default)]
    pub food: Money,
    #[serde(default)]
    pub others: Money,
    #[serde(default)]
    pub credit_card: Money,
    #[serde(default)]
    pub pix: Money,
}

impl Trip {
    /// Field names accepted by field-level updates
    pub const FIELDS: [&'static str; 8] = [
        "destination",
        "month",
        "car_rental",
        "fuel",
        "food",
        "others",
        "credit_card",
        "pix",
    ];

    /// Create a trip with zero costs
    pub fn new(destination: impl Into<String>, month: MonthRef) -> Self {
        Self {
            id: TripId::new(),
            destination: destination.into(),
            month,
            car_rental: Money::zero(),
            fuel: Money::zero(),
            food: Money::zero(),
            others: Money::zero(),
            credit_card: Money::zero(),
            pix: Money::zero(),
        }
    }

    /// Every cost field paired with its name
    pub fn costs(&self) -> [(&'static str, Money); 6] {
        [
            ("car_rental", self.car_rental),
            ("fuel", self.fuel),
            ("food", self.food),
            ("others", self.others),
            ("credit_card", self.credit_card),
            ("pix", self.pix),
        ]
    }

    /// Set a cost field by name; returns false for unknown names
    pub fn set_cost(&mut self, field: &str, value: Money) -> bool {
        let slot = match field {
            "car_rental" => &mut self.car_rental,
            "fuel" => &mut self.fuel,
            "food" => &mut self.food,
            "others" => &mut self.others,
            "credit_card" => &mut self.credit_card,
            "pix" => &mut self.pix,
            _ => return false,
        };
        *slot = value;
        true
    }
}

impl Default for Trip {
    fn default() -> Self {
        Self::new("Nova Viagem", MonthRef::unlinked(MonthName::current()))
    }
}
