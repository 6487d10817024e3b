//! Savings transaction model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::SavingsId;
use super::month::{MonthName, MonthRef};
use super::money::Money;

/// Direction of a savings movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavingsKind {
    /// Money put into savings
    Deposit,
    /// Money taken out of savings
    Withdrawal,
    /// Interest or other yield earned
    Yield,
}

impl SavingsKind {
    /// Parse savings kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "deposit" | "entrada" | "in" => Some(Self::Deposit),
            "withdrawal" | "retirada" | "out" => Some(Self::Withdrawal),
            "yield" | "rendimento" | "interest" => Some(Self::Yield),
            _ => None,
        }
    }

    /// Default description for new transactions of this kind
    pub fn default_description(&self) -> &'static str {
        match self {
            Self::Deposit => "Depósito",
            Self::Withdrawal => "Retirada",
            Self::Yield => "Rendimento",
        }
    }
}

impl fmt::Display for SavingsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "entrada"),
            Self::Withdrawal => write!(f, "retirada"),
            Self::Yield => write!(f, "rendimento"),
        }
    }
}

/// A deposit, withdrawal or yield on the savings account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsTransaction {
    /// Unique identifier
    pub id: SavingsId,

    /// Direction of the movement
    #[serde(rename = "type")]
    pub kind: SavingsKind,

    /// Amount moved (always entered as a positive figure)
    #[serde(default)]
    pub value: Money,

    /// Month the movement belongs to
    pub month: MonthRef,

    /// Free-text description
    #[serde(default)]
    pub description: String,
}

impl SavingsTransaction {
    /// Field names accepted by field-level updates
    pub const FIELDS: [&'static str; 4] = ["type", "value", "month", "description"];

    /// Create a zero-value transaction in the current month
    pub fn new(kind: SavingsKind) -> Self {
        Self {
            id: SavingsId::new(),
            kind,
            value: Money::zero(),
            month: MonthRef::unlinked(MonthName::current()),
            description: kind.default_description().to_string(),
        }
    }

    /// Signed effect of this transaction on the savings balance
    pub fn signed_value(&self) -> Money {
        match self.kind {
            SavingsKind::Deposit | SavingsKind::Yield => self.value,
            SavingsKind::Withdrawal => -self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_value() {
        let mut tx = SavingsTransaction::new(SavingsKind::Withdrawal);
        tx.value = Money::from_cents(300);
        assert_eq!(tx.signed_value().cents(), -300);

        tx.kind = SavingsKind::Yield;
        assert_eq!(tx.signed_value().cents(), 300);
    }

    #[test]
    fn test_default_descriptions() {
        assert_eq!(SavingsTransaction::new(SavingsKind::Deposit).description, "Depósito");
        assert_eq!(SavingsKind::parse("rendimento"), Some(SavingsKind::Yield));
    }
}
