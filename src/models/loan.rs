//! Loan model
//!
//! A loan paid back in fixed installments.

use serde::{Deserialize, Serialize};

use super::ids::LoanId;
use super::money::Money;

/// A loan repaid in equal installments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    /// Unique identifier
    pub id: LoanId,

    /// What the loan was for
    pub description: String,

    /// Contracted total (informational, not used by the installment math)
    #[serde(default)]
    pub total_value: Money,

    /// Number of installments
    #[serde(default)]
    pub installments: u32,

    /// Installments already paid
    #[serde(default)]
    pub paid_installments: u32,

    /// Value of each installment
    #[serde(default)]
    pub installment_value: Money,

    /// Monthly interest rate in percent (informational)
    #[serde(default)]
    pub interest_monthly: f64,
}

impl Loan {
    /// Field names accepted by field-level updates
    pub const FIELDS: [&'static str; 6] = [
        "description",
        "total_value",
        "installments",
        "paid_installments",
        "installment_value",
        "interest_monthly",
    ];

    /// Create a new loan with a single unpaid installment
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: LoanId::new(),
            description: description.into(),
            total_value: Money::zero(),
            installments: 1,
            paid_installments: 0,
            installment_value: Money::zero(),
            interest_monthly: 0.0,
        }
    }

    /// Installments still open (negative when more were paid than contracted)
    pub fn open_installments(&self) -> i64 {
        i64::from(self.installments) - i64::from(self.paid_installments)
    }

    /// Sum of all installments
    pub fn installment_total(&self) -> Money {
        self.installment_value.times(i64::from(self.installments))
    }
}

impl Default for Loan {
    fn default() -> Self {
        Self::new("Novo Empréstimo")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_loan_defaults() {
        let loan = Loan::default();
        assert_eq!(loan.description, "Novo Empréstimo");
        assert_eq!(loan.installments, 1);
        assert_eq!(loan.paid_installments, 0);
        assert!(loan.installment_value.is_zero());
    }

    #[test]
    fn test_open_installments_can_go_negative() {
        let mut loan = Loan::new("Carro");
        loan.installments = 10;
        loan.paid_installments = 12;
        assert_eq!(loan.open_installments(), -2);
    }

    #[test]
    fn test_installment_total() {
        let mut loan = Loan::new("Notebook");
        loan.installments = 12;
        loan.installment_value = Money::from_cents(25000);
        assert_eq!(loan.installment_total().cents(), 300000);
    }
}
