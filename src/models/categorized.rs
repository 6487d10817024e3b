//! Categorized variable expense model
//!
//! Variable spending tagged with a free-text category label.

use serde::{Deserialize, Serialize};

use super::ids::CategorizedExpenseId;
use super::month::MonthRef;
use super::money::Money;

/// Suggested category labels, in display order
pub const CATEGORIES: [&str; 9] = [
    "Alimentação",
    "Saúde",
    "Lazer",
    "Educação",
    "Transporte",
    "Vestuário",
    "Presentes",
    "Assinaturas",
    "Outros",
];

/// A variable expense with a category label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedExpense {
    /// Unique identifier
    pub id: CategorizedExpenseId,

    /// Category label (free text, see [`CATEGORIES`] for suggestions)
    pub category: String,

    /// Amount spent
    #[serde(default)]
    pub value: Money,

    /// Month the expense belongs to
    pub month: MonthRef,

    /// Free-text description
    #[serde(default)]
    pub description: String,
}

impl CategorizedExpense {
    /// Field names accepted by field-level updates
    pub const FIELDS: [&'static str; 4] = ["category", "value", "month", "description"];

    /// Create a zero-value expense in the first suggested category
    pub fn new(month: MonthRef) -> Self {
        Self {
            id: CategorizedExpenseId::new(),
            category: CATEGORIES[0].to_string(),
            value: Money::zero(),
            month,
            description: "Novo gasto".to_string(),
        }
    }
}
