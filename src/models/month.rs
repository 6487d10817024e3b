//! Monthly fixed-expense and income records
//!
//! A `MonthRecord` holds the fixed bills and the income of one calendar month.
//! Other records point at the month they belong to through a [`MonthRef`].

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::MonthId;
use super::money::Money;

/// One of the twelve canonical month labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MonthName {
    Janeiro,
    Fevereiro,
    #[serde(rename = "Março")]
    Marco,
    Abril,
    Maio,
    Junho,
    Julho,
    Agosto,
    Setembro,
    Outubro,
    Novembro,
    Dezembro,
}

impl MonthName {
    /// All months in calendar order
    pub const ALL: [MonthName; 12] = [
        Self::Janeiro,
        Self::Fevereiro,
        Self::Marco,
        Self::Abril,
        Self::Maio,
        Self::Junho,
        Self::Julho,
        Self::Agosto,
        Self::Setembro,
        Self::Outubro,
        Self::Novembro,
        Self::Dezembro,
    ];

    /// Canonical display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Janeiro => "Janeiro",
            Self::Fevereiro => "Fevereiro",
            Self::Marco => "Março",
            Self::Abril => "Abril",
            Self::Maio => "Maio",
            Self::Junho => "Junho",
            Self::Julho => "Julho",
            Self::Agosto => "Agosto",
            Self::Setembro => "Setembro",
            Self::Outubro => "Outubro",
            Self::Novembro => "Novembro",
            Self::Dezembro => "Dezembro",
        }
    }

    /// Zero-based position in the calendar
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    /// Month for a zero-based index, wrapping past December
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    /// The following month, December wraps to January
    pub fn succ(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The month of today's date
    pub fn current() -> Self {
        Self::from_index(chrono::Local::now().month0() as usize)
    }

    /// Parse a month label
    ///
    /// Case-insensitive; accepts accent-less spellings and 1-12 month numbers.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace('ç', "c");
        if let Ok(n) = normalized.parse::<usize>() {
            return (1..=12).contains(&n).then(|| Self::from_index(n - 1));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.label().to_lowercase().replace('ç', "c") == normalized)
    }
}

impl fmt::Display for MonthName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The seven fixed monthly bills
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedExpenses {
    #[serde(default)]
    pub inter: Money,
    #[serde(default)]
    pub nubank: Money,
    #[serde(default)]
    pub m_pago: Money,
    #[serde(default)]
    pub agua: Money,
    #[serde(default)]
    pub energia: Money,
    #[serde(default)]
    pub outros: Money,
    #[serde(default)]
    pub pix: Money,
}

impl FixedExpenses {
    /// Field names accepted by [`FixedExpenses::set`]
    pub const FIELDS: [&'static str; 7] =
        ["inter", "nubank", "m_pago", "agua", "energia", "outros", "pix"];

    /// Every field paired with its name, in declaration order
    pub fn fields(&self) -> [(&'static str, Money); 7] {
        [
            ("inter", self.inter),
            ("nubank", self.nubank),
            ("m_pago", self.m_pago),
            ("agua", self.agua),
            ("energia", self.energia),
            ("outros", self.outros),
            ("pix", self.pix),
        ]
    }

    /// Set a field by name; returns false for unknown names
    pub fn set(&mut self, field: &str, value: Money) -> bool {
        let slot = match field {
            "inter" => &mut self.inter,
            "nubank" => &mut self.nubank,
            "m_pago" | "mpago" => &mut self.m_pago,
            "agua" => &mut self.agua,
            "energia" => &mut self.energia,
            "outros" => &mut self.outros,
            "pix" => &mut self.pix,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// The four monthly income sources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyIncome {
    #[serde(default)]
    pub salario: Money,
    #[serde(default)]
    pub bonus: Money,
    #[serde(default)]
    pub outros: Money,
    #[serde(default)]
    pub recarga_pay: Money,
}

impl MonthlyIncome {
    /// Field names accepted by [`MonthlyIncome::set`]
    pub const FIELDS: [&'static str; 4] = ["salario", "bonus", "outros", "recarga_pay"];

    /// Every field paired with its name, in declaration order
    pub fn fields(&self) -> [(&'static str, Money); 4] {
        [
            ("salario", self.salario),
            ("bonus", self.bonus),
            ("outros", self.outros),
            ("recarga_pay", self.recarga_pay),
        ]
    }

    /// Set a field by name; returns false for unknown names
    pub fn set(&mut self, field: &str, value: Money) -> bool {
        let slot = match field {
            "salario" => &mut self.salario,
            "bonus" => &mut self.bonus,
            "outros" => &mut self.outros,
            "recarga_pay" | "recargapay" => &mut self.recarga_pay,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Fixed expenses and income of one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRecord {
    /// Unique identifier
    pub id: MonthId,

    /// Month label
    pub month: MonthName,

    /// Calendar year
    pub year: i32,

    /// Fixed bills
    #[serde(default)]
    pub expenses: FixedExpenses,

    /// Income sources
    #[serde(default)]
    pub income: MonthlyIncome,
}

impl MonthRecord {
    /// Create an empty month record
    pub fn new(month: MonthName, year: i32) -> Self {
        Self {
            id: MonthId::new(),
            month,
            year,
            expenses: FixedExpenses::default(),
            income: MonthlyIncome::default(),
        }
    }

    /// A reference to this month for dependent records
    pub fn month_ref(&self) -> MonthRef {
        MonthRef::linked(self)
    }
}

/// Association of a record with a month
///
/// `month_id` is the owning `MonthRecord`, the label is kept for display.
/// References without an id fall back to matching by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRef {
    /// Display label
    pub label: MonthName,

    /// Owning month record, if linked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_id: Option<MonthId>,
}

impl MonthRef {
    /// An unlinked reference by label only
    pub fn unlinked(label: MonthName) -> Self {
        Self {
            label,
            month_id: None,
        }
    }

    /// A reference linked to a month record
    pub fn linked(month: &MonthRecord) -> Self {
        Self {
            label: month.month,
            month_id: Some(month.id),
        }
    }

    /// Whether this reference designates the given month record
    pub fn belongs_to(&self, month: &MonthRecord) -> bool {
        match self.month_id {
            Some(id) => id == month.id,
            None => self.label == month.month,
        }
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_succ_wraps() {
        assert_eq!(MonthName::Janeiro.succ(), MonthName::Fevereiro);
        assert_eq!(MonthName::Dezembro.succ(), MonthName::Janeiro);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(MonthName::parse("Março"), Some(MonthName::Marco));
        assert_eq!(MonthName::parse("marco"), Some(MonthName::Marco));
        assert_eq!(MonthName::parse("  DEZEMBRO "), Some(MonthName::Dezembro));
        assert_eq!(MonthName::parse("3"), Some(MonthName::Marco));
        assert_eq!(MonthName::parse("13"), None);
        assert_eq!(MonthName::parse("January"), None);
    }

    #[test]
    fn test_serialized_as_label() {
        let json = serde_json::to_string(&MonthName::Marco).unwrap();
        assert_eq!(json, "\"Março\"");
        let back: MonthName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MonthName::Marco);
    }

    #[test]
    fn test_field_setters() {
        let mut expenses = FixedExpenses::default();
        assert!(expenses.set("nubank", Money::from_cents(5000)));
        assert!(!expenses.set("rent", Money::from_cents(1)));
        assert_eq!(expenses.nubank.cents(), 5000);

        let mut income = MonthlyIncome::default();
        assert!(income.set("recargapay", Money::from_cents(700)));
        assert_eq!(income.recarga_pay.cents(), 700);
    }

    #[test]
    fn test_month_ref_association() {
        let jan = MonthRecord::new(MonthName::Janeiro, 2025);
        let other_jan = MonthRecord::new(MonthName::Janeiro, 2026);

        let by_label = MonthRef::unlinked(MonthName::Janeiro);
        assert!(by_label.belongs_to(&jan));
        assert!(by_label.belongs_to(&other_jan));

        let linked = jan.month_ref();
        assert!(linked.belongs_to(&jan));
        assert!(!linked.belongs_to(&other_jan));
    }
}
