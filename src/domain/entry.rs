use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Month, Toman, UnitNo};

pub type EntryId = Uuid;

/// A shared building expense, split equally across all units of the month it
/// belongs to. The `date` is a free-text Jalali date label ("۱۴۰۴/۱۱/۱۹") and
/// is never parsed; all aggregation is keyed by `month`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: EntryId,
    pub month: Month,
    pub date: String,
    pub description: String,
    pub amount: Toman,
    /// When the entry was recorded in the system
    pub recorded_at: DateTime<Utc>,
}

impl ExpenseEntry {
    pub fn new(month: Month, date: impl Into<String>, description: impl Into<String>, amount: Toman) -> Self {
        Self {
            id: Uuid::new_v4(),
            month,
            date: date.into(),
            description: description.into(),
            amount,
            recorded_at: Utc::now(),
        }
    }
}

/// A charge payment made by one unit for one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub id: EntryId,
    pub month: Month,
    pub unit: UnitNo,
    pub amount: Toman,
    pub recorded_at: DateTime<Utc>,
}

impl PaymentEntry {
    pub fn new(month: Month, unit: UnitNo, amount: Toman) -> Self {
        Self {
            id: Uuid::new_v4(),
            month,
            unit,
            amount,
            recorded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_expense() {
        let expense = ExpenseEntry::new(Month::Bahman, "۱۴۰۴/۱۱/۱۹", "نظافت راه‌پله", 250000);
        assert_eq!(expense.month, Month::Bahman);
        assert_eq!(expense.amount, 250000);
        assert_eq!(expense.description, "نظافت راه‌پله");
    }

    #[test]
    fn test_create_payment() {
        let payment = PaymentEntry::new(Month::Farvardin, UnitNo(3), 150000);
        assert_eq!(payment.unit, UnitNo(3));
        assert_eq!(payment.amount, 150000);
    }
}
