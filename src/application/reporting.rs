use serde::Serialize;

use crate::domain::{ExpenseEntry, Month, PaymentEntry, Toman};

/// Presentation view of a single month: its raw entries plus the per-unit
/// share of that month's expenses. Cumulative figures live in
/// `domain::BalanceReport`; this view is deliberately non-cumulative.
#[derive(Debug, Clone, Serialize)]
pub struct MonthStatement {
    pub month: Month,
    pub expenses: Vec<ExpenseEntry>,
    pub payments: Vec<PaymentEntry>,
    pub total_expense: Toman,
    pub total_paid: Toman,
    /// Floor share of this month's expenses per unit; unit 1 additionally
    /// absorbs the division remainder in the balance table.
    pub share_per_unit: Toman,
}
