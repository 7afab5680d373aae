use serde::Serialize;
use std::collections::HashMap;

use super::{ExpenseEntry, PaymentEntry, Toman, UnitNo};

/// Cumulative balance table for the whole building, derived from a ledger
/// snapshot. Never persisted; recomputed from scratch on every request.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceReport {
    pub unit_count: u32,
    /// One row per unit, in unit order.
    pub rows: Vec<UnitBalanceRow>,
    pub total_expenses: Toman,
    pub total_paid: Toman,
    /// total_paid - total_expenses for the whole building
    pub balance: Toman,
}

/// Cumulative balance of one unit across the canonical month order.
#[derive(Debug, Clone, Serialize)]
pub struct UnitBalanceRow {
    pub unit: UnitNo,
    /// balance[m] = cumulative paid - cumulative share, up to and including
    /// month m of `Month::ALL`.
    pub monthly: [Toman; 12],
    /// The cumulative endpoint (the Esfand value). Deliberately NOT a sum of
    /// the per-month columns, which are already cumulative.
    pub total: Toman,
}

/// Split an amount equally across `unit_count` units using floor division.
/// Unit 1 (index 0) absorbs the remainder, so the parts always sum back to
/// the original amount and reconciliation stays exact.
pub fn split_equal(amount: Toman, unit_count: u32) -> Vec<Toman> {
    assert!(unit_count > 0, "cannot split an expense across zero units");
    let n = unit_count as i64;
    let mut parts = vec![amount / n; unit_count as usize];
    parts[0] += amount % n;
    parts
}

/// Cumulative sum over the canonical month order. A month with no recorded
/// value contributes nothing and carries the previous running total forward,
/// so a gap between two active months never resets the series to zero.
pub fn running_total(monthly: [Option<Toman>; 12]) -> [Toman; 12] {
    let mut cumulative = [0; 12];
    let mut acc = 0;
    for (i, value) in monthly.into_iter().enumerate() {
        acc += value.unwrap_or(0);
        cumulative[i] = acc;
    }
    cumulative
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceError {
    /// A per-unit share is undefined for a building with zero units.
    DegenerateUnitCount,
}

impl std::fmt::Display for BalanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceError::DegenerateUnitCount => {
                write!(f, "unit count must be at least 1 to split expenses")
            }
        }
    }
}

impl std::error::Error for BalanceError {}

/// Compute the full balance report from a ledger snapshot.
///
/// Pure function: no I/O, no stored state. Entries may arrive in any order
/// and any month subset; the cumulative series always follows `Month::ALL`.
/// Month and unit validity is the ingestion boundary's responsibility; a
/// payment for a unit above `unit_count` still counts toward the grand
/// totals but has no row of its own.
pub fn compute_report(
    expenses: &[ExpenseEntry],
    payments: &[PaymentEntry],
    unit_count: u32,
) -> Result<BalanceReport, BalanceError> {
    if unit_count == 0 {
        return Err(BalanceError::DegenerateUnitCount);
    }

    // Monthly expense totals. A month with no entries stays None: it is not
    // a zero-cost month, it simply contributes nothing to the running sum.
    let mut monthly_expense: [Option<Toman>; 12] = [None; 12];
    for expense in expenses {
        let slot = &mut monthly_expense[expense.month.index()];
        *slot = Some(slot.unwrap_or(0) + expense.amount);
    }

    // Equal split of each active month, one part per unit.
    let monthly_shares: Vec<Option<Vec<Toman>>> = monthly_expense
        .iter()
        .map(|total| total.map(|t| split_equal(t, unit_count)))
        .collect();

    let mut paid: HashMap<(UnitNo, usize), Toman> = HashMap::new();
    for payment in payments {
        *paid.entry((payment.unit, payment.month.index())).or_insert(0) += payment.amount;
    }

    let mut rows = Vec::with_capacity(unit_count as usize);
    for u in 0..unit_count {
        let unit = UnitNo(u + 1);

        let mut shares: [Option<Toman>; 12] = [None; 12];
        let mut payments_by_month: [Option<Toman>; 12] = [None; 12];
        for i in 0..12 {
            shares[i] = monthly_shares[i].as_ref().map(|parts| parts[u as usize]);
            payments_by_month[i] = paid.get(&(unit, i)).copied();
        }

        let cumulative_share = running_total(shares);
        let cumulative_paid = running_total(payments_by_month);

        let mut monthly = [0; 12];
        for i in 0..12 {
            monthly[i] = cumulative_paid[i] - cumulative_share[i];
        }

        rows.push(UnitBalanceRow {
            unit,
            monthly,
            total: monthly[11],
        });
    }

    let total_expenses: Toman = expenses.iter().map(|e| e.amount).sum();
    let total_paid: Toman = payments.iter().map(|p| p.amount).sum();

    Ok(BalanceReport {
        unit_count,
        rows,
        total_expenses,
        total_paid,
        balance: total_paid - total_expenses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Month;

    fn expense(month: Month, amount: Toman) -> ExpenseEntry {
        ExpenseEntry::new(month, "۱۴۰۴/۰۱/۰۱", "test", amount)
    }

    fn payment(month: Month, unit: u32, amount: Toman) -> PaymentEntry {
        PaymentEntry::new(month, UnitNo(unit), amount)
    }

    fn row<'a>(report: &'a BalanceReport, unit: u32) -> &'a UnitBalanceRow {
        report.rows.iter().find(|r| r.unit == UnitNo(unit)).unwrap()
    }

    #[test]
    fn test_empty_ledger_is_all_zeros() {
        let report = compute_report(&[], &[], 10).unwrap();
        assert_eq!(report.rows.len(), 10);
        for row in &report.rows {
            assert_eq!(row.monthly, [0; 12]);
            assert_eq!(row.total, 0);
        }
        assert_eq!(report.total_expenses, 0);
        assert_eq!(report.total_paid, 0);
        assert_eq!(report.balance, 0);
    }

    #[test]
    fn test_zero_units_fails_loudly() {
        let result = compute_report(&[expense(Month::Farvardin, 1000)], &[], 0);
        assert_eq!(result.unwrap_err(), BalanceError::DegenerateUnitCount);
    }

    #[test]
    fn test_single_month_scenario() {
        // 100000 in Farvardin over 10 units -> share 10000 each.
        // Unit 1 pays 15000 -> balance 5000; everyone else owes 10000.
        let expenses = vec![expense(Month::Farvardin, 100000)];
        let payments = vec![payment(Month::Farvardin, 1, 15000)];
        let report = compute_report(&expenses, &payments, 10).unwrap();

        assert_eq!(row(&report, 1).monthly[0], 5000);
        for u in 2..=10 {
            assert_eq!(row(&report, u).monthly[0], -10000);
        }
    }

    #[test]
    fn test_balances_are_cumulative_across_months() {
        let expenses = vec![
            expense(Month::Farvardin, 50000),
            expense(Month::Ordibehesht, 30000),
        ];
        let payments = vec![
            payment(Month::Farvardin, 2, 10000),
            payment(Month::Ordibehesht, 2, 10000),
        ];
        let report = compute_report(&expenses, &payments, 10).unwrap();

        let unit2 = row(&report, 2);
        assert_eq!(unit2.monthly[0], 10000 - 5000);
        assert_eq!(unit2.monthly[1], 20000 - 8000);
        // No further activity: the balance carries to year end unchanged.
        assert_eq!(unit2.monthly[11], 12000);
        assert_eq!(unit2.total, 12000);
    }

    #[test]
    fn test_forward_fill_across_gap_months() {
        // Expenses only in months 1 and 5. Months 2-4 must carry month 1's
        // cumulative share instead of resetting or going undefined.
        let expenses = vec![
            expense(Month::Farvardin, 40000),
            expense(Month::Mordad, 20000),
        ];
        let report = compute_report(&expenses, &[], 4).unwrap();

        let unit3 = row(&report, 3);
        assert_eq!(unit3.monthly[0], -10000);
        assert_eq!(unit3.monthly[1], -10000);
        assert_eq!(unit3.monthly[2], -10000);
        assert_eq!(unit3.monthly[3], -10000);
        assert_eq!(unit3.monthly[4], -15000);
    }

    #[test]
    fn test_unit_with_no_payments_accumulates_debt() {
        let expenses = vec![
            expense(Month::Farvardin, 10000),
            expense(Month::Esfand, 10000),
        ];
        let report = compute_report(&expenses, &[], 2).unwrap();

        let unit2 = row(&report, 2);
        assert_eq!(unit2.monthly[0], -5000);
        assert_eq!(unit2.total, -10000);
    }

    #[test]
    fn test_total_is_cumulative_endpoint_not_column_sum() {
        let expenses = vec![expense(Month::Farvardin, 12000)];
        let payments = vec![payment(Month::Farvardin, 1, 12000)];
        let report = compute_report(&expenses, &payments, 2).unwrap();

        // Unit 1: paid 12000, share 6000 -> every cumulative column is 6000.
        // A naive sum of the 12 columns would report 72000.
        let unit1 = row(&report, 1);
        assert_eq!(unit1.total, 6000);
        assert_eq!(unit1.total, unit1.monthly[11]);
    }

    #[test]
    fn test_grand_totals_independent_of_storage_order() {
        let expenses = vec![
            expense(Month::Azar, 7000),
            expense(Month::Farvardin, 3000),
            expense(Month::Mehr, 5000),
        ];
        let payments = vec![
            payment(Month::Esfand, 2, 4000),
            payment(Month::Farvardin, 1, 6000),
        ];
        let report = compute_report(&expenses, &payments, 5).unwrap();

        assert_eq!(report.total_expenses, 15000);
        assert_eq!(report.total_paid, 10000);
        assert_eq!(report.balance, -5000);

        let mut reversed_exp = expenses.clone();
        let mut reversed_pay = payments.clone();
        reversed_exp.reverse();
        reversed_pay.reverse();
        let again = compute_report(&reversed_exp, &reversed_pay, 5).unwrap();
        for (a, b) in report.rows.iter().zip(again.rows.iter()) {
            assert_eq!(a.monthly, b.monthly);
        }
    }

    #[test]
    fn test_split_equal_exact() {
        assert_eq!(split_equal(100000, 10), vec![10000; 10]);
        assert_eq!(split_equal(0, 3), vec![0, 0, 0]);
    }

    #[test]
    fn test_split_equal_remainder_goes_to_first_unit() {
        let parts = split_equal(100, 3);
        assert_eq!(parts, vec![34, 33, 33]);
        assert_eq!(parts.iter().sum::<Toman>(), 100);
    }

    #[test]
    fn test_running_total_carries_forward() {
        let monthly = [
            Some(100),
            None,
            None,
            Some(50),
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
        ];
        let cumulative = running_total(monthly);
        assert_eq!(cumulative[0], 100);
        assert_eq!(cumulative[1], 100);
        assert_eq!(cumulative[2], 100);
        assert_eq!(cumulative[3], 150);
        assert_eq!(cumulative[11], 150);
    }

    #[test]
    fn test_running_total_all_absent_is_zero() {
        assert_eq!(running_total([None; 12]), [0; 12]);
    }

    #[test]
    fn test_shares_with_remainder_still_reconcile() {
        // 10001 over 10 units: unit 1 takes 1001, others 1000.
        let expenses = vec![expense(Month::Tir, 10001)];
        let report = compute_report(&expenses, &[], 10).unwrap();

        let owed: Toman = report.rows.iter().map(|r| -r.total).sum();
        assert_eq!(owed, 10001);
        assert_eq!(row(&report, 1).total, -1001);
        assert_eq!(row(&report, 2).total, -1000);
    }
}
