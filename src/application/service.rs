use crate::domain::{
    compute_report, BalanceReport, EntryId, ExpenseEntry, Month, PaymentEntry, Toman, UnitNo,
};
use crate::storage::Repository;

use super::{AppError, MonthStatement};

/// Application service providing high-level operations for the charge ledger.
/// This is the primary interface for any client (CLI, export, tests).
///
/// The repository is injected explicitly; the balance engine itself only ever
/// sees in-memory snapshots fetched here.
pub struct ChargeService {
    repo: Repository,
    unit_count: u32,
}

impl ChargeService {
    /// Create a new service over the given repository.
    /// Fails for a zero-unit building: per-unit shares would be undefined.
    pub fn new(repo: Repository, unit_count: u32) -> Result<Self, AppError> {
        if unit_count == 0 {
            return Err(AppError::DegenerateUnitCount);
        }
        Ok(Self { repo, unit_count })
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str, unit_count: u32) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Self::new(repo, unit_count)
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str, unit_count: u32) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Self::new(repo, unit_count)
    }

    pub fn unit_count(&self) -> u32 {
        self.unit_count
    }

    fn check_amount(amount: Toman) -> Result<(), AppError> {
        if amount < 0 {
            return Err(AppError::NegativeAmount(amount));
        }
        Ok(())
    }

    fn check_unit(&self, unit: UnitNo) -> Result<(), AppError> {
        if unit.0 < 1 || unit.0 > self.unit_count {
            return Err(AppError::InvalidUnit {
                given: unit.0.to_string(),
                unit_count: self.unit_count,
            });
        }
        Ok(())
    }

    // ========================
    // Expense operations
    // ========================

    /// Record a new shared expense.
    pub async fn record_expense(
        &self,
        month: Month,
        date: String,
        description: String,
        amount: Toman,
    ) -> Result<ExpenseEntry, AppError> {
        Self::check_amount(amount)?;

        let expense = ExpenseEntry::new(month, date, description, amount);
        self.repo.save_expense(&expense).await?;
        Ok(expense)
    }

    /// Get an expense by ID.
    pub async fn get_expense(&self, id: EntryId) -> Result<ExpenseEntry, AppError> {
        self.repo
            .get_expense(id)
            .await?
            .ok_or_else(|| AppError::ExpenseNotFound(id.to_string()))
    }

    /// Update fields of an existing expense. `None` keeps the stored value.
    pub async fn update_expense(
        &self,
        id: EntryId,
        month: Option<Month>,
        date: Option<String>,
        description: Option<String>,
        amount: Option<Toman>,
    ) -> Result<ExpenseEntry, AppError> {
        let mut expense = self.get_expense(id).await?;

        if let Some(month) = month {
            expense.month = month;
        }
        if let Some(date) = date {
            expense.date = date;
        }
        if let Some(description) = description {
            expense.description = description;
        }
        if let Some(amount) = amount {
            Self::check_amount(amount)?;
            expense.amount = amount;
        }

        self.repo.update_expense(&expense).await?;
        Ok(expense)
    }

    /// Delete an expense, returning the deleted entry.
    pub async fn delete_expense(&self, id: EntryId) -> Result<ExpenseEntry, AppError> {
        let expense = self.get_expense(id).await?;
        self.repo.delete_expense(id).await?;
        Ok(expense)
    }

    /// List expenses, optionally restricted to one month.
    pub async fn list_expenses(&self, month: Option<Month>) -> Result<Vec<ExpenseEntry>, AppError> {
        match month {
            Some(month) => Ok(self.repo.list_expenses_for_month(month).await?),
            None => Ok(self.repo.list_expenses().await?),
        }
    }

    // ========================
    // Payment operations
    // ========================

    /// Record a charge payment by one unit.
    pub async fn record_payment(
        &self,
        month: Month,
        unit: UnitNo,
        amount: Toman,
    ) -> Result<PaymentEntry, AppError> {
        Self::check_amount(amount)?;
        self.check_unit(unit)?;

        let payment = PaymentEntry::new(month, unit, amount);
        self.repo.save_payment(&payment).await?;
        Ok(payment)
    }

    /// Get a payment by ID.
    pub async fn get_payment(&self, id: EntryId) -> Result<PaymentEntry, AppError> {
        self.repo
            .get_payment(id)
            .await?
            .ok_or_else(|| AppError::PaymentNotFound(id.to_string()))
    }

    /// Update fields of an existing payment. `None` keeps the stored value.
    pub async fn update_payment(
        &self,
        id: EntryId,
        month: Option<Month>,
        unit: Option<UnitNo>,
        amount: Option<Toman>,
    ) -> Result<PaymentEntry, AppError> {
        let mut payment = self.get_payment(id).await?;

        if let Some(month) = month {
            payment.month = month;
        }
        if let Some(unit) = unit {
            self.check_unit(unit)?;
            payment.unit = unit;
        }
        if let Some(amount) = amount {
            Self::check_amount(amount)?;
            payment.amount = amount;
        }

        self.repo.update_payment(&payment).await?;
        Ok(payment)
    }

    /// Delete a payment, returning the deleted entry.
    pub async fn delete_payment(&self, id: EntryId) -> Result<PaymentEntry, AppError> {
        let payment = self.get_payment(id).await?;
        self.repo.delete_payment(id).await?;
        Ok(payment)
    }

    /// List payments, optionally restricted to one month.
    pub async fn list_payments(&self, month: Option<Month>) -> Result<Vec<PaymentEntry>, AppError> {
        match month {
            Some(month) => Ok(self.repo.list_payments_for_month(month).await?),
            None => Ok(self.repo.list_payments().await?),
        }
    }

    // ========================
    // Reporting operations
    // ========================

    /// Compute the cumulative balance report from the full ledger history.
    pub async fn balance_report(&self) -> Result<BalanceReport, AppError> {
        let expenses = self.repo.list_expenses().await?;
        let payments = self.repo.list_payments().await?;
        Ok(compute_report(&expenses, &payments, self.unit_count)?)
    }

    /// Build the single-month presentation view.
    pub async fn month_statement(&self, month: Month) -> Result<MonthStatement, AppError> {
        let expenses = self.repo.list_expenses_for_month(month).await?;
        let payments = self.repo.list_payments_for_month(month).await?;

        let total_expense: Toman = expenses.iter().map(|e| e.amount).sum();
        let total_paid: Toman = payments.iter().map(|p| p.amount).sum();
        // unit_count >= 1 is guaranteed at construction
        let share_per_unit = total_expense / self.unit_count as Toman;

        Ok(MonthStatement {
            month,
            expenses,
            payments,
            total_expense,
            total_paid,
            share_per_unit,
        })
    }

    /// Parse a month string from user input against the fixed 12-label set.
    pub fn parse_month(input: &str) -> Result<Month, AppError> {
        Month::from_name(input).ok_or_else(|| AppError::InvalidMonth(input.to_string()))
    }

    /// Parse a unit label and validate it against this building.
    pub fn parse_unit(&self, input: &str) -> Result<UnitNo, AppError> {
        let unit = UnitNo::from_label(input).ok_or_else(|| AppError::InvalidUnit {
            given: input.to_string(),
            unit_count: self.unit_count,
        })?;
        self.check_unit(unit)?;
        Ok(unit)
    }
}
