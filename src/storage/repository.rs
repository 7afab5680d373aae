use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::domain::{EntryId, ExpenseEntry, Month, PaymentEntry, UnitNo};

use super::MIGRATION_001_INITIAL;

/// Repository for persisting and querying expense and payment entries.
/// The balance engine never touches this directly; the service fetches a
/// snapshot and hands it over as plain slices.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    /// Creates the database file if it doesn't exist.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Expense operations
    // ========================

    /// Save a new expense entry.
    pub async fn save_expense(&self, expense: &ExpenseEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO expenses (id, month, date, description, amount, recorded_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(expense.id.to_string())
        .bind(expense.month.as_str())
        .bind(&expense.date)
        .bind(&expense.description)
        .bind(expense.amount)
        .bind(expense.recorded_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save expense")?;
        Ok(())
    }

    /// Get an expense by ID.
    pub async fn get_expense(&self, id: EntryId) -> Result<Option<ExpenseEntry>> {
        let row = sqlx::query(
            r#"
            SELECT id, month, date, description, amount, recorded_at
            FROM expenses
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch expense")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_expense(&row)?)),
            None => Ok(None),
        }
    }

    /// Update an existing expense in place.
    pub async fn update_expense(&self, expense: &ExpenseEntry) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE expenses
            SET month = ?, date = ?, description = ?, amount = ?
            WHERE id = ?
            "#,
        )
        .bind(expense.month.as_str())
        .bind(&expense.date)
        .bind(&expense.description)
        .bind(expense.amount)
        .bind(expense.id.to_string())
        .execute(&self.pool)
        .await
        .context("Failed to update expense")?;
        Ok(())
    }

    /// Delete an expense by ID.
    pub async fn delete_expense(&self, id: EntryId) -> Result<()> {
        sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete expense")?;
        Ok(())
    }

    /// List the full expense history, in recording order.
    pub async fn list_expenses(&self) -> Result<Vec<ExpenseEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, month, date, description, amount, recorded_at
            FROM expenses
            ORDER BY recorded_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list expenses")?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    /// List expenses recorded for a single month.
    pub async fn list_expenses_for_month(&self, month: Month) -> Result<Vec<ExpenseEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, month, date, description, amount, recorded_at
            FROM expenses
            WHERE month = ?
            ORDER BY recorded_at
            "#,
        )
        .bind(month.as_str())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list expenses for month")?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    fn row_to_expense(row: &sqlx::sqlite::SqliteRow) -> Result<ExpenseEntry> {
        let id_str: String = row.get("id");
        let month_str: String = row.get("month");
        let recorded_at_str: String = row.get("recorded_at");

        Ok(ExpenseEntry {
            id: Uuid::parse_str(&id_str).context("Invalid expense ID")?,
            month: Month::from_name(&month_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid month label: {}", month_str))?,
            date: row.get("date"),
            description: row.get("description"),
            amount: row.get("amount"),
            recorded_at: DateTime::parse_from_rfc3339(&recorded_at_str)
                .context("Invalid recorded_at timestamp")?
                .with_timezone(&Utc),
        })
    }

    // ========================
    // Payment operations
    // ========================

    /// Save a new payment entry.
    pub async fn save_payment(&self, payment: &PaymentEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (id, month, unit, amount, recorded_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(payment.id.to_string())
        .bind(payment.month.as_str())
        .bind(payment.unit.0 as i64)
        .bind(payment.amount)
        .bind(payment.recorded_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save payment")?;
        Ok(())
    }

    /// Get a payment by ID.
    pub async fn get_payment(&self, id: EntryId) -> Result<Option<PaymentEntry>> {
        let row = sqlx::query(
            r#"
            SELECT id, month, unit, amount, recorded_at
            FROM payments
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch payment")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_payment(&row)?)),
            None => Ok(None),
        }
    }

    /// Update an existing payment in place.
    pub async fn update_payment(&self, payment: &PaymentEntry) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE payments
            SET month = ?, unit = ?, amount = ?
            WHERE id = ?
            "#,
        )
        .bind(payment.month.as_str())
        .bind(payment.unit.0 as i64)
        .bind(payment.amount)
        .bind(payment.id.to_string())
        .execute(&self.pool)
        .await
        .context("Failed to update payment")?;
        Ok(())
    }

    /// Delete a payment by ID.
    pub async fn delete_payment(&self, id: EntryId) -> Result<()> {
        sqlx::query("DELETE FROM payments WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete payment")?;
        Ok(())
    }

    /// List the full payment history, in recording order.
    pub async fn list_payments(&self) -> Result<Vec<PaymentEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, month, unit, amount, recorded_at
            FROM payments
            ORDER BY recorded_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list payments")?;

        rows.iter().map(Self::row_to_payment).collect()
    }

    /// List payments recorded for a single month.
    pub async fn list_payments_for_month(&self, month: Month) -> Result<Vec<PaymentEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, month, unit, amount, recorded_at
            FROM payments
            WHERE month = ?
            ORDER BY recorded_at
            "#,
        )
        .bind(month.as_str())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list payments for month")?;

        rows.iter().map(Self::row_to_payment).collect()
    }

    fn row_to_payment(row: &sqlx::sqlite::SqliteRow) -> Result<PaymentEntry> {
        let id_str: String = row.get("id");
        let month_str: String = row.get("month");
        let unit: i64 = row.get("unit");
        let recorded_at_str: String = row.get("recorded_at");

        Ok(PaymentEntry {
            id: Uuid::parse_str(&id_str).context("Invalid payment ID")?,
            month: Month::from_name(&month_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid month label: {}", month_str))?,
            unit: UnitNo(u32::try_from(unit).context("Invalid unit number")?),
            amount: row.get("amount"),
            recorded_at: DateTime::parse_from_rfc3339(&recorded_at_str)
                .context("Invalid recorded_at timestamp")?
                .with_timezone(&Utc),
        })
    }
}
