use thiserror::Error;

use crate::domain::{BalanceError, Toman};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid month: '{0}' (expected one of the 12 Jalali months)")]
    InvalidMonth(String),

    #[error("Invalid unit '{given}': building has units 1 to {unit_count}")]
    InvalidUnit { given: String, unit_count: u32 },

    #[error("Amount must not be negative: {0}")]
    NegativeAmount(Toman),

    #[error("Building must have at least 1 unit")]
    DegenerateUnitCount,

    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),

    #[error("Payment not found: {0}")]
    PaymentNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl From<BalanceError> for AppError {
    fn from(err: BalanceError) -> Self {
        match err {
            BalanceError::DegenerateUnitCount => AppError::DegenerateUnitCount,
        }
    }
}
