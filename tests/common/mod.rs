// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use hesab::application::ChargeService;
use hesab::domain::{Month, UnitNo};
use tempfile::TempDir;

/// Helper to create a test service with a temporary database (10 units)
pub async fn test_service() -> Result<(ChargeService, TempDir)> {
    test_service_with_units(10).await
}

/// Helper to create a test service with a custom unit count
pub async fn test_service_with_units(units: u32) -> Result<(ChargeService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = ChargeService::init(db_path.to_str().unwrap(), units).await?;
    Ok((service, temp_dir))
}

/// Record a simple expense with a fixed date label
pub async fn add_expense(
    service: &ChargeService,
    month: Month,
    amount: i64,
) -> Result<hesab::domain::ExpenseEntry> {
    Ok(service
        .record_expense(month, "1404/01/01".into(), "shared expense".into(), amount)
        .await?)
}

/// Record a payment by the given unit number
pub async fn add_payment(
    service: &ChargeService,
    month: Month,
    unit: u32,
    amount: i64,
) -> Result<hesab::domain::PaymentEntry> {
    Ok(service.record_payment(month, UnitNo(unit), amount).await?)
}
