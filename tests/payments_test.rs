mod common;

use anyhow::Result;
use common::{add_payment, test_service, test_service_with_units};
use hesab::application::AppError;
use hesab::domain::{Month, UnitNo};
use uuid::Uuid;

#[tokio::test]
async fn test_record_and_list_payment() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let payment = service
        .record_payment(Month::Bahman, UnitNo(4), 150000)
        .await?;

    let listed = service.list_payments(None).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, payment.id);
    assert_eq!(listed[0].unit, UnitNo(4));
    assert_eq!(listed[0].amount, 150000);

    Ok(())
}

#[tokio::test]
async fn test_list_payments_filtered_by_month() -> Result<()> {
    let (service, _temp) = test_service().await?;

    add_payment(&service, Month::Farvardin, 1, 10000).await?;
    add_payment(&service, Month::Farvardin, 2, 10000).await?;
    add_payment(&service, Month::Shahrivar, 1, 20000).await?;

    assert_eq!(service.list_payments(Some(Month::Farvardin)).await?.len(), 2);
    assert_eq!(service.list_payments(Some(Month::Shahrivar)).await?.len(), 1);
    assert!(service.list_payments(Some(Month::Dey)).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_update_payment() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let payment = add_payment(&service, Month::Mordad, 3, 50000).await?;

    let updated = service
        .update_payment(payment.id, Some(Month::Shahrivar), Some(UnitNo(5)), Some(60000))
        .await?;

    assert_eq!(updated.month, Month::Shahrivar);
    assert_eq!(updated.unit, UnitNo(5));
    assert_eq!(updated.amount, 60000);

    let reloaded = service.get_payment(payment.id).await?;
    assert_eq!(reloaded.unit, UnitNo(5));
    assert_eq!(reloaded.amount, 60000);

    Ok(())
}

#[tokio::test]
async fn test_delete_payment() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let payment = add_payment(&service, Month::Azar, 2, 25000).await?;
    service.delete_payment(payment.id).await?;

    assert!(service.list_payments(None).await?.is_empty());

    let result = service.get_payment(payment.id).await;
    assert!(matches!(result, Err(AppError::PaymentNotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_unknown_payment_id() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let result = service.delete_payment(Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::PaymentNotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_payment_unit_out_of_range() -> Result<()> {
    let (service, _temp) = test_service_with_units(6).await?;

    let result = service.record_payment(Month::Tir, UnitNo(7), 1000).await;
    assert!(matches!(
        result,
        Err(AppError::InvalidUnit { unit_count: 6, .. })
    ));

    // Updates are checked too
    let payment = add_payment(&service, Month::Tir, 6, 1000).await?;
    let result = service
        .update_payment(payment.id, None, Some(UnitNo(9)), None)
        .await;
    assert!(matches!(result, Err(AppError::InvalidUnit { .. })));

    Ok(())
}

#[tokio::test]
async fn test_negative_payment_rejected() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let result = service.record_payment(Month::Mehr, UnitNo(1), -5000).await;
    assert!(matches!(result, Err(AppError::NegativeAmount(-5000))));

    Ok(())
}

#[tokio::test]
async fn test_parse_unit_labels() -> Result<()> {
    let (service, _temp) = test_service().await?;

    assert_eq!(service.parse_unit("3")?, UnitNo(3));
    assert_eq!(service.parse_unit("واحد 10")?, UnitNo(10));

    assert!(matches!(
        service.parse_unit("0"),
        Err(AppError::InvalidUnit { .. })
    ));
    assert!(matches!(
        service.parse_unit("11"),
        Err(AppError::InvalidUnit { .. })
    ));
    assert!(matches!(
        service.parse_unit("abc"),
        Err(AppError::InvalidUnit { .. })
    ));

    Ok(())
}
