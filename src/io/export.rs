use anyhow::Result;
use std::io::Write;

use crate::application::ChargeService;
use crate::domain::Month;

/// Exporter for converting ledger data to CSV.
pub struct Exporter<'a> {
    service: &'a ChargeService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a ChargeService) -> Self {
        Self { service }
    }

    /// Export the cumulative balance matrix: one row per unit, one column per
    /// month plus the total column. Amounts are raw toman integers so the
    /// file stays machine-readable.
    pub async fn export_report_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let report = self.service.balance_report().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["unit".to_string()];
        header.extend(Month::ALL.iter().map(|m| m.as_str().to_string()));
        header.push("total".to_string());
        csv_writer.write_record(&header)?;

        let mut count = 0;
        for row in &report.rows {
            let mut record = vec![row.unit.to_string()];
            record.extend(row.monthly.iter().map(|b| b.to_string()));
            record.push(row.total.to_string());
            csv_writer.write_record(&record)?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the full expense history to CSV.
    pub async fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let expenses = self.service.list_expenses(None).await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "month", "date", "description", "amount", "recorded_at"])?;

        let mut count = 0;
        for expense in &expenses {
            csv_writer.write_record(&[
                expense.id.to_string(),
                expense.month.to_string(),
                expense.date.clone(),
                expense.description.clone(),
                expense.amount.to_string(),
                expense.recorded_at.to_rfc3339(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the full payment history to CSV.
    pub async fn export_payments_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let payments = self.service.list_payments(None).await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "month", "unit", "amount", "recorded_at"])?;

        let mut count = 0;
        for payment in &payments {
            csv_writer.write_record(&[
                payment.id.to_string(),
                payment.month.to_string(),
                payment.unit.to_string(),
                payment.amount.to_string(),
                payment.recorded_at.to_rfc3339(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }
}
