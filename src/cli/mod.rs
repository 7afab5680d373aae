use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::application::{ChargeService, MonthStatement};
use crate::domain::{format_toman, parse_toman, BalanceReport, Month, Toman};

/// Hesab - Building Charge Ledger
#[derive(Parser)]
#[command(name = "hesab")]
#[command(about = "A local-first ledger for shared building charges and per-unit balances")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "hesab.db")]
    pub database: String,

    /// Number of units in the building (expenses are split equally)
    #[arg(short, long, default_value_t = 10)]
    pub units: u32,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Payment management commands
    #[command(subcommand)]
    Payment(PaymentCommands),

    /// Show the cumulative balance table for all units
    Report {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Show expenses and payments for a single month
    Statement {
        /// Month name (Persian, Latin transliteration, or 1-12)
        month: String,
    },

    /// Export data to CSV
    Export {
        /// What to export: report, expenses, payments
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new shared expense
    Add {
        /// Total amount in toman (e.g., "250000" or "250,000")
        amount: String,

        /// Month the expense belongs to
        #[arg(short, long)]
        month: String,

        /// Jalali date label (e.g., "1404/11/19")
        #[arg(long)]
        date: String,

        /// Description of the expense
        #[arg(long)]
        description: String,
    },

    /// List expenses
    List {
        /// Restrict to one month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Edit an existing expense
    Edit {
        /// Expense ID
        id: String,

        /// New month
        #[arg(short, long)]
        month: Option<String>,

        /// New date label
        #[arg(long)]
        date: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New amount in toman
        #[arg(short, long)]
        amount: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum PaymentCommands {
    /// Record a charge payment by a unit
    Add {
        /// Amount in toman (e.g., "150000")
        amount: String,

        /// Month the payment is for
        #[arg(short, long)]
        month: String,

        /// Paying unit (e.g., "3" or "واحد 3")
        #[arg(short, long)]
        unit: String,
    },

    /// List payments
    List {
        /// Restrict to one month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Edit an existing payment
    Edit {
        /// Payment ID
        id: String,

        /// New month
        #[arg(short, long)]
        month: Option<String>,

        /// New unit
        #[arg(short, long)]
        unit: Option<String>,

        /// New amount in toman
        #[arg(short, long)]
        amount: Option<String>,
    },

    /// Delete a payment
    Delete {
        /// Payment ID
        id: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                ChargeService::init(&self.database, self.units).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Expense(expense_cmd) => {
                let service = ChargeService::connect(&self.database, self.units).await?;
                run_expense_command(&service, expense_cmd).await?;
            }

            Commands::Payment(payment_cmd) => {
                let service = ChargeService::connect(&self.database, self.units).await?;
                run_payment_command(&service, payment_cmd).await?;
            }

            Commands::Report { format } => {
                let service = ChargeService::connect(&self.database, self.units).await?;
                let report = service.balance_report().await?;
                match format.as_str() {
                    "table" => print_report_table(&report),
                    "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                    _ => anyhow::bail!("Invalid format '{}'. Valid formats: table, json", format),
                }
            }

            Commands::Statement { month } => {
                let service = ChargeService::connect(&self.database, self.units).await?;
                let month = ChargeService::parse_month(&month)?;
                let statement = service.month_statement(month).await?;
                print_statement(&statement);
            }

            Commands::Export {
                export_type,
                output,
            } => {
                let service = ChargeService::connect(&self.database, self.units).await?;
                run_export_command(&service, &export_type, output.as_deref()).await?;
            }
        }

        Ok(())
    }
}

fn parse_entry_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).context("Invalid entry ID format (expected UUID)")
}

fn parse_amount(amount: &str) -> Result<Toman> {
    parse_toman(amount).context("Invalid amount format. Use whole toman, e.g. '250000'")
}

async fn run_expense_command(service: &ChargeService, cmd: ExpenseCommands) -> Result<()> {
    match cmd {
        ExpenseCommands::Add {
            amount,
            month,
            date,
            description,
        } => {
            let month = ChargeService::parse_month(&month)?;
            let amount = parse_amount(&amount)?;

            let expense = service
                .record_expense(month, date, description, amount)
                .await?;
            println!(
                "Recorded expense: {} toman, {} ({}) [{}]",
                format_toman(expense.amount),
                expense.description,
                expense.month,
                expense.id
            );
        }

        ExpenseCommands::List { month } => {
            let month = month
                .map(|m| ChargeService::parse_month(&m))
                .transpose()?;
            let expenses = service.list_expenses(month).await?;

            if expenses.is_empty() {
                println!("No expenses recorded.");
                return Ok(());
            }

            println!(
                "{:<36} {:<12} {:<12} {:>14}  DESCRIPTION",
                "ID", "MONTH", "DATE", "AMOUNT"
            );
            println!("{}", "-".repeat(92));
            for expense in expenses {
                println!(
                    "{:<36} {:<12} {:<12} {:>14}  {}",
                    expense.id,
                    expense.month,
                    expense.date,
                    format_toman(expense.amount),
                    expense.description
                );
            }
        }

        ExpenseCommands::Edit {
            id,
            month,
            date,
            description,
            amount,
        } => {
            let id = parse_entry_id(&id)?;
            let month = month
                .map(|m| ChargeService::parse_month(&m))
                .transpose()?;
            let amount = amount.map(|a| parse_amount(&a)).transpose()?;

            let expense = service
                .update_expense(id, month, date, description, amount)
                .await?;
            println!(
                "Updated expense: {} toman, {} ({})",
                format_toman(expense.amount),
                expense.description,
                expense.month
            );
        }

        ExpenseCommands::Delete { id } => {
            let id = parse_entry_id(&id)?;
            let expense = service.delete_expense(id).await?;
            println!(
                "Deleted expense: {} toman, {} ({})",
                format_toman(expense.amount),
                expense.description,
                expense.month
            );
        }
    }
    Ok(())
}

async fn run_payment_command(service: &ChargeService, cmd: PaymentCommands) -> Result<()> {
    match cmd {
        PaymentCommands::Add {
            amount,
            month,
            unit,
        } => {
            let month = ChargeService::parse_month(&month)?;
            let unit = service.parse_unit(&unit)?;
            let amount = parse_amount(&amount)?;

            let payment = service.record_payment(month, unit, amount).await?;
            println!(
                "Recorded payment: {} toman by {} ({}) [{}]",
                format_toman(payment.amount),
                payment.unit,
                payment.month,
                payment.id
            );
        }

        PaymentCommands::List { month } => {
            let month = month
                .map(|m| ChargeService::parse_month(&m))
                .transpose()?;
            let payments = service.list_payments(month).await?;

            if payments.is_empty() {
                println!("No payments recorded.");
                return Ok(());
            }

            println!(
                "{:<36} {:<12} {:<10} {:>14}",
                "ID", "MONTH", "UNIT", "AMOUNT"
            );
            println!("{}", "-".repeat(76));
            for payment in payments {
                println!(
                    "{:<36} {:<12} {:<10} {:>14}",
                    payment.id,
                    payment.month,
                    payment.unit,
                    format_toman(payment.amount)
                );
            }
        }

        PaymentCommands::Edit {
            id,
            month,
            unit,
            amount,
        } => {
            let id = parse_entry_id(&id)?;
            let month = month
                .map(|m| ChargeService::parse_month(&m))
                .transpose()?;
            let unit = unit.map(|u| service.parse_unit(&u)).transpose()?;
            let amount = amount.map(|a| parse_amount(&a)).transpose()?;

            let payment = service.update_payment(id, month, unit, amount).await?;
            println!(
                "Updated payment: {} toman by {} ({})",
                format_toman(payment.amount),
                payment.unit,
                payment.month
            );
        }

        PaymentCommands::Delete { id } => {
            let id = parse_entry_id(&id)?;
            let payment = service.delete_payment(id).await?;
            println!(
                "Deleted payment: {} toman by {} ({})",
                format_toman(payment.amount),
                payment.unit,
                payment.month
            );
        }
    }
    Ok(())
}

async fn run_export_command(
    service: &ChargeService,
    export_type: &str,
    output: Option<&str>,
) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{stdout, Write};

    let exporter = Exporter::new(service);

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    match export_type {
        "report" => {
            let count = exporter.export_report_csv(writer).await?;
            if output.is_some() {
                eprintln!("Exported balance rows for {} units", count);
            }
        }
        "expenses" => {
            let count = exporter.export_expenses_csv(writer).await?;
            if output.is_some() {
                eprintln!("Exported {} expenses", count);
            }
        }
        "payments" => {
            let count = exporter.export_payments_csv(writer).await?;
            if output.is_some() {
                eprintln!("Exported {} payments", count);
            }
        }
        _ => {
            anyhow::bail!(
                "Invalid export type '{}'. Valid types: report, expenses, payments",
                export_type
            );
        }
    }

    Ok(())
}

fn print_report_table(report: &BalanceReport) {
    print!("{:<10}", "UNIT");
    for month in Month::ALL {
        print!(" {:>12}", month);
    }
    println!(" {:>14}", "TOTAL");
    println!("{}", "-".repeat(10 + 13 * 12 + 15));

    for row in &report.rows {
        print!("{:<10}", row.unit.to_string());
        for balance in row.monthly {
            print!(" {:>12}", format_toman(balance));
        }
        println!(" {:>14}", format_toman(row.total));
    }

    println!();
    println!("Total expenses:  {} toman", format_toman(report.total_expenses));
    println!("Total collected: {} toman", format_toman(report.total_paid));
    if report.balance >= 0 {
        println!("Surplus:         {} toman", format_toman(report.balance));
    } else {
        println!("Deficit:         {} toman", format_toman(report.balance));
    }
}

fn print_statement(statement: &MonthStatement) {
    println!("Statement for {}", statement.month);
    println!();

    if statement.expenses.is_empty() {
        println!("No expenses recorded.");
    } else {
        println!("Expenses:");
        for expense in &statement.expenses {
            println!(
                "  {:<12} {:>14}  {}",
                expense.date,
                format_toman(expense.amount),
                expense.description
            );
        }
    }
    println!();

    if statement.payments.is_empty() {
        println!("No payments recorded.");
    } else {
        println!("Payments:");
        for payment in &statement.payments {
            println!(
                "  {:<10} {:>14}",
                payment.unit.to_string(),
                format_toman(payment.amount)
            );
        }
    }
    println!();

    println!(
        "Total expense:  {} toman",
        format_toman(statement.total_expense)
    );
    println!(
        "Total paid:     {} toman",
        format_toman(statement.total_paid)
    );
    println!(
        "Share per unit: {} toman",
        format_toman(statement.share_per_unit)
    );
}
