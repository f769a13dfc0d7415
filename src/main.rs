use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::io::{self, BufWriter, Write};
use transaction_manager::{
    config::{Args, Report},
    error::LedgerError,
    manager::BatchReport,
    money, report, AccountType, TransactionManager,
};

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let today = args.today();
    info!("processing as of {today}");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut manager = TransactionManager::new(today);

    let accounts = manager
        .load_accounts(&args.accounts)
        .with_context(|| format!("Cannot read account file {}", args.accounts.display()))?;
    writeln!(out, "Accounts in \"{}\" loaded to the database.", args.accounts.display())?;
    write_failures(&mut out, &accounts)?;

    if let Some(path) = &args.activities {
        let activities = manager
            .process_activities(path)
            .with_context(|| format!("Cannot read activity file {}", path.display()))?;
        writeln!(out, "Processing \"{}\"...", path.display())?;

        let minimum = money::format(&AccountType::MoneyMarket.minimum_opening_balance());
        for applied in activities.applied() {
            writeln!(out, "{}::{}", applied.number, applied.activity)?;
            if applied.below_minimum {
                writeln!(out, "{} balance below ${minimum}", applied.number)?;
            }
        }
        write_failures(&mut out, &activities)?;
        writeln!(out, "Account activities in \"{}\" processed.", path.display())?;
    }

    for order in &args.close {
        writeln!(out, "Closing account {}", order.number)?;
        match manager.close(&order.number, order.close_date) {
            Ok(earned) => {
                writeln!(out, "--interest earned: ${}", money::format(&earned.interest))?;
                if let Some(penalty) = earned.penalty {
                    writeln!(out, "  [penalty] ${}", money::format(&penalty))?;
                }
            }
            Err(err) => writeln!(out, "{err}")?,
        }
    }

    for order in &args.close_holder {
        writeln!(out, "Closing accounts for {}", order.holder)?;
        match manager.close_holder(&order.holder, order.close_date) {
            Ok(closed) => {
                for (number, earned) in closed {
                    writeln!(out, "--{number} interest earned: ${}", money::format(&earned.interest))?;
                    if let Some(penalty) = earned.penalty {
                        writeln!(out, "  [penalty] ${}", money::format(&penalty))?;
                    }
                }
                writeln!(out, "*All accounts for {} are closed and moved to archive.", order.holder)?;
            }
            Err(err) => writeln!(out, "{err}")?,
        }
    }

    for selected in args.reports() {
        let database = manager.database_mut();
        match selected {
            Report::All => report::write_accounts(database, &mut out)?,
            Report::Branch => report::write_by_branch(database, &mut out)?,
            Report::Holder => report::write_by_holder(database, &mut out)?,
            Report::Type => report::write_by_type(database, &mut out)?,
            Report::Statements => report::write_statements(database, &mut out)?,
            Report::Archive => report::write_archive(database, &mut out)?,
        }
    }

    out.flush()?;
    Ok(())
}

/// Errors raised while parsing a record already name their line.
fn write_failures<W: Write, T>(out: &mut W, batch: &BatchReport<T>) -> io::Result<()> {
    for (line, err) in batch.failures() {
        match err {
            LedgerError::Format { .. } => writeln!(out, "{err}")?,
            _ => writeln!(out, "line {line}: {err}")?,
        }
    }
    Ok(())
}
