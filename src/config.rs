use crate::{account_number::AccountNumber, date::Date, error::ValidationError, profile::Profile};
use clap::{Parser, ValueEnum};
use std::{path::PathBuf, str::FromStr};

#[derive(Parser, Debug)]
#[command(name = "transaction-manager", version, about = "Batch processor for a ledger of bank accounts")]
pub struct Args {
    /// Open-account records, one per line
    pub accounts: PathBuf,

    /// Deposit and withdrawal records applied after the accounts are opened
    #[arg(long)]
    pub activities: Option<PathBuf>,

    /// Date used for eligibility checks instead of the system date
    #[arg(long, value_name = "MM/DD/YYYY")]
    pub today: Option<Date>,

    /// Close one account
    #[arg(long, value_name = "ACCOUNT,MM/DD/YYYY")]
    pub close: Vec<CloseAccount>,

    /// Close every account of a holder
    #[arg(long, value_name = "FIRST,LAST,MM/DD/YYYY,MM/DD/YYYY")]
    pub close_holder: Vec<CloseHolder>,

    /// Reports to print once processing is done
    #[arg(long, value_enum)]
    pub report: Vec<Report>,
}

impl Args {
    pub fn today(&self) -> Date {
        self.today.unwrap_or_else(Date::today)
    }

    pub fn reports(&self) -> Vec<Report> {
        if self.report.is_empty() {
            vec![Report::All]
        } else {
            self.report.clone()
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    All,
    Branch,
    Holder,
    Type,
    Statements,
    Archive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseAccount {
    pub number: AccountNumber,
    pub close_date: Date,
}

impl FromStr for CloseAccount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (number, close_date) = s
            .split_once(',')
            .ok_or(ValidationError::MissingField("close date"))?;

        Ok(CloseAccount {
            number: number.parse()?,
            close_date: close_date.parse()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseHolder {
    pub holder: Profile,
    pub close_date: Date,
}

impl FromStr for CloseHolder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);
        let mut next = |name| parts.next().ok_or(ValidationError::MissingField(name));

        let first_name = next("first name")?;
        let last_name = next("last name")?;
        let date_of_birth = next("date of birth")?.parse()?;
        let close_date = next("close date")?.parse()?;

        Ok(CloseHolder {
            holder: Profile::new(first_name, last_name, date_of_birth),
            close_date,
        })
    }
}
