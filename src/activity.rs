use crate::{branch::Branch, date::Date, error::ValidationError, money};
use rust_decimal::Decimal;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Deposit,
    Withdraw,
}

impl FromStr for ActivityKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "D" | "d" => Ok(ActivityKind::Deposit),
            "W" | "w" => Ok(ActivityKind::Withdraw),
            other => Err(ValidationError::InvalidActivityKind(other.to_string())),
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityKind::Deposit => f.write_str("deposit"),
            ActivityKind::Withdraw => f.write_str("withdrawal"),
        }
    }
}

/// One posted deposit or withdrawal. `atm` marks activity read from a batch
/// file rather than entered at a teller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    date: Date,
    branch: Branch,
    kind: ActivityKind,
    amount: Decimal,
    atm: bool,
}

impl Activity {
    pub fn new(date: Date, branch: Branch, kind: ActivityKind, amount: Decimal, atm: bool) -> Self {
        Self {
            date,
            branch,
            kind,
            amount,
            atm,
        }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn branch(&self) -> Branch {
        self.branch
    }

    pub fn kind(&self) -> ActivityKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn atm(&self) -> bool {
        self.atm
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.date, self.branch)?;
        if self.atm {
            f.write_str("[ATM]")?;
        }
        write!(f, "::{}::${}", self.kind, money::format(&self.amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let deposit = Activity::new(
            Date::new(2026, 1, 15),
            Branch::Edison,
            ActivityKind::Deposit,
            Decimal::from(1500),
            true,
        );
        assert_eq!(deposit.to_string(), "1/15/2026::EDISON[ATM]::deposit::$1,500.00");

        let withdrawal = Activity::new(
            Date::new(2026, 1, 16),
            Branch::Warren,
            ActivityKind::Withdraw,
            Decimal::new(2550, 2),
            false,
        );
        assert_eq!(withdrawal.to_string(), "1/16/2026::WARREN::withdrawal::$25.50");
    }

    #[test]
    fn parse_kind() {
        assert_eq!("D".parse(), Ok(ActivityKind::Deposit));
        assert_eq!("w".parse(), Ok(ActivityKind::Withdraw));
        assert!("X".parse::<ActivityKind>().is_err());
    }
}
