use crate::{
    account::AccountType, account_number::AccountNumber, date::Date, money, profile::Profile,
};
use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Input that was rejected before any state changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{label} invalid: {date} not a valid calendar date!")]
    InvalidDate { label: &'static str, date: Date },

    #[error("DOB invalid: {0} cannot be today or a future day.")]
    FutureBirthDate(Date),

    #[error("Not eligible to open: {0} under 18.")]
    Underage(Date),

    #[error("Not eligible to open: {0} over 24.")]
    OverAge(Date),

    #[error("Open date invalid: {0} cannot be a future day.")]
    FutureOpenDate(Date),

    #[error("Close date invalid: {close_date} is before the open date {open_date}.")]
    CloseBeforeOpen { close_date: Date, open_date: Date },

    #[error("Name invalid")]
    MissingName,

    #[error("Initial deposit cannot be 0 or negative.")]
    NonPositiveOpeningBalance,

    #[error(
        "Minimum of ${} to open a {account_type} account.",
        money::format(.minimum)
    )]
    BelowOpeningMinimum {
        account_type: AccountType,
        minimum: Decimal,
    },

    #[error("{} already has a {account_type} account.", full_name(.holder))]
    DuplicateAccount {
        holder: Profile,
        account_type: AccountType,
    },

    #[error("{0} - invalid term.")]
    InvalidTerm(String),

    #[error("{0} - invalid campus code.")]
    InvalidCampus(String),

    #[error("{0} - invalid branch.")]
    InvalidBranch(String),

    #[error("{0} - invalid account type.")]
    InvalidAccountType(String),

    #[error("For input string: \"{0}\" - not a valid account number.")]
    InvalidAccountNumber(String),

    #[error("For input string: \"{0}\" - not a valid amount.")]
    InvalidAmount(String),

    #[error("For input string: \"{0}\" - not a valid date.")]
    MalformedDate(String),

    #[error("{0} - not a valid activity type.")]
    InvalidActivityKind(String),

    #[error("missing {0}")]
    MissingField(&'static str),
}

fn full_name(holder: &Profile) -> String {
    format!("{} {}", holder.first_name(), holder.last_name())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} does not exist.")]
    NotFound(AccountNumber),

    #[error("{0} does not have any accounts in the database.")]
    HolderNotFound(Profile),

    #[error("${} - insufficient funds.", money::format(.amount))]
    InsufficientFunds { amount: Decimal },

    #[error("{} - amount cannot be 0 or negative.", money::format(.0))]
    InvalidAmount(Decimal),

    #[error("line {line}: {reason}")]
    Format { line: u64, reason: String },
}
