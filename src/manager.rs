use crate::{
    account::{Account, AccountKind, AccountType, InterestEarned},
    account_number::AccountNumber,
    activity::Activity,
    database::AccountDatabase,
    date::Date,
    error::{LedgerError, Result, ValidationError},
    profile::Profile,
    record::{self, ActivityRecord, OpenRequest},
};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::{fs::File, io::Read, path::Path};

/// Result of a withdrawal. `below_minimum` warns that a money market
/// account is now under its minimum balance; the withdrawal still happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Withdrawal {
    pub amount: Decimal,
    pub below_minimum: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedActivity {
    pub number: AccountNumber,
    pub activity: Activity,
    pub below_minimum: bool,
}

/// Outcome of one record of a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome<T> {
    pub line: u64,
    pub result: Result<T>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport<T> {
    pub lines: Vec<LineOutcome<T>>,
}

impl<T> BatchReport<T> {
    pub fn applied(&self) -> impl Iterator<Item = &T> {
        self.lines.iter().filter_map(|line| line.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (u64, &LedgerError)> {
        self.lines
            .iter()
            .filter_map(|line| line.result.as_ref().err().map(|err| (line.line, err)))
    }
}

/// The command surface over an [`AccountDatabase`]: the opening rules and
/// the other policies that sit on top of the raw account operations.
#[derive(Debug)]
pub struct TransactionManager {
    database: AccountDatabase,
    today: Date,
}

impl TransactionManager {
    /// `today` is the date eligibility is judged against and the date of
    /// teller deposits and withdrawals.
    pub fn new(today: Date) -> Self {
        Self {
            database: AccountDatabase::new(),
            today,
        }
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn database(&self) -> &AccountDatabase {
        &self.database
    }

    pub fn database_mut(&mut self) -> &mut AccountDatabase {
        &mut self.database
    }

    pub fn open(&mut self, request: OpenRequest) -> Result<AccountNumber> {
        let OpenRequest {
            branch,
            holder,
            balance,
            mut kind,
        } = request;
        let account_type = kind.account_type();

        if holder.first_name().trim().is_empty() || holder.last_name().trim().is_empty() {
            return Err(ValidationError::MissingName.into());
        }
        self.check_date_of_birth(holder.date_of_birth(), account_type)?;

        if let AccountKind::CertificateDeposit { open_date, .. } = &kind {
            if !open_date.is_valid() {
                return Err(ValidationError::InvalidDate {
                    label: "Open date",
                    date: *open_date,
                }
                .into());
            }
            if open_date.is_after_today_as_of(self.today) {
                return Err(ValidationError::FutureOpenDate(*open_date).into());
            }
        }

        if account_type != AccountType::CertificateDeposit
            && self.database.has_account_type(&holder, account_type)
        {
            return Err(ValidationError::DuplicateAccount {
                holder,
                account_type,
            }
            .into());
        }

        check_opening_balance(balance, account_type)?;

        if let AccountKind::Savings { loyal } = &mut kind {
            *loyal = self.holds_checking(&holder);
        }

        let number = self.database.add(Account::new(branch, holder, balance, kind));
        info!("{account_type} account {number} has been opened");

        Ok(number)
    }

    fn check_date_of_birth(&self, date_of_birth: Date, account_type: AccountType) -> Result<()> {
        let error = if !date_of_birth.is_valid() {
            ValidationError::InvalidDate {
                label: "DOB",
                date: date_of_birth,
            }
        } else if date_of_birth.is_after_today_as_of(self.today) {
            ValidationError::FutureBirthDate(date_of_birth)
        } else if !date_of_birth.is_eighteen_as_of(self.today) {
            ValidationError::Underage(date_of_birth)
        } else if account_type.maximum_age().is_some()
            && date_of_birth.is_over_twenty_four_as_of(self.today)
        {
            ValidationError::OverAge(date_of_birth)
        } else {
            return Ok(());
        };

        Err(error.into())
    }

    fn holds_checking(&self, holder: &Profile) -> bool {
        AccountType::ALL
            .into_iter()
            .filter(AccountType::is_checking)
            .any(|account_type| self.database.has_account_type(holder, account_type))
    }

    pub fn deposit(&mut self, number: &AccountNumber, amount: Decimal) -> Result<()> {
        self.database.deposit(number, self.today, amount)?;
        info!("deposited {amount} to {number}");
        Ok(())
    }

    pub fn withdraw(&mut self, number: &AccountNumber, amount: Decimal) -> Result<Withdrawal> {
        self.database.withdraw(number, self.today, amount)?;
        info!("withdrew {amount} from {number}");

        Ok(Withdrawal {
            amount,
            below_minimum: self.is_below_minimum(number),
        })
    }

    fn is_below_minimum(&self, number: &AccountNumber) -> bool {
        self.database
            .find(number)
            .and_then(|index| self.database.get(index))
            .map_or(false, Account::is_below_minimum)
    }

    pub fn close(&mut self, number: &AccountNumber, close_date: Date) -> Result<InterestEarned> {
        check_close_date(close_date)?;

        let index = self
            .database
            .find(number)
            .ok_or(LedgerError::NotFound(*number))?;
        let account = self
            .database
            .get(index)
            .ok_or(LedgerError::NotFound(*number))?;
        check_close_after_open(account, close_date)?;
        let holder = account.holder().clone();

        let earned = self.database.close_account(number, close_date)?;
        self.refresh_loyalty(&holder);

        Ok(earned)
    }

    /// Closes every live account of `holder`, in collection order. Nothing is
    /// closed when any of them cannot be closed on `close_date`.
    pub fn close_holder(
        &mut self,
        holder: &Profile,
        close_date: Date,
    ) -> Result<Vec<(AccountNumber, InterestEarned)>> {
        check_close_date(close_date)?;
        for account in self.database.iter().filter(|account| account.holder() == holder) {
            check_close_after_open(account, close_date)?;
        }

        let mut closed = Vec::new();
        while let Some(index) = self.database.find_holder(holder) {
            let Some(number) = self.database.get(index).map(|account| *account.number()) else {
                break;
            };
            let earned = self.database.close_account(&number, close_date)?;
            closed.push((number, earned));
        }

        if closed.is_empty() {
            return Err(LedgerError::HolderNotFound(holder.clone()));
        }
        info!("closed {} accounts of {holder}", closed.len());

        Ok(closed)
    }

    /// Savings loyalty lasts while the holder keeps a checking account.
    fn refresh_loyalty(&mut self, holder: &Profile) {
        let loyal = self.holds_checking(holder);
        self.database.set_loyalty(holder, loyal);
    }

    pub fn load_accounts<P>(&mut self, path: P) -> std::io::Result<BatchReport<AccountNumber>>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        Ok(self.load_accounts_from(file))
    }

    pub fn load_accounts_from<R: Read>(&mut self, input: R) -> BatchReport<AccountNumber> {
        self.process_records(input, |manager, row, line| {
            let request = record::parse_open(row).map_err(|err| format_error(line, err))?;
            debug!("open request: {request:?}");
            manager.open(request)
        })
    }

    pub fn process_activities<P>(&mut self, path: P) -> std::io::Result<BatchReport<AppliedActivity>>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        Ok(self.process_activities_from(file))
    }

    pub fn process_activities_from<R: Read>(&mut self, input: R) -> BatchReport<AppliedActivity> {
        self.process_records(input, |manager, row, line| {
            let parsed = record::parse_activity(row).map_err(|err| format_error(line, err))?;
            debug!("activity: {parsed:?}");
            manager.apply(parsed)
        })
    }

    fn apply(&mut self, record: ActivityRecord) -> Result<AppliedActivity> {
        let activity = Activity::new(record.date, record.branch, record.kind, record.amount, true);
        self.database.post(&record.number, activity.clone())?;

        Ok(AppliedActivity {
            number: record.number,
            activity,
            below_minimum: self.is_below_minimum(&record.number),
        })
    }

    /// Runs `handle` on every non-blank record with its line number. A failing
    /// record is recorded and the next one is read.
    fn process_records<R, T, F>(&mut self, input: R, mut handle: F) -> BatchReport<T>
    where
        R: Read,
        F: FnMut(&mut Self, &csv::StringRecord, u64) -> Result<T>,
    {
        let mut reader = record::reader(input);
        let mut lines = Vec::new();

        for (index, row) in reader.records().enumerate() {
            let (line, result) = match row {
                Ok(row) if record::is_blank(&row) => continue,
                Ok(row) => {
                    let line = line_of(&row, index);
                    (line, handle(self, &row, line))
                }
                Err(err) => {
                    let line = err
                        .position()
                        .map_or(index as u64 + 1, |position| position.line());
                    let reason = err.to_string();
                    (line, Err(LedgerError::Format { line, reason }))
                }
            };

            if let Err(err) = &result {
                warn!("line {line}: {err}");
            }
            lines.push(LineOutcome { line, result });
        }

        BatchReport { lines }
    }
}

fn line_of(row: &csv::StringRecord, index: usize) -> u64 {
    row.position()
        .map_or(index as u64 + 1, |position| position.line())
}

fn format_error(line: u64, err: ValidationError) -> LedgerError {
    LedgerError::Format {
        line,
        reason: err.to_string(),
    }
}

fn check_opening_balance(balance: Decimal, account_type: AccountType) -> Result<()> {
    if balance <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveOpeningBalance.into());
    }

    let minimum = account_type.minimum_opening_balance();
    if balance < minimum {
        return Err(ValidationError::BelowOpeningMinimum {
            account_type,
            minimum,
        }
        .into());
    }

    Ok(())
}

fn check_close_date(close_date: Date) -> Result<()> {
    if close_date.is_valid() {
        Ok(())
    } else {
        Err(ValidationError::InvalidDate {
            label: "Close date",
            date: close_date,
        }
        .into())
    }
}

/// A certificate earns interest from its open date, so it cannot close before it.
fn check_close_after_open(account: &Account, close_date: Date) -> Result<()> {
    match account.kind() {
        AccountKind::CertificateDeposit { open_date, .. } if close_date < *open_date => {
            Err(ValidationError::CloseBeforeOpen {
                close_date,
                open_date: *open_date,
            }
            .into())
        }
        _ => Ok(()),
    }
}
