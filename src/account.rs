use crate::{
    account_number::AccountNumber,
    activity::{Activity, ActivityKind},
    branch::{Branch, Campus},
    date::Date,
    error::{LedgerError, Result, ValidationError},
    money,
    profile::Profile,
};
use rust_decimal::Decimal;
use std::{fmt, str::FromStr};

const DAYS_IN_YEAR: i64 = 365;
const MONTHS_IN_YEAR: i64 = 12;
const MONEY_MARKET_MINIMUM: i64 = 2000;
const MONEY_MARKET_TIER: i64 = 5000;
const CD_MINIMUM: i64 = 1000;
const COLLEGE_MAXIMUM_AGE: i32 = 24;

/// An annual rate given in basis points: `rate(150)` is 1.5%.
fn rate(basis_points: i64) -> Decimal {
    Decimal::new(basis_points, 4)
}

fn penalty_share() -> Decimal {
    Decimal::new(1, 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccountType {
    Checking,
    CollegeChecking,
    Savings,
    MoneyMarket,
    CertificateDeposit,
}

impl AccountType {
    pub const ALL: [AccountType; 5] = [
        AccountType::Checking,
        AccountType::CollegeChecking,
        AccountType::Savings,
        AccountType::MoneyMarket,
        AccountType::CertificateDeposit,
    ];

    pub fn code(&self) -> u8 {
        match self {
            AccountType::Checking => 1,
            AccountType::CollegeChecking => 2,
            AccountType::Savings => 3,
            AccountType::MoneyMarket => 4,
            AccountType::CertificateDeposit => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<AccountType> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Token naming the type in open-account records.
    pub fn token(&self) -> &'static str {
        match self {
            AccountType::Checking => "checking",
            AccountType::CollegeChecking => "college",
            AccountType::Savings => "savings",
            AccountType::MoneyMarket => "moneymarket",
            AccountType::CertificateDeposit => "certificate",
        }
    }

    /// Smallest balance an account of this type may be opened with. Every
    /// type additionally requires a positive opening balance.
    pub fn minimum_opening_balance(&self) -> Decimal {
        match self {
            AccountType::MoneyMarket => Decimal::from(MONEY_MARKET_MINIMUM),
            AccountType::CertificateDeposit => Decimal::from(CD_MINIMUM),
            _ => Decimal::ZERO,
        }
    }

    pub fn maximum_age(&self) -> Option<i32> {
        match self {
            AccountType::CollegeChecking => Some(COLLEGE_MAXIMUM_AGE),
            _ => None,
        }
    }

    pub fn is_checking(&self) -> bool {
        matches!(self, AccountType::Checking | AccountType::CollegeChecking)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountType::Checking => "Checking",
            AccountType::CollegeChecking => "College Checking",
            AccountType::Savings => "Savings",
            AccountType::MoneyMarket => "Money Market",
            AccountType::CertificateDeposit => "Certificate Deposit",
        };

        f.write_str(name)
    }
}

impl FromStr for AccountType {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let token = s.trim();

        Self::ALL
            .into_iter()
            .find(|t| t.token().eq_ignore_ascii_case(token))
            .ok_or_else(|| ValidationError::InvalidAccountType(token.to_string()))
    }
}

/// Length of a certificate of deposit in months: 3, 6, 9 or 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term(u32);

impl Term {
    pub fn months(&self) -> u32 {
        self.0
    }

    fn maturity_rate(&self) -> Decimal {
        match self.0 {
            3 => rate(300),
            6 => rate(325),
            9 => rate(350),
            _ => rate(400),
        }
    }
}

impl TryFrom<u32> for Term {
    type Error = ValidationError;

    fn try_from(months: u32) -> std::result::Result<Self, Self::Error> {
        match months {
            3 | 6 | 9 | 12 => Ok(Term(months)),
            _ => Err(ValidationError::InvalidTerm(months.to_string())),
        }
    }
}

impl FromStr for Term {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let months: u32 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidTerm(s.trim().to_string()))?;

        Term::try_from(months)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The per-type part of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKind {
    Checking,
    CollegeChecking { campus: Campus },
    Savings { loyal: bool },
    MoneyMarket,
    CertificateDeposit { term: Term, open_date: Date },
}

impl AccountKind {
    pub fn account_type(&self) -> AccountType {
        match self {
            AccountKind::Checking => AccountType::Checking,
            AccountKind::CollegeChecking { .. } => AccountType::CollegeChecking,
            AccountKind::Savings { .. } => AccountType::Savings,
            AccountKind::MoneyMarket => AccountType::MoneyMarket,
            AccountKind::CertificateDeposit { .. } => AccountType::CertificateDeposit,
        }
    }
}

/// Interest owed when an account is closed. `penalty` is set for a
/// certificate of deposit closed before maturity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestEarned {
    pub rate: Decimal,
    pub interest: Decimal,
    pub penalty: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    number: AccountNumber,
    holder: Profile,
    balance: Decimal,
    activities: Vec<Activity>,
    kind: AccountKind,
}

impl Account {
    /// A new account for `holder`. Its number stays unassigned until the
    /// account is added to a database.
    pub fn new(branch: Branch, holder: Profile, balance: Decimal, kind: AccountKind) -> Self {
        Self {
            number: AccountNumber::unassigned(branch, kind.account_type()),
            holder,
            balance,
            activities: Vec::new(),
            kind,
        }
    }

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    pub fn holder(&self) -> &Profile {
        &self.holder
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub fn account_type(&self) -> AccountType {
        self.kind.account_type()
    }

    pub fn branch(&self) -> Branch {
        self.number.branch()
    }

    pub(crate) fn assign_sequence(&mut self, sequence: u32) {
        self.number = AccountNumber::new(self.number.branch(), self.account_type(), sequence);
    }

    /// Sets the loyalty flag of a savings account. Other kinds are unchanged.
    pub(crate) fn set_loyal(&mut self, value: bool) {
        if let AccountKind::Savings { loyal } = &mut self.kind {
            *loyal = value;
        }
    }

    pub fn deposit(&mut self, date: Date, branch: Branch, amount: Decimal) -> Result<()> {
        self.post(Activity::new(date, branch, ActivityKind::Deposit, amount, false))
    }

    pub fn withdraw(&mut self, date: Date, branch: Branch, amount: Decimal) -> Result<()> {
        self.post(Activity::new(date, branch, ActivityKind::Withdraw, amount, false))
    }

    /// Applies the activity to the balance and records it. Nothing changes
    /// when the activity is rejected.
    pub fn post(&mut self, activity: Activity) -> Result<()> {
        let amount = activity.amount();
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }

        match activity.kind() {
            ActivityKind::Deposit => self.balance += amount,
            ActivityKind::Withdraw => {
                if amount > self.balance {
                    return Err(LedgerError::InsufficientFunds { amount });
                }
                self.balance -= amount;
            }
        }

        self.activities.push(activity);
        Ok(())
    }

    /// Current annual rate. For a certificate of deposit this is the rate
    /// paid at maturity.
    pub fn interest_rate(&self) -> Decimal {
        match &self.kind {
            AccountKind::Checking => rate(150),
            AccountKind::CollegeChecking { .. } => rate(50),
            AccountKind::Savings { loyal: true } => rate(275),
            AccountKind::Savings { loyal: false } => rate(250),
            AccountKind::MoneyMarket if self.balance >= Decimal::from(MONEY_MARKET_TIER) => {
                rate(375)
            }
            AccountKind::MoneyMarket => rate(350),
            AccountKind::CertificateDeposit { term, .. } => term.maturity_rate(),
        }
    }

    /// Rate that applies to a withdrawal on `as_of`. Only differs from
    /// [`Account::interest_rate`] for a certificate of deposit that has not
    /// matured, where it depends on the full months held.
    pub fn interest_rate_on(&self, as_of: Date) -> Decimal {
        match &self.kind {
            AccountKind::CertificateDeposit { open_date, .. } if !self.is_matured_on(as_of) => {
                match full_months_between(*open_date, as_of) {
                    0..=2 => rate(250),
                    3..=5 => rate(300),
                    6..=8 => rate(325),
                    _ => rate(350),
                }
            }
            _ => self.interest_rate(),
        }
    }

    pub fn maturity_date(&self) -> Option<Date> {
        match &self.kind {
            AccountKind::CertificateDeposit { term, open_date } => {
                Some(open_date.add_months(term.months() as i32))
            }
            _ => None,
        }
    }

    /// Accounts without a term are always matured.
    pub fn is_matured_on(&self, date: Date) -> bool {
        self.maturity_date().map_or(true, |maturity| date >= maturity)
    }

    /// Interest for closing on `close_date`.
    ///
    /// Certificates accrue over the inclusive day count since opening, with
    /// the early rate and a 10% penalty before maturity. Every other type
    /// accrues over the day of the month of `close_date`.
    pub fn closing_interest(&self, close_date: Date) -> InterestEarned {
        let daily = |rate: Decimal| self.balance * rate / Decimal::from(DAYS_IN_YEAR);

        match &self.kind {
            AccountKind::CertificateDeposit { open_date, .. } => {
                let days_held = Decimal::from(close_date.days_from(open_date));
                let rate = self.interest_rate_on(close_date);
                let interest = daily(rate) * days_held;
                let penalty =
                    (!self.is_matured_on(close_date)).then(|| interest * penalty_share());

                InterestEarned {
                    rate,
                    interest,
                    penalty,
                }
            }
            _ => {
                let rate = self.interest_rate();
                InterestEarned {
                    rate,
                    interest: daily(rate) * Decimal::from(close_date.day()),
                    penalty: None,
                }
            }
        }
    }

    /// A money market account under its minimum balance.
    pub fn is_below_minimum(&self) -> bool {
        self.account_type() == AccountType::MoneyMarket
            && self.balance < Decimal::from(MONEY_MARKET_MINIMUM)
    }

    pub fn monthly_fee(&self) -> Decimal {
        let (fee, waived_at) = match self.kind {
            AccountKind::Checking => (12, 1000),
            AccountKind::Savings { .. } => (25, 500),
            AccountKind::MoneyMarket => (25, MONEY_MARKET_MINIMUM),
            AccountKind::CollegeChecking { .. } | AccountKind::CertificateDeposit { .. } => {
                return Decimal::ZERO
            }
        };

        if self.balance >= Decimal::from(waived_at) {
            Decimal::ZERO
        } else {
            Decimal::from(fee)
        }
    }

    pub fn monthly_interest(&self) -> Decimal {
        self.balance * self.interest_rate() / Decimal::from(MONTHS_IN_YEAR)
    }

    /// Activity in posting order followed by the current balance.
    pub fn statement(&self) -> String {
        let mut statement = String::new();

        if !self.activities.is_empty() {
            statement.push_str("\t[Activity]\n");
            for activity in &self.activities {
                statement.push_str(&format!("\t\t{activity}\n"));
            }
        }
        statement.push_str(&format!("\t[Balance] ${}\n", money::format(&self.balance)));

        statement
    }
}

fn full_months_between(start: Date, end: Date) -> u32 {
    let mut months = 0;
    while start.add_months(months as i32 + 1) <= end {
        months += 1;
    }
    months
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account#[{}] Holder[{}] Balance[${}] Branch[{}]",
            self.number,
            self.holder,
            money::format(&self.balance),
            self.branch()
        )?;

        match &self.kind {
            AccountKind::CollegeChecking { campus } => write!(f, " Campus[{campus}]"),
            AccountKind::Savings { loyal: true } => f.write_str(" is loyal"),
            AccountKind::MoneyMarket if self.is_below_minimum() => f.write_str(" below minimum"),
            AccountKind::CertificateDeposit { term, open_date } => {
                write!(f, " Term[{term}] Date opened[{open_date}]")
            }
            _ => Ok(()),
        }
    }
}
