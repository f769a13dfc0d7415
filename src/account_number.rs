use crate::{account::AccountType, branch::Branch, error::ValidationError};
use std::{cmp::Ordering, fmt, str::FromStr};

/// Ledger identity of an account: branch code, type code and sequence,
/// rendered as nine digits (`100010001`).
///
/// The sequence is zero until the database assigns one on insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountNumber {
    branch: Branch,
    account_type: AccountType,
    sequence: u32,
}

impl AccountNumber {
    pub(crate) fn new(branch: Branch, account_type: AccountType, sequence: u32) -> Self {
        Self {
            branch,
            account_type,
            sequence,
        }
    }

    pub(crate) fn unassigned(branch: Branch, account_type: AccountType) -> Self {
        Self::new(branch, account_type, 0)
    }

    pub fn branch(&self) -> Branch {
        self.branch
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:03}{:02}{:04}",
            self.branch.code(),
            self.account_type.code(),
            self.sequence
        )
    }
}

impl FromStr for AccountNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        let invalid = || ValidationError::InvalidAccountNumber(digits.to_string());

        if digits.len() != 9 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let branch = digits[..3]
            .parse()
            .ok()
            .and_then(Branch::from_code)
            .ok_or_else(invalid)?;
        let account_type = digits[3..5]
            .parse()
            .ok()
            .and_then(AccountType::from_code)
            .ok_or_else(invalid)?;
        let sequence = digits[5..].parse().map_err(|_| invalid())?;

        Ok(Self::new(branch, account_type, sequence))
    }
}

impl PartialOrd for AccountNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Same order as the rendered digits.
impl Ord for AccountNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.branch.code(), self.account_type.code(), self.sequence).cmp(&(
            other.branch.code(),
            other.account_type.code(),
            other.sequence,
        ))
    }
}
