use crate::{
    account::{Account, AccountType, InterestEarned},
    account_number::AccountNumber,
    activity::Activity,
    archive::Archive,
    date::Date,
    error::{LedgerError, Result},
    profile::Profile,
};
use log::{debug, info};
use rust_decimal::Decimal;

/// The live accounts plus the archive of closed ones.
///
/// Lookups that miss are ordinary outcomes: `find` returns `None` and the
/// mutating calls return [`LedgerError::NotFound`] without touching state.
#[derive(Debug)]
pub struct AccountDatabase {
    accounts: Vec<Account>,
    archive: Archive,
    next_sequence: u32,
}

impl Default for AccountDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountDatabase {
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            archive: Archive::new(),
            next_sequence: 1,
        }
    }

    /// Assigns the account its sequence number and stores it.
    pub fn add(&mut self, mut account: Account) -> AccountNumber {
        account.assign_sequence(self.next_sequence);
        self.next_sequence += 1;

        let number = *account.number();
        debug!("added {number}");
        self.accounts.push(account);

        number
    }

    pub fn find(&self, number: &AccountNumber) -> Option<usize> {
        self.accounts.iter().position(|account| account.number() == number)
    }

    /// First live account held by `holder`.
    pub fn find_holder(&self, holder: &Profile) -> Option<usize> {
        self.accounts.iter().position(|account| account.holder() == holder)
    }

    pub fn find_by_holder(&self, first_name: &str, last_name: &str, date_of_birth: Date) -> Option<usize> {
        self.accounts
            .iter()
            .position(|account| account.holder().matches(first_name, last_name, date_of_birth))
    }

    pub fn contains(&self, number: &AccountNumber) -> bool {
        self.find(number).is_some()
    }

    pub fn contains_holder_type(
        &self,
        first_name: &str,
        last_name: &str,
        date_of_birth: Date,
        account_type: AccountType,
    ) -> bool {
        self.accounts.iter().any(|account| {
            account.account_type() == account_type
                && account.holder().matches(first_name, last_name, date_of_birth)
        })
    }

    pub fn has_account_type(&self, holder: &Profile, account_type: AccountType) -> bool {
        self.contains_holder_type(
            holder.first_name(),
            holder.last_name(),
            holder.date_of_birth(),
            account_type,
        )
    }

    fn account_mut(&mut self, number: &AccountNumber) -> Result<&mut Account> {
        let index = self.find(number).ok_or(LedgerError::NotFound(*number))?;
        Ok(&mut self.accounts[index])
    }

    /// Deposits at the account's own branch.
    pub fn deposit(&mut self, number: &AccountNumber, date: Date, amount: Decimal) -> Result<()> {
        let account = self.account_mut(number)?;
        let branch = account.branch();
        account.deposit(date, branch, amount)
    }

    /// Withdraws at the account's own branch. The money market minimum is
    /// not enforced here.
    pub fn withdraw(&mut self, number: &AccountNumber, date: Date, amount: Decimal) -> Result<()> {
        let account = self.account_mut(number)?;
        let branch = account.branch();
        account.withdraw(date, branch, amount)
    }

    pub fn post(&mut self, number: &AccountNumber, activity: Activity) -> Result<()> {
        self.account_mut(number)?.post(activity)
    }

    /// Moves the account into the archive and returns the interest it earned
    /// up to `close_date`.
    pub fn close_account(&mut self, number: &AccountNumber, close_date: Date) -> Result<InterestEarned> {
        let index = self.find(number).ok_or(LedgerError::NotFound(*number))?;

        let account = self.accounts.remove(index);
        let earned = account.closing_interest(close_date);
        info!("closed {number} on {close_date}");
        self.archive.push(account, close_date);

        Ok(earned)
    }

    pub(crate) fn set_loyalty(&mut self, holder: &Profile, loyal: bool) {
        self.accounts
            .iter_mut()
            .filter(|account| account.holder() == holder)
            .for_each(|account| account.set_loyal(loyal));
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.accounts.swap(a, b);
    }

    pub fn size(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Account> {
        self.accounts.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn archive(&self) -> &Archive {
        &self.archive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{account::AccountKind, activity::ActivityKind, branch::Branch};

    fn john() -> Profile {
        Profile::new("John", "Doe", Date::new(2000, 2, 19))
    }

    fn checking(holder: Profile, balance: i64) -> Account {
        Account::new(Branch::Edison, holder, Decimal::from(balance), AccountKind::Checking)
    }

    #[test]
    fn add_assigns_increasing_sequences() {
        let mut database = AccountDatabase::new();

        let first = database.add(checking(john(), 100));
        let second = database.add(Account::new(
            Branch::Warren,
            john(),
            Decimal::from(100),
            AccountKind::Savings { loyal: false },
        ));

        assert_eq!(first.to_string(), "100010001");
        assert_eq!(second.to_string(), "500030002");
        assert_eq!(database.size(), 2);
        assert!(database.contains(&first));
        assert_eq!(database.find(&second), Some(1));
    }

    #[test]
    fn find_by_holder_returns_first_match() {
        let mut database = AccountDatabase::new();
        let jane = Profile::new("Jane", "Smith", Date::new(2004, 5, 1));
        database.add(checking(jane.clone(), 10));
        database.add(checking(john(), 10));
        database.add(checking(john(), 20));

        assert_eq!(database.find_by_holder("john", "DOE", Date::new(2000, 2, 19)), Some(1));
        assert_eq!(database.find_holder(&jane), Some(0));
        assert_eq!(database.find_by_holder("John", "Doe", Date::new(2000, 2, 20)), None);
        assert!(database.contains_holder_type("Jane", "Smith", Date::new(2004, 5, 1), AccountType::Checking));
        assert!(!database.has_account_type(&jane, AccountType::Savings));
    }

    #[test]
    fn unknown_numbers_are_not_found() {
        let mut database = AccountDatabase::new();
        database.add(checking(john(), 100));
        let missing: AccountNumber = "100010099".parse().unwrap();
        let date = Date::new(2026, 1, 1);

        assert_eq!(database.find(&missing), None);
        assert_eq!(
            database.deposit(&missing, date, Decimal::ONE),
            Err(LedgerError::NotFound(missing))
        );
        assert_eq!(
            database.withdraw(&missing, date, Decimal::ONE),
            Err(LedgerError::NotFound(missing))
        );
        assert_eq!(
            database.close_account(&missing, date),
            Err(LedgerError::NotFound(missing))
        );
        assert_eq!(database.size(), 1);
        assert!(database.archive().is_empty());
    }

    #[test]
    fn deposit_and_withdraw_use_account_branch() {
        let mut database = AccountDatabase::new();
        let number = database.add(checking(john(), 100));
        let date = Date::new(2026, 1, 1);

        database.deposit(&number, date, Decimal::from(50)).unwrap();
        database.withdraw(&number, date, Decimal::from(30)).unwrap();
        assert_eq!(
            database.withdraw(&number, date, Decimal::from(500)),
            Err(LedgerError::InsufficientFunds {
                amount: Decimal::from(500)
            })
        );

        let account = database.get(0).unwrap();
        assert_eq!(account.balance(), Decimal::from(120));
        assert_eq!(account.activities().len(), 2);
        assert!(account.activities().iter().all(|a| a.branch() == Branch::Edison));
    }

    #[test]
    fn post_keeps_activity_branch_and_flag() {
        let mut database = AccountDatabase::new();
        let number = database.add(checking(john(), 100));
        let activity = Activity::new(
            Date::new(2026, 1, 1),
            Branch::Princeton,
            ActivityKind::Deposit,
            Decimal::from(5),
            true,
        );

        database.post(&number, activity.clone()).unwrap();

        assert_eq!(database.get(0).unwrap().activities(), [activity]);
    }

    #[test]
    fn close_moves_account_to_archive() {
        let mut database = AccountDatabase::new();
        let kept = database.add(checking(john(), 100));
        let closed = database.add(checking(Profile::new("Roy", "Brooks", Date::new(1979, 10, 31)), 365));
        database.deposit(&closed, Date::new(2026, 1, 1), Decimal::from(365)).unwrap();

        let earned = database.close_account(&closed, Date::new(2026, 3, 2)).unwrap();

        // 730 * 0.015 / 365 * 2
        assert_eq!(earned.interest, Decimal::new(6, 2));
        assert_eq!(database.size(), 1);
        assert!(database.contains(&kept));
        assert!(!database.contains(&closed));
        assert_eq!(database.archive().len(), 1);

        let entry = database.archive().first().unwrap();
        assert_eq!(entry.account().number(), &closed);
        assert_eq!(entry.close_date(), Date::new(2026, 3, 2));
        assert_eq!(entry.account().activities().len(), 1);
    }

    #[test]
    fn sequences_are_not_reused_after_close() {
        let mut database = AccountDatabase::new();
        let first = database.add(checking(john(), 100));
        database.close_account(&first, Date::new(2026, 1, 1)).unwrap();

        let second = database.add(checking(john(), 100));
        assert_eq!(second.sequence(), 2);
    }
}
