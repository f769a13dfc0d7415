use crate::{
    database::AccountDatabase,
    money,
    sort::{self, SortOrder},
};
use std::io::{self, Write};

const END_OF_LIST: &str = "*end of list.";

pub fn write_accounts<W: Write>(database: &AccountDatabase, out: &mut W) -> io::Result<()> {
    writeln!(out, "*List of accounts in the database.")?;
    for account in database.iter() {
        writeln!(out, "{account}")?;
    }
    writeln!(out, "{END_OF_LIST}")
}

/// Grouped under a header per county.
pub fn write_by_branch<W: Write>(database: &mut AccountDatabase, out: &mut W) -> io::Result<()> {
    sort::accounts(database, SortOrder::Branch);

    writeln!(out, "*List of accounts ordered by branch location (county, city).")?;
    let mut county = None;
    for account in database.iter() {
        let current = account.branch().county();
        if county != Some(current) {
            writeln!(out, "County: {current}")?;
            county = Some(current);
        }
        writeln!(out, "{account}")?;
    }
    writeln!(out, "{END_OF_LIST}")
}

pub fn write_by_holder<W: Write>(database: &mut AccountDatabase, out: &mut W) -> io::Result<()> {
    sort::accounts(database, SortOrder::Holder);

    writeln!(out, "*List of accounts ordered by account holder and number.")?;
    for account in database.iter() {
        writeln!(out, "{account}")?;
    }
    writeln!(out, "{END_OF_LIST}")
}

/// Grouped under a header per account type.
pub fn write_by_type<W: Write>(database: &mut AccountDatabase, out: &mut W) -> io::Result<()> {
    sort::accounts(database, SortOrder::Type);

    writeln!(out, "*List of accounts ordered by account type and number.")?;
    let mut account_type = None;
    for account in database.iter() {
        let current = account.account_type();
        if account_type != Some(current) {
            writeln!(out, "Account Type: {current}")?;
            account_type = Some(current);
        }
        writeln!(out, "{account}")?;
    }
    writeln!(out, "{END_OF_LIST}")
}

/// Statements grouped and numbered by holder.
pub fn write_statements<W: Write>(database: &mut AccountDatabase, out: &mut W) -> io::Result<()> {
    sort::accounts(database, SortOrder::Holder);

    writeln!(out, "*Account statements by account holder.")?;
    let mut holders = 0;
    let mut previous = None;
    for account in database.iter() {
        if previous != Some(account.holder()) {
            holders += 1;
            writeln!(out, "{holders}.{}", account.holder())?;
            previous = Some(account.holder());
        }

        writeln!(out, "\t[Account#] {}", account.number())?;
        write!(out, "{}", account.statement())?;
        writeln!(
            out,
            "\t[interest] ${} [fee] ${}",
            money::format(&account.monthly_interest()),
            money::format(&account.monthly_fee())
        )?;
        writeln!(out)?;
    }
    writeln!(out, "*end of statements.")
}

pub fn write_archive<W: Write>(database: &AccountDatabase, out: &mut W) -> io::Result<()> {
    writeln!(out, "*List of closed accounts in the archive.")?;
    for entry in database.archive().iter() {
        writeln!(out, "{entry}")?;
    }
    writeln!(out, "{END_OF_LIST}")
}
