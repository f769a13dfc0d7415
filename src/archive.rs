use crate::{account::Account, date::Date};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    account: Account,
    close_date: Date,
}

impl ArchiveEntry {
    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn close_date(&self) -> Date {
        self.close_date
    }
}

impl fmt::Display for ArchiveEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Closed[{}]", self.account, self.close_date)?;

        if !self.account.activities().is_empty() {
            f.write_str("\n\t[Activity]")?;
            for activity in self.account.activities() {
                write!(f, "\n\t\t{activity}")?;
            }
        }

        Ok(())
    }
}

/// Closed accounts in the order they were closed. Entries are never removed.
#[derive(Debug, Default)]
pub struct Archive {
    entries: Vec<ArchiveEntry>,
}

impl Archive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, account: Account, close_date: Date) {
        self.entries.push(ArchiveEntry {
            account,
            close_date,
        });
    }

    pub fn first(&self) -> Option<&ArchiveEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest closed first.
    pub fn iter(&self) -> impl Iterator<Item = &ArchiveEntry> {
        self.entries.iter()
    }
}
