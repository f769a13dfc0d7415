use crate::{account::Account, database::AccountDatabase};
use std::cmp::Ordering;

/// Report orderings. Each ends on the account number so ties never remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// County, then branch, then account number.
    Branch,
    /// Last name, first name, date of birth, then account number.
    Holder,
    /// Account type, then account number.
    Type,
}

impl SortOrder {
    pub fn compare(&self, a: &Account, b: &Account) -> Ordering {
        let primary = match self {
            SortOrder::Branch => a
                .branch()
                .county()
                .cmp(&b.branch().county())
                .then_with(|| a.branch().cmp(&b.branch())),
            SortOrder::Holder => a.holder().cmp(b.holder()),
            SortOrder::Type => a.account_type().cmp(&b.account_type()),
        };

        primary.then_with(|| a.number().cmp(b.number()))
    }
}

/// Sorts the live accounts in place with adjacent swaps, returning the
/// number of swaps made. An already sorted database makes none.
pub fn accounts(database: &mut AccountDatabase, order: SortOrder) -> usize {
    let mut swaps = 0;
    let mut unsorted = database.size();

    while unsorted > 1 {
        let mut last_swap = 0;
        for i in 1..unsorted {
            let out_of_order = match (database.get(i - 1), database.get(i)) {
                (Some(a), Some(b)) => order.compare(a, b) == Ordering::Greater,
                _ => false,
            };

            if out_of_order {
                database.swap(i - 1, i);
                swaps += 1;
                last_swap = i;
            }
        }
        unsorted = last_swap;
    }

    swaps
}
