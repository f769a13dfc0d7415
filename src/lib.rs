//! A ledger of bank accounts held at a handful of branches.
//!
//! [`AccountDatabase`] stores the live accounts and an archive of closed ones.
//! [`TransactionManager`] sits on top of it and enforces the rules for
//! opening accounts, posting deposits and withdrawals, and closing accounts.
//! Batch files of account and activity records are read through the
//! [`record`] module and the printable listings live in [`report`].

pub mod account;
pub mod account_number;
pub mod activity;
pub mod archive;
pub mod branch;
pub mod config;
pub mod database;
pub mod date;
pub mod error;
pub mod manager;
pub mod money;
pub mod profile;
pub mod record;
pub mod report;
pub mod sort;

pub use account::{Account, AccountKind, AccountType, InterestEarned, Term};
pub use account_number::AccountNumber;
pub use activity::{Activity, ActivityKind};
pub use archive::{Archive, ArchiveEntry};
pub use branch::{Branch, Campus, County};
pub use database::AccountDatabase;
pub use date::Date;
pub use error::{LedgerError, ValidationError};
pub use manager::TransactionManager;
pub use profile::Profile;
pub use record::OpenRequest;
pub use sort::SortOrder;
