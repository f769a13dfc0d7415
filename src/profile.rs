use crate::date::Date;
use std::{cmp::Ordering, fmt};

/// The account holder. Names compare without regard to ASCII case.
#[derive(Debug, Clone)]
pub struct Profile {
    first_name: String,
    last_name: String,
    date_of_birth: Date,
}

impl Profile {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, date_of_birth: Date) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn date_of_birth(&self) -> Date {
        self.date_of_birth
    }

    pub fn matches(&self, first_name: &str, last_name: &str, date_of_birth: Date) -> bool {
        self.first_name.eq_ignore_ascii_case(first_name)
            && self.last_name.eq_ignore_ascii_case(last_name)
            && self.date_of_birth == date_of_birth
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

impl PartialEq for Profile {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.first_name, &other.last_name, other.date_of_birth)
    }
}

impl Eq for Profile {}

impl PartialOrd for Profile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Last name, then first name, then date of birth.
impl Ord for Profile {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_names(&self.last_name, &other.last_name)
            .then_with(|| compare_names(&self.first_name, &other.first_name))
            .then_with(|| self.date_of_birth.cmp(&other.date_of_birth))
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.first_name, self.last_name, self.date_of_birth)
    }
}
