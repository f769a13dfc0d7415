use crate::{
    account::{AccountKind, AccountType, Term},
    account_number::AccountNumber,
    activity::ActivityKind,
    branch::Branch,
    date::Date,
    error::ValidationError,
    profile::Profile,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// A parsed request to open an account. Eligibility is checked when it is
/// opened, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub branch: Branch,
    pub holder: Profile,
    pub balance: Decimal,
    pub kind: AccountKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityRecord {
    pub kind: ActivityKind,
    pub number: AccountNumber,
    pub date: Date,
    pub branch: Branch,
    pub amount: Decimal,
}

#[derive(Deserialize, Debug)]
struct RawActivity {
    kind: String,
    number: String,
    date: String,
    branch: String,
    amount: String,
}

impl TryFrom<RawActivity> for ActivityRecord {
    type Error = ValidationError;

    fn try_from(value: RawActivity) -> Result<Self, Self::Error> {
        Ok(ActivityRecord {
            kind: value.kind.parse()?,
            number: value.number.parse()?,
            date: value.date.parse()?,
            branch: value.branch.parse()?,
            amount: parse_amount(&value.amount)?,
        })
    }
}

pub fn parse_amount(text: &str) -> Result<Decimal, ValidationError> {
    let text = text.trim();
    text.parse()
        .map_err(|_| ValidationError::InvalidAmount(text.to_string()))
}

fn field<'a>(record: &'a csv::StringRecord, index: usize, name: &'static str) -> Result<&'a str, ValidationError> {
    record.get(index).ok_or(ValidationError::MissingField(name))
}

/// Reads `type,branch,first,last,MM/DD/YYYY,amount[,extra]`. The campus
/// code and the certificate term and open date are taken from the end of
/// the record.
pub fn parse_open(record: &csv::StringRecord) -> Result<OpenRequest, ValidationError> {
    let account_type: AccountType = field(record, 0, "account type")?.parse()?;
    let branch = field(record, 1, "branch")?.parse()?;
    let first_name = field(record, 2, "first name")?;
    let last_name = field(record, 3, "last name")?;
    let date_of_birth = field(record, 4, "date of birth")?.parse()?;
    let balance = parse_amount(field(record, 5, "amount")?)?;

    let last = record.len() - 1;
    let kind = match account_type {
        AccountType::Checking => AccountKind::Checking,
        AccountType::Savings => AccountKind::Savings { loyal: false },
        AccountType::MoneyMarket => AccountKind::MoneyMarket,
        AccountType::CollegeChecking => {
            if last < 6 {
                return Err(ValidationError::MissingField("campus"));
            }
            AccountKind::CollegeChecking {
                campus: field(record, last, "campus")?.parse()?,
            }
        }
        AccountType::CertificateDeposit => {
            if last < 7 {
                return Err(ValidationError::MissingField("term and open date"));
            }
            AccountKind::CertificateDeposit {
                term: field(record, last - 1, "term")?.parse::<Term>()?,
                open_date: field(record, last, "open date")?.parse()?,
            }
        }
    };

    Ok(OpenRequest {
        branch,
        holder: Profile::new(first_name, last_name, date_of_birth),
        balance,
        kind,
    })
}

pub fn parse_activity(record: &csv::StringRecord) -> Result<ActivityRecord, ValidationError> {
    if record.len() < 5 {
        return Err(ValidationError::MissingField("activity field"));
    }

    let raw: RawActivity = record
        .deserialize(None)
        .map_err(|_| ValidationError::MissingField("activity field"))?;

    ActivityRecord::try_from(raw)
}

/// Comma separated records, no header row, trimmed fields, any field count.
pub fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

/// Lines holding nothing but whitespace.
pub fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::Campus;

    fn record(line: &str) -> csv::StringRecord {
        let mut reader = reader(line.as_bytes());
        reader.records().next().unwrap().unwrap()
    }

    #[test]
    fn open_checking() {
        let request = parse_open(&record("Checking,Edison,John,Doe,2/19/2000,1200.50")).unwrap();

        assert_eq!(request.branch, Branch::Edison);
        assert_eq!(request.holder, Profile::new("John", "Doe", Date::new(2000, 2, 19)));
        assert_eq!(request.balance, Decimal::new(120050, 2));
        assert_eq!(request.kind, AccountKind::Checking);
    }

    #[test]
    fn open_college_reads_campus_from_last_field() {
        let request = parse_open(&record("college, bridgewater, Jane, Smith, 5/1/2004, 600, 2")).unwrap();

        assert_eq!(
            request.kind,
            AccountKind::CollegeChecking {
                campus: Campus::Newark
            }
        );
    }

    #[test]
    fn open_certificate_reads_term_and_open_date() {
        let request = parse_open(&record("certificate,warren,Roy,Brooks,10/31/1979,1000,12,1/1/2026")).unwrap();

        assert_eq!(
            request.kind,
            AccountKind::CertificateDeposit {
                term: Term::try_from(12).unwrap(),
                open_date: Date::new(2026, 1, 1),
            }
        );
    }

    #[test]
    fn open_rejects_bad_fields() {
        let cases = [
            ("brokerage,edison,A,B,1/1/1990,100", ValidationError::InvalidAccountType("brokerage".into())),
            ("checking,newyork,A,B,1/1/1990,100", ValidationError::InvalidBranch("newyork".into())),
            ("checking,edison,A,B,1/1/1990,abc", ValidationError::InvalidAmount("abc".into())),
            ("checking,edison,A,B,1-1-1990,100", ValidationError::MalformedDate("1-1-1990".into())),
            ("checking,edison,A,B", ValidationError::MissingField("date of birth")),
            ("college,edison,A,B,1/1/2004,100", ValidationError::MissingField("campus")),
            ("college,edison,A,B,1/1/2004,100,7", ValidationError::InvalidCampus("7".into())),
            ("certificate,edison,A,B,1/1/1990,1000,12", ValidationError::MissingField("term and open date")),
            ("certificate,edison,A,B,1/1/1990,1000,5,1/1/2026", ValidationError::InvalidTerm("5".into())),
        ];

        for (line, expected) in cases {
            assert_eq!(parse_open(&record(line)), Err(expected), "{line}");
        }
    }

    #[test]
    fn activity() {
        let parsed = parse_activity(&record("W,300040004,1/20/2026,princeton,600")).unwrap();

        assert_eq!(parsed.kind, ActivityKind::Withdraw);
        assert_eq!(parsed.number.to_string(), "300040004");
        assert_eq!(parsed.date, Date::new(2026, 1, 20));
        assert_eq!(parsed.branch, Branch::Princeton);
        assert_eq!(parsed.amount, Decimal::from(600));
    }

    #[test]
    fn activity_rejects_bad_fields() {
        assert_eq!(
            parse_activity(&record("X,300040004,1/20/2026,princeton,600")),
            Err(ValidationError::InvalidActivityKind("X".into()))
        );
        assert_eq!(
            parse_activity(&record("D,abc,1/20/2026,princeton,600")),
            Err(ValidationError::InvalidAccountNumber("abc".into()))
        );
        assert_eq!(
            parse_activity(&record("D,300040004,1/20/2026")),
            Err(ValidationError::MissingField("activity field"))
        );
    }

    #[test]
    fn blank_lines() {
        let mut reader = reader("checking,edison\n\n   \nsavings,warren\n".as_bytes());
        let records: Vec<_> = reader
            .records()
            .map(Result::unwrap)
            .filter(|r| !is_blank(r))
            .collect();

        assert_eq!(records.len(), 2);
    }
}
