use crate::error::ValidationError;
use chrono::Datelike;
use std::{fmt, str::FromStr};

const MINIMUM_AGE_YEARS: i32 = 18;
const MAXIMUM_AGE_YEARS: i32 = 24;
const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// A calendar date with no time-of-day component.
///
/// Any triple can be stored; use [`Date::is_valid`] before trusting a date
/// that came from user input. Field order gives the derived ordering its
/// (year, month, day) lexicographic meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: i32,
    month: u32,
    day: u32,
}

impl Date {
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// The current local date of the system clock.
    pub fn today() -> Self {
        chrono::Local::now().date_naive().into()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month) && self.day >= 1 && self.day <= self.days_in_month()
    }

    /// Whole years between this birth date and `today`.
    pub fn age_as_of(&self, today: Date) -> i32 {
        let mut age = today.year.saturating_sub(self.year);
        if (today.month, today.day) < (self.month, self.day) {
            age = age.saturating_sub(1);
        }
        age
    }

    pub fn is_after_today(&self) -> bool {
        self.is_after_today_as_of(Date::today())
    }

    pub fn is_after_today_as_of(&self, today: Date) -> bool {
        self.is_after(&today)
    }

    pub fn is_eighteen(&self) -> bool {
        self.is_eighteen_as_of(Date::today())
    }

    /// True on and after the 18th birthday.
    pub fn is_eighteen_as_of(&self, today: Date) -> bool {
        self.age_as_of(today) >= MINIMUM_AGE_YEARS
    }

    pub fn is_over_twenty_four(&self) -> bool {
        self.is_over_twenty_four_as_of(Date::today())
    }

    /// True from the 25th birthday on; a holder aged 24 is not over.
    pub fn is_over_twenty_four_as_of(&self, today: Date) -> bool {
        self.age_as_of(today) > MAXIMUM_AGE_YEARS
    }

    /// Adds `months` with year carry, clamping the day to the end of the
    /// target month (Jan 31 + 1 month is the last day of February).
    pub fn add_months(&self, months: i32) -> Date {
        let total = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(months);
        let year = clamp_year(total.div_euclid(12));
        let month = total.rem_euclid(12) as u32 + 1;
        let day = self.day.min(days_in_month(year, month));

        Date::new(year, month, day)
    }

    pub fn next_day(&self) -> Date {
        if self.day < self.days_in_month() {
            Date::new(self.year, self.month, self.day + 1)
        } else if self.month < 12 {
            Date::new(self.year, self.month + 1, 1)
        } else {
            Date::new(self.year.saturating_add(1), 1, 1)
        }
    }

    /// Inclusive count of calendar days between the two dates, so the same
    /// day counts as 1.
    pub fn days_from(&self, other: &Date) -> u32 {
        let elapsed = (self.day_number() - other.day_number()).unsigned_abs();
        u32::try_from(elapsed.saturating_add(1)).unwrap_or(u32::MAX)
    }

    /// Days since 3/1/0000 of the proleptic Gregorian calendar.
    fn day_number(&self) -> i64 {
        let (year, month) = if self.month <= 2 {
            (i64::from(self.year) - 1, i64::from(self.month) + 9)
        } else {
            (i64::from(self.year), i64::from(self.month) - 3)
        };
        let era = year.div_euclid(400);
        let year_of_era = year.rem_euclid(400);
        let day_of_year = (153 * month + 2) / 5 + i64::from(self.day) - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

        era * 146_097 + day_of_era
    }

    pub fn is_after(&self, other: &Date) -> bool {
        self > other
    }
}

fn clamp_year(year: i64) -> i32 {
    i32::try_from(year).unwrap_or(if year < 0 { i32::MIN } else { i32::MAX })
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.month, self.day, self.year)
    }
}

/// Parses `MM/DD/YYYY` with a year from 1 to 9999. The result is not
/// checked for calendar validity.
impl FromStr for Date {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::MalformedDate(s.to_string());

        let mut parts = s.trim().split('/').map(str::trim);
        let (Some(month), Some(day), Some(year), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        let year: i32 = year.parse().map_err(|_| malformed())?;
        if !YEARS.contains(&year) {
            return Err(malformed());
        }

        Ok(Date::new(
            year,
            month.parse().map_err(|_| malformed())?,
            day.parse().map_err(|_| malformed())?,
        ))
    }
}

impl From<chrono::NaiveDate> for Date {
    fn from(date: chrono::NaiveDate) -> Self {
        Date::new(date.year(), date.month(), date.day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(Date::new(2024, 1, 1).is_leap_year());
        assert!(Date::new(2000, 1, 1).is_leap_year());
        assert!(!Date::new(1900, 1, 1).is_leap_year());
        assert!(!Date::new(2023, 1, 1).is_leap_year());
    }

    #[test]
    fn february_depends_on_leap_year() {
        assert!(Date::new(2024, 2, 29).is_valid());
        assert!(!Date::new(2023, 2, 29).is_valid());
        assert!(!Date::new(1900, 2, 29).is_valid());
        assert!(Date::new(2000, 2, 29).is_valid());
        assert!(Date::new(2023, 2, 28).is_valid());
    }

    #[test]
    fn invalid_months_and_days() {
        assert!(!Date::new(2024, 0, 1).is_valid());
        assert!(!Date::new(2024, 13, 1).is_valid());
        assert!(!Date::new(2024, 4, 31).is_valid());
        assert!(!Date::new(2024, 1, 0).is_valid());
        assert!(Date::new(2024, 12, 31).is_valid());
    }

    #[test]
    fn days_from_is_inclusive() {
        let date = Date::new(2024, 3, 15);
        assert_eq!(date.days_from(&date), 1);
        assert_eq!(Date::new(2024, 3, 16).days_from(&date), 2);
        assert_eq!(date.days_from(&Date::new(2024, 3, 16)), 2);
        // 2024 is a leap year: 366 elapsed days
        assert_eq!(Date::new(2025, 1, 1).days_from(&Date::new(2024, 1, 1)), 367);
    }

    #[test]
    fn add_months_rolls_over_years() {
        assert_eq!(Date::new(2023, 1, 15).add_months(12), Date::new(2024, 1, 15));
        assert_eq!(Date::new(2023, 11, 15).add_months(3), Date::new(2024, 2, 15));
        assert_eq!(Date::new(2023, 3, 15).add_months(-3), Date::new(2022, 12, 15));
    }

    #[test]
    fn add_months_clamps_to_end_of_month() {
        assert_eq!(Date::new(2024, 1, 31).add_months(1), Date::new(2024, 2, 29));
        assert_eq!(Date::new(2023, 1, 31).add_months(1), Date::new(2023, 2, 28));
        assert_eq!(Date::new(2024, 8, 31).add_months(1), Date::new(2024, 9, 30));
    }

    #[test]
    fn age_boundaries() {
        let today = Date::new(2026, 10, 14);

        assert!(Date::new(2008, 10, 14).is_eighteen_as_of(today));
        assert!(!Date::new(2008, 10, 15).is_eighteen_as_of(today));

        assert!(!Date::new(2002, 10, 14).is_over_twenty_four_as_of(today));
        assert!(!Date::new(2001, 10, 15).is_over_twenty_four_as_of(today));
        assert!(Date::new(2001, 10, 14).is_over_twenty_four_as_of(today));
    }

    #[test]
    fn after_today() {
        let today = Date::new(2026, 10, 14);
        assert!(Date::new(2026, 10, 15).is_after_today_as_of(today));
        assert!(!today.is_after_today_as_of(today));
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(Date::new(2024, 1, 1).is_after(&Date::new(2023, 12, 31)));
        assert!(Date::new(2024, 2, 1) > Date::new(2024, 1, 31));
        assert!(!Date::new(2024, 1, 1).is_after(&Date::new(2024, 1, 1)));
    }

    #[test]
    fn parse() {
        assert_eq!("2/19/2000".parse(), Ok(Date::new(2000, 2, 19)));
        assert_eq!(" 02/09/2000 ".parse(), Ok(Date::new(2000, 2, 9)));
        assert_eq!(
            "2/30/2000".parse::<Date>().map(|d| d.is_valid()),
            Ok(false)
        );
        assert!("2/19".parse::<Date>().is_err());
        assert!("2/19/2000/1".parse::<Date>().is_err());
        assert!("a/b/c".parse::<Date>().is_err());
    }

    #[test]
    fn parse_rejects_years_out_of_range() {
        for text in ["1/1/0", "1/1/10000", "1/1/-2147483648", "1/1/2000000000"] {
            assert_eq!(text.parse::<Date>(), Err(ValidationError::MalformedDate(text.to_string())));
        }
        assert_eq!("1/1/1".parse(), Ok(Date::new(1, 1, 1)));
        assert_eq!("12/31/9999".parse(), Ok(Date::new(9999, 12, 31)));
    }

    #[test]
    fn days_from_spans_centuries() {
        // 400 Gregorian years hold 146097 days
        assert_eq!(Date::new(2000, 1, 1).days_from(&Date::new(2400, 1, 1)), 146_098);
        assert_eq!(Date::new(1, 1, 1).days_from(&Date::new(9999, 12, 31)), 3_652_059);
        assert_eq!(Date::new(2024, 2, 28).days_from(&Date::new(2024, 3, 1)), 3);
    }

    #[test]
    fn extreme_years_do_not_overflow() {
        let low = Date::new(i32::MIN, 1, 1);
        let high = Date::new(i32::MAX, 12, 31);

        assert!(low.age_as_of(Date::new(2026, 10, 14)) > 0);
        assert_eq!(high.next_day(), Date::new(i32::MAX, 1, 1));
        assert_eq!(high.add_months(12).year(), i32::MAX);
        assert_eq!(low.add_months(-12).year(), i32::MIN);
        assert!(low.days_from(&high) > 0);
    }

    #[test]
    fn next_day_carries() {
        assert_eq!(Date::new(2024, 2, 28).next_day(), Date::new(2024, 2, 29));
        assert_eq!(Date::new(2023, 2, 28).next_day(), Date::new(2023, 3, 1));
        assert_eq!(Date::new(2023, 12, 31).next_day(), Date::new(2024, 1, 1));
    }

    #[test]
    fn from_naive_date() {
        let naive = chrono::NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        assert_eq!(Date::from(naive), Date::new(2026, 10, 14));
    }

    #[test]
    fn display() {
        assert_eq!(Date::new(2000, 2, 9).to_string(), "2/9/2000");
    }
}
