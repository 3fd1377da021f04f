use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Local, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

const ISO_FORMAT: &str = "%Y-%m-%d";

/// A single calendar day, carried on the wire as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(pub NaiveDate);

impl CalendarDate {
    /// Local date of the machine running the service
    pub fn today() -> Self {
        CalendarDate(Local::now().date_naive())
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), ISO_FORMAT).map(CalendarDate)
    }
}

/// Month navigation step. `1` is forward, `-1` is backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(try_from = "i8", into = "i8")]
#[strum(serialize_all = "lowercase")]
pub enum MonthDirection {
    Forward,
    Backward,
}

impl TryFrom<i8> for MonthDirection {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MonthDirection::Forward),
            -1 => Ok(MonthDirection::Backward),
            other => Err(format!("direction must be 1 or -1, got {}", other)),
        }
    }
}

impl From<MonthDirection> for i8 {
    fn from(direction: MonthDirection) -> Self {
        match direction {
            MonthDirection::Forward => 1,
            MonthDirection::Backward => -1,
        }
    }
}

/// The month/year currently displayed by the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| CalendarMonth { first })
    }

    pub fn containing(date: CalendarDate) -> Self {
        CalendarMonth {
            first: date.0 - Duration::days(i64::from(date.0.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            2 if NaiveDate::from_ymd_opt(self.year(), 2, 29).is_some() => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    pub fn first_day(&self) -> CalendarDate {
        CalendarDate(self.first)
    }

    pub fn last_day(&self) -> CalendarDate {
        CalendarDate(self.first + Duration::days(i64::from(self.days_in_month()) - 1))
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        date.0.year() == self.year() && date.0.month() == self.month()
    }

    /// Adjacent month, `None` past the representable calendar.
    pub fn shift(&self, direction: MonthDirection) -> Option<Self> {
        let first = match direction {
            MonthDirection::Forward => self.first.checked_add_months(Months::new(1)),
            MonthDirection::Backward => self.first.checked_sub_months(Months::new(1)),
        }?;
        Some(CalendarMonth { first })
    }

    pub fn days(&self) -> impl Iterator<Item = CalendarDate> + use<> {
        let first = self.first;
        (0..i64::from(self.days_in_month())).map(move |i| CalendarDate(first + Duration::days(i)))
    }
}

/// Inclusive range of dates the service will reason about, centred on today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub first: CalendarDate,
    pub last: CalendarDate,
}

impl DateWindow {
    /// `years` either side of `today`, clamped to the representable calendar.
    pub fn around(today: CalendarDate, years: u32) -> Self {
        let span = Months::new(years.saturating_mul(12));
        DateWindow {
            first: CalendarDate(today.0.checked_sub_months(span).unwrap_or(NaiveDate::MIN)),
            last: CalendarDate(today.0.checked_add_months(span).unwrap_or(NaiveDate::MAX)),
        }
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.first <= date && date <= self.last
    }

    /// True when any day of `month` falls inside the window.
    pub fn overlaps(&self, month: CalendarMonth) -> bool {
        month.first_day() <= self.last && month.last_day() >= self.first
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first.format("%Y-%m"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_date_parse_and_display() {
        let d = date("2025-11-03");
        assert_eq!(d.to_string(), "2025-11-03");
        assert!("2025-13-01".parse::<CalendarDate>().is_err());
        assert!("03/11/2025".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn test_date_serializes_as_iso_string() {
        let json = serde_json::to_string(&date("2026-01-02")).unwrap();
        assert_eq!(json, "\"2026-01-02\"");
        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date("2026-01-02"));
    }

    #[test]
    fn test_weekend_detection() {
        assert!(date("2025-11-01").is_weekend()); // Saturday
        assert!(date("2025-11-02").is_weekend()); // Sunday
        assert!(!date("2025-11-03").is_weekend()); // Monday
        assert!(!date("2025-11-07").is_weekend()); // Friday
    }

    #[test]
    fn test_month_bounds() {
        let nov = CalendarMonth::new(2025, 11).unwrap();
        assert_eq!(nov.first_day(), date("2025-11-01"));
        assert_eq!(nov.last_day(), date("2025-11-30"));
        assert_eq!(nov.days().count(), 30);

        let feb_leap = CalendarMonth::new(2024, 2).unwrap();
        assert_eq!(feb_leap.last_day(), date("2024-02-29"));
        let feb = CalendarMonth::new(2025, 2).unwrap();
        assert_eq!(feb.last_day(), date("2025-02-28"));

        assert!(CalendarMonth::new(2025, 0).is_none());
        assert!(CalendarMonth::new(2025, 13).is_none());
    }

    #[test]
    fn test_month_shift_crosses_year() {
        let dec = CalendarMonth::new(2025, 12).unwrap();
        let jan = dec.shift(MonthDirection::Forward).unwrap();
        assert_eq!((jan.year(), jan.month()), (2026, 1));
        assert_eq!(jan.shift(MonthDirection::Backward), Some(dec));
    }

    #[test]
    fn test_month_containing() {
        let m = CalendarMonth::containing(date("2025-11-28"));
        assert_eq!(m, CalendarMonth::new(2025, 11).unwrap());
        assert!(m.contains(date("2025-11-01")));
        assert!(!m.contains(date("2025-12-01")));
    }

    #[test]
    fn test_direction_wire_format() {
        let fwd: MonthDirection = serde_json::from_str("1").unwrap();
        let back: MonthDirection = serde_json::from_str("-1").unwrap();
        assert_eq!(fwd, MonthDirection::Forward);
        assert_eq!(back, MonthDirection::Backward);
        assert!(serde_json::from_str::<MonthDirection>("0").is_err());
        assert!(serde_json::from_str::<MonthDirection>("2").is_err());
        assert_eq!(serde_json::to_string(&MonthDirection::Backward).unwrap(), "-1");
    }

    #[test]
    fn test_date_window() {
        let window = DateWindow::around(date("2025-11-20"), 2);
        assert_eq!(window.first, date("2023-11-20"));
        assert_eq!(window.last, date("2027-11-20"));
        assert!(window.contains(date("2027-11-20")));
        assert!(!window.contains(date("2027-11-21")));
        assert!(!window.contains(CalendarDate(NaiveDate::from_ymd_opt(200_000, 1, 1).unwrap())));

        assert!(window.overlaps(CalendarMonth::new(2023, 11).unwrap()));
        assert!(!window.overlaps(CalendarMonth::new(2023, 10).unwrap()));
        assert!(!window.overlaps(CalendarMonth::new(NaiveDate::MAX.year(), 12).unwrap()));

        let wide = DateWindow::around(date("2025-11-20"), u32::MAX);
        assert_eq!((wide.first.0, wide.last.0), (NaiveDate::MIN, NaiveDate::MAX));
    }
}
