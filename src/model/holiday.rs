use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::calendar::CalendarDate;

/// Holiday entry as found in the holiday JSON file
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayEntry {
    pub date: CalendarDate,
    #[serde(default)]
    pub name: Option<String>,
}

/// Dates excluded from leave selection. Read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct HolidaySet {
    days: BTreeMap<CalendarDate, Option<String>>,
}

impl HolidaySet {
    pub fn from_dates<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = CalendarDate>,
    {
        Self {
            days: dates.into_iter().map(|d| (d, None)).collect(),
        }
    }

    /// Named entries win over unnamed ones for the same date.
    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = HolidayEntry>,
    {
        for entry in entries {
            let slot = self.days.entry(entry.date).or_insert(None);
            if entry.name.is_some() {
                *slot = entry.name;
            }
        }
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.days.contains_key(date)
    }

    /// Ascending by date
    pub fn iter(&self) -> impl Iterator<Item = (&CalendarDate, Option<&str>)> {
        self.days.iter().map(|(d, name)| (d, name.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Parse a comma separated list of ISO dates, e.g. `2025-12-25,2026-01-01`.
pub fn parse_holiday_list(raw: &str) -> Result<Vec<HolidayEntry>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let date = s
                .parse::<CalendarDate>()
                .with_context(|| format!("invalid holiday date '{}'", s))?;
            Ok(HolidayEntry { date, name: None })
        })
        .collect()
}

pub fn parse_holiday_json(raw: &str) -> Result<Vec<HolidayEntry>> {
    serde_json::from_str(raw).context("holiday file must be a JSON array of {date, name}")
}

pub fn load_holiday_file(path: impl AsRef<Path>) -> Result<Vec<HolidayEntry>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read holiday file {}", path.display()))?;
    parse_holiday_json(&raw).with_context(|| format!("in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_holiday_list() {
        let entries = parse_holiday_list(" 2025-12-25, 2026-01-01 ,,").unwrap();
        let dates: Vec<_> = entries.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date("2025-12-25"), date("2026-01-01")]);
        assert!(parse_holiday_list("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_holiday_list_rejects_bad_date() {
        let err = parse_holiday_list("2025-12-25,2025-02-30").unwrap_err();
        assert!(err.to_string().contains("2025-02-30"));
    }

    #[test]
    fn test_parse_holiday_json() {
        let entries = parse_holiday_json(
            r#"[{"date": "2025-12-16", "name": "Victory Day"}, {"date": "2025-12-25"}]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name.as_deref(), Some("Victory Day"));
        assert_eq!(entries[1].name, None);
        assert!(parse_holiday_json(r#"{"date": "2025-12-16"}"#).is_err());
    }

    #[test]
    fn test_set_merges_and_orders() {
        let mut set = HolidaySet::from_dates([date("2025-12-25"), date("2025-11-05")]);
        set.extend(vec![HolidayEntry {
            date: date("2025-12-25"),
            name: Some("Christmas".into()),
        }]);

        assert_eq!(set.len(), 2);
        assert!(set.contains(&date("2025-11-05")));
        assert!(!set.contains(&date("2025-11-06")));

        let listed: Vec<_> = set.iter().map(|(d, n)| (d.to_string(), n.map(str::to_owned))).collect();
        assert_eq!(
            listed,
            vec![
                ("2025-11-05".to_string(), None),
                ("2025-12-25".to_string(), Some("Christmas".to_string())),
            ]
        );
    }
}
