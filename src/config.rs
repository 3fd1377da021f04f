use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use dotenvy::dotenv;

use crate::model::calendar::{CalendarDate, DateWindow};
use crate::model::holiday::{self, HolidaySet};
use crate::model::selection::SelectionContext;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,
    pub log_dir: String,

    pub holidays: Arc<HolidaySet>,
    /// Pins "today"; the local date is used when unset
    pub today_override: Option<CalendarDate>,

    // Selection sessions
    pub selection_ttl_secs: u64,
    pub selection_max_sessions: u64,
    /// How far from today event dates and months may lie
    pub selection_max_years: u32,

    // Rate limiting
    pub rate_protected_per_min: u32,
    pub rate_hover_per_min: u32,
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} has invalid value '{}': {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let mut holidays = HolidaySet::default();
        if let Ok(list) = env::var("HOLIDAYS") {
            holidays.extend(holiday::parse_holiday_list(&list).context("HOLIDAYS")?);
        }
        if let Ok(path) = env::var("HOLIDAYS_FILE") {
            holidays.extend(holiday::load_holiday_file(&path)?);
        }

        let today_override = match env::var("LEAVE_TODAY") {
            Ok(raw) => Some(
                raw.parse::<CalendarDate>()
                    .with_context(|| format!("LEAVE_TODAY has invalid date '{}'", raw))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            server_addr: env_or("SERVER_ADDR", "127.0.0.1:8080".to_string())?,
            api_prefix: env_or("API_PREFIX", "/api/v1".to_string())?,
            log_dir: env_or("LOG_DIR", "logs".to_string())?,
            holidays: Arc::new(holidays),
            today_override,
            selection_ttl_secs: env_or("SELECTION_TTL_SECS", 1800)?, // 30 min idle
            selection_max_sessions: env_or("SELECTION_MAX_SESSIONS", 10_000)?,
            selection_max_years: env_or("SELECTION_MAX_YEARS", 2)?,
            rate_protected_per_min: env_or("RATE_PROTECTED_PER_MIN", 1000)?,
            rate_hover_per_min: env_or("RATE_HOVER_PER_MIN", 6000)?,
        })
    }

    pub fn today(&self) -> CalendarDate {
        self.today_override.unwrap_or_else(CalendarDate::today)
    }

    pub fn date_window(&self, today: CalendarDate) -> DateWindow {
        DateWindow::around(today, self.selection_max_years)
    }

    pub fn selection_context(&self) -> SelectionContext<'_> {
        SelectionContext {
            holidays: &self.holidays,
            today: self.today(),
        }
    }
}

#[cfg(test)]
impl Config {
    /// Fixed calendar for handler tests
    pub fn for_tests(today: &str, holidays: &[&str]) -> Self {
        let holidays = holidays
            .iter()
            .map(|s| s.parse().expect("holiday date"))
            .collect::<Vec<CalendarDate>>();
        Self {
            server_addr: "127.0.0.1:0".to_string(),
            api_prefix: "/api/v1".to_string(),
            log_dir: "logs".to_string(),
            holidays: Arc::new(HolidaySet::from_dates(holidays)),
            today_override: Some(today.parse().expect("today date")),
            selection_ttl_secs: 60,
            selection_max_sessions: 100,
            selection_max_years: 2,
            rate_protected_per_min: 60_000,
            rate_hover_per_min: 60_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinned_today_feeds_context() {
        let config = Config::for_tests("2025-11-01", &["2025-11-05"]);
        let ctx = config.selection_context();
        assert_eq!(ctx.today.to_string(), "2025-11-01");
        assert!(!ctx.is_selectable("2025-11-05".parse().unwrap()));
        assert!(ctx.is_selectable("2025-11-04".parse().unwrap()));

        let window = config.date_window(ctx.today);
        assert_eq!(window.last.to_string(), "2027-11-01");
    }

    #[test]
    fn test_env_or_default_and_error() {
        assert_eq!(env_or("HRM_LEAVE_TEST_UNSET_VAR", 42u32).unwrap(), 42);
        // SAFETY: the variable name is unique to this test
        unsafe { env::set_var("HRM_LEAVE_TEST_BAD_VAR", "many") };
        assert!(env_or("HRM_LEAVE_TEST_BAD_VAR", 1u32).is_err());
    }
}
