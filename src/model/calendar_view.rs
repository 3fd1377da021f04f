use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::calendar::{CalendarDate, CalendarMonth};
use crate::model::selection::{DateRangeSelector, SelectionContext};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DayCell {
    #[schema(example = "2025-11-03", format = "date", value_type = String)]
    pub date: CalendarDate,
    /// false for the leading/trailing days of neighbouring months
    pub in_month: bool,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub is_past: bool,
    pub is_selectable: bool,
    pub is_anchor: bool,
    pub in_preview: bool,
    pub in_confirmed: bool,
}

/// Monday-first weeks covering `month`, each cell flagged from the
/// selector's current state.
pub fn month_grid(
    month: CalendarMonth,
    selector: &DateRangeSelector,
    ctx: &SelectionContext<'_>,
) -> Vec<Vec<DayCell>> {
    let first = month.first_day().0;
    let last = month.last_day().0;
    // padding weeks are cut short at the ends of the representable calendar
    let start = first
        .checked_sub_days(Days::new(u64::from(first.weekday().num_days_from_monday())))
        .unwrap_or(NaiveDate::MIN);
    let end = last
        .checked_add_days(Days::new(u64::from(6 - last.weekday().num_days_from_monday())))
        .unwrap_or(NaiveDate::MAX);

    let state = selector.state();
    let cells: Vec<DayCell> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(CalendarDate)
        .map(|date| DayCell {
            date,
            in_month: month.contains(date),
            is_weekend: date.is_weekend(),
            is_holiday: ctx.holidays.contains(&date),
            is_past: date <= ctx.today,
            is_selectable: ctx.is_selectable(date),
            is_anchor: state.anchor_date == Some(date),
            in_preview: state.preview_range.binary_search(&date).is_ok(),
            in_confirmed: state.confirmed_range.binary_search(&date).is_ok(),
        })
        .collect();

    cells.chunks(7).map(<[DayCell]>::to_vec).collect()
}
