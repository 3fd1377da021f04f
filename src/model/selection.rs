//! Two-click leave date selection.
//!
//! The first valid click anchors the selection, hovering previews the range
//! and the second click closes it. Every range only ever holds business days
//! strictly after today.

use serde::Serialize;

use crate::model::calendar::{CalendarDate, CalendarMonth, MonthDirection};
use crate::model::holiday::HolidaySet;

/// Host-supplied inputs for one event.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    pub holidays: &'a HolidaySet,
    pub today: CalendarDate,
}

impl SelectionContext<'_> {
    pub fn is_selectable(&self, date: CalendarDate) -> bool {
        is_selectable(date, self.holidays, self.today)
    }

    pub fn range(&self, start: CalendarDate, end: CalendarDate) -> Vec<CalendarDate> {
        compute_range(start, end, self.holidays, self.today)
    }
}

/// A business day strictly after `today`.
pub fn is_selectable(date: CalendarDate, holidays: &HolidaySet, today: CalendarDate) -> bool {
    date > today && !date.is_weekend() && !holidays.contains(&date)
}

/// Selectable days between `start` and `end` inclusive, ascending, whatever
/// order the endpoints come in.
pub fn compute_range(
    start: CalendarDate,
    end: CalendarDate,
    holidays: &HolidaySet,
    today: CalendarDate,
) -> Vec<CalendarDate> {
    let (from, to) = if start <= end { (start, end) } else { (end, start) };

    from.0
        .iter_days()
        .take_while(|d| *d <= to.0)
        .map(CalendarDate)
        .filter(|d| is_selectable(*d, holidays, today))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SelectionPhase {
    Idle,
    Anchored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Invalid anchor, nothing changed
    Rejected,
    Anchored,
    /// Selection closed; may be empty when no business day was in the span
    Completed(Vec<CalendarDate>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub anchor_date: Option<CalendarDate>,
    pub preview_end_date: Option<CalendarDate>,
    pub preview_range: Vec<CalendarDate>,
    pub confirmed_range: Vec<CalendarDate>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DateRangeSelector {
    state: SelectionState,
}

impl DateRangeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn phase(&self) -> SelectionPhase {
        if self.state.is_active && self.state.anchor_date.is_some() {
            SelectionPhase::Anchored
        } else {
            SelectionPhase::Idle
        }
    }

    pub fn preview_range(&self) -> &[CalendarDate] {
        &self.state.preview_range
    }

    pub fn confirmed_range(&self) -> &[CalendarDate] {
        &self.state.confirmed_range
    }

    /// Enter apply-leave mode with a clean slate.
    pub fn begin_selection(&mut self) {
        self.state = SelectionState::default();
    }

    pub fn cancel_selection(&mut self) {
        self.state = SelectionState::default();
    }

    pub fn handle_date_click(&mut self, date: CalendarDate, ctx: &SelectionContext<'_>) -> ClickOutcome {
        match self.state.anchor_date {
            None => {
                if !ctx.is_selectable(date) {
                    return ClickOutcome::Rejected;
                }
                self.state = SelectionState {
                    anchor_date: Some(date),
                    preview_end_date: Some(date),
                    preview_range: vec![date],
                    confirmed_range: Vec::new(),
                    is_active: true,
                };
                ClickOutcome::Anchored
            }
            Some(anchor) => {
                let range = ctx.range(anchor, date);
                self.state = SelectionState {
                    confirmed_range: range.clone(),
                    ..SelectionState::default()
                };
                ClickOutcome::Completed(range)
            }
        }
    }

    /// Recompute the preview up to `date`. `None` when no selection is active.
    pub fn handle_date_hover(
        &mut self,
        date: CalendarDate,
        ctx: &SelectionContext<'_>,
    ) -> Option<&[CalendarDate]> {
        let anchor = self.active_anchor()?;
        self.state.preview_end_date = Some(date);
        self.state.preview_range = ctx.range(anchor, date);
        Some(&self.state.preview_range)
    }

    /// True when nothing selectable is left past the preview end in the
    /// visible month, so the selection can only go on in the adjacent month.
    /// Going backward also needs the previous month to reach past today.
    pub fn continuation_available(
        &self,
        direction: MonthDirection,
        visible: CalendarMonth,
        ctx: &SelectionContext<'_>,
    ) -> bool {
        if self.active_anchor().is_none() {
            return false;
        }
        let Some(end) = self.state.preview_end_date else {
            return false;
        };
        if !visible.contains(end) {
            return false;
        }
        let Some(adjacent) = visible.shift(direction) else {
            return false;
        };

        match direction {
            MonthDirection::Forward => visible
                .days()
                .filter(|d| *d > end)
                .all(|d| !ctx.is_selectable(d)),
            MonthDirection::Backward => {
                adjacent.last_day() > ctx.today
                    && visible
                        .days()
                        .filter(|d| *d < end)
                        .all(|d| !ctx.is_selectable(d))
            }
        }
    }

    /// Move the preview end onto the adjacent month and return that month
    /// for display. The anchor never moves.
    pub fn handle_month_boundary_continuation(
        &mut self,
        direction: MonthDirection,
        visible: CalendarMonth,
        ctx: &SelectionContext<'_>,
    ) -> Option<CalendarMonth> {
        if !self.continuation_available(direction, visible, ctx) {
            return None;
        }
        let anchor = self.active_anchor()?;
        let target = visible.shift(direction)?;
        let new_end = match direction {
            MonthDirection::Forward => target.first_day(),
            MonthDirection::Backward => target.last_day(),
        };

        self.state.preview_end_date = Some(new_end);
        self.state.preview_range = ctx.range(anchor, new_end);
        Some(target)
    }

    fn active_anchor(&self) -> Option<CalendarDate> {
        if self.state.is_active {
            self.state.anchor_date
        } else {
            None
        }
    }
}
