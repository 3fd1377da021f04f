use serde::Serialize;
use utoipa::ToSchema;

use crate::model::calendar::CalendarDate;

/// What a confirmed selection hands to the leave submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[schema(example = json!({
    "start_date": "2025-11-03",
    "end_date": "2025-11-07",
    "dates": ["2025-11-03", "2025-11-04", "2025-11-06", "2025-11-07"],
    "total_days": 4
}))]
pub struct LeaveDraft {
    #[schema(example = "2025-11-03", format = "date", value_type = String)]
    pub start_date: CalendarDate,
    #[schema(example = "2025-11-07", format = "date", value_type = String)]
    pub end_date: CalendarDate,
    #[schema(value_type = Vec<String>)]
    pub dates: Vec<CalendarDate>,
    /// business days, not the calendar span
    pub total_days: usize,
}

impl LeaveDraft {
    /// `None` for an empty range: nothing to submit.
    pub fn from_range(range: &[CalendarDate]) -> Option<Self> {
        let (first, last) = (range.first()?, range.last()?);
        Some(Self {
            start_date: *first,
            end_date: *last,
            dates: range.to_vec(),
            total_days: range.len(),
        })
    }
}
