use crate::api::holiday::{HolidayListResponse, HolidayResponse};
use crate::api::leave_selection::{
    ClickResponse, ClickStatus, ContinuationFlags, ContinueRequest, ContinueResponse, DateEvent,
    MonthGridResponse, SelectionResponse, VisibleMonth,
};
use crate::model::calendar_view::DayCell;
use crate::model::leave_request::LeaveDraft;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRM Leave Calendar API",
        version = "1.0.0",
        description = r#"
## Leave date selection

Backs the **apply leave** calendar of the HRM system. The calendar only renders;
every click and hover is sent here and the answer says what to highlight.

### 🔹 Flow
- `POST /leave/selection` opens a selection session
- first **click** on a future business day anchors the selection
- **hover** previews the range between anchor and pointer
- second **click** confirms the range and returns a leave draft
- **continue** carries an active selection into the next/previous month

### 📅 Rules
- weekends, holidays and dates up to today are never part of a range
- an invalid first click is ignored (`outcome = rejected`)
- a range with no business day is empty, not an error

---
Built with **Rust**, **Actix Web** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_selection::begin_selection,
        crate::api::leave_selection::get_selection,
        crate::api::leave_selection::click_date,
        crate::api::leave_selection::hover_date,
        crate::api::leave_selection::continue_selection,
        crate::api::leave_selection::cancel_selection,
        crate::api::leave_selection::end_selection,
        crate::api::leave_selection::calendar_month,

        crate::api::holiday::list_holidays
    ),
    components(
        schemas(
            SelectionResponse,
            ClickResponse,
            ClickStatus,
            ContinueRequest,
            ContinueResponse,
            ContinuationFlags,
            DateEvent,
            VisibleMonth,
            MonthGridResponse,
            DayCell,
            LeaveDraft,
            HolidayResponse,
            HolidayListResponse
        )
    ),
    tags(
        (name = "Leave Selection", description = "Leave date range selection APIs"),
        (name = "Holidays", description = "Holiday calendar APIs"),
    )
)]
pub struct ApiDoc;
