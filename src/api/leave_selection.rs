use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::config::Config;
use crate::error::ApiError;
use crate::model::calendar::{CalendarDate, CalendarMonth, DateWindow, MonthDirection};
use crate::model::calendar_view::{DayCell, month_grid};
use crate::model::leave_request::LeaveDraft;
use crate::model::selection::{
    ClickOutcome, DateRangeSelector, SelectionContext, SelectionPhase,
};
use crate::utils::selection_store::{SelectionStore, lock};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct VisibleMonth {
    #[schema(example = 2025)]
    pub year: i32,
    #[schema(example = 11)]
    /// 1 = January
    pub month: u32,
}

impl VisibleMonth {
    fn to_month(self, window: &DateWindow) -> Result<CalendarMonth, ApiError> {
        CalendarMonth::new(self.year, self.month)
            .filter(|month| window.overlaps(*month))
            .ok_or(ApiError::InvalidMonth {
                year: self.year,
                month: self.month,
            })
    }
}

impl From<CalendarMonth> for VisibleMonth {
    fn from(month: CalendarMonth) -> Self {
        Self {
            year: month.year(),
            month: month.month(),
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct DateEvent {
    #[schema(example = "2025-11-03", format = "date", value_type = String)]
    pub date: CalendarDate,
    /// Month shown by the calendar; defaults to the month of `date`
    pub visible_month: Option<VisibleMonth>,
}

#[derive(Deserialize, ToSchema)]
pub struct ContinueRequest {
    #[schema(example = 2025)]
    pub year: i32,
    #[schema(example = 11)]
    pub month: u32,
    /// 1 = next month, -1 = previous month
    #[schema(example = 1, value_type = i8)]
    pub direction: MonthDirection,
}

#[derive(Deserialize, IntoParams)]
pub struct SelectionQuery {
    /// Year of the displayed month
    pub year: Option<i32>,
    /// Displayed month, 1-12
    pub month: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct ContinuationFlags {
    pub visible_month: VisibleMonth,
    /// "continue to next month" affordance
    pub forward: bool,
    /// "continue to previous month" affordance
    pub backward: bool,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "session_id": "5b0a3f0e-0d5c-4a53-9c55-0f5d8c0b8f0e",
    "phase": "anchored",
    "anchor_date": "2025-11-03",
    "preview_end_date": "2025-11-07",
    "preview_range": ["2025-11-03", "2025-11-04", "2025-11-06", "2025-11-07"],
    "confirmed_range": [],
    "is_active": true,
    "draft": null,
    "continuation": {
        "visible_month": { "year": 2025, "month": 11 },
        "forward": false,
        "backward": true
    }
}))]
pub struct SelectionResponse {
    #[schema(value_type = String)]
    pub session_id: Uuid,
    #[schema(example = "anchored", value_type = String)]
    pub phase: SelectionPhase,
    #[schema(format = "date", value_type = Option<String>)]
    pub anchor_date: Option<CalendarDate>,
    #[schema(format = "date", value_type = Option<String>)]
    pub preview_end_date: Option<CalendarDate>,
    #[schema(value_type = Vec<String>)]
    pub preview_range: Vec<CalendarDate>,
    #[schema(value_type = Vec<String>)]
    pub confirmed_range: Vec<CalendarDate>,
    pub is_active: bool,
    /// Present once a non-empty range has been confirmed
    pub draft: Option<LeaveDraft>,
    pub continuation: Option<ContinuationFlags>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClickStatus {
    Rejected,
    Anchored,
    Completed,
}

#[derive(Serialize, ToSchema)]
pub struct ClickResponse {
    pub outcome: ClickStatus,
    pub selection: SelectionResponse,
}

#[derive(Serialize, ToSchema)]
pub struct ContinueResponse {
    /// false when the selection could not be continued
    pub advanced: bool,
    pub visible_month: VisibleMonth,
    pub selection: SelectionResponse,
}

#[derive(Serialize, ToSchema)]
pub struct MonthGridResponse {
    pub visible_month: VisibleMonth,
    /// Monday-first weeks
    pub weeks: Vec<Vec<DayCell>>,
}

fn continuation(
    selector: &DateRangeSelector,
    month: Option<CalendarMonth>,
    ctx: &SelectionContext<'_>,
) -> Option<ContinuationFlags> {
    let month = month?;
    Some(ContinuationFlags {
        visible_month: month.into(),
        forward: selector.continuation_available(MonthDirection::Forward, month, ctx),
        backward: selector.continuation_available(MonthDirection::Backward, month, ctx),
    })
}

fn selection_response(
    session_id: Uuid,
    selector: &DateRangeSelector,
    continuation: Option<ContinuationFlags>,
) -> SelectionResponse {
    let state = selector.state();
    SelectionResponse {
        session_id,
        phase: selector.phase(),
        anchor_date: state.anchor_date,
        preview_end_date: state.preview_end_date,
        preview_range: selector.preview_range().to_vec(),
        confirmed_range: selector.confirmed_range().to_vec(),
        is_active: state.is_active,
        draft: LeaveDraft::from_range(selector.confirmed_range()),
        continuation,
    }
}

/// Visible month from the request, else the month holding `fallback`.
fn resolve_month(
    requested: Option<VisibleMonth>,
    fallback: Option<CalendarDate>,
    window: &DateWindow,
) -> Result<Option<CalendarMonth>, ApiError> {
    match requested {
        Some(month) => month.to_month(window).map(Some),
        None => Ok(fallback.map(CalendarMonth::containing)),
    }
}

fn check_event_date(date: CalendarDate, window: &DateWindow) -> Result<(), ApiError> {
    if window.contains(date) {
        return Ok(());
    }
    tracing::warn!(%date, first = %window.first, last = %window.last, "Event date out of range");
    Err(ApiError::BadPayload(format!(
        "date {} is outside {} to {}",
        date, window.first, window.last
    )))
}

/* =========================
Begin selection (enter apply-leave mode)
========================= */
#[utoipa::path(
    post,
    path = "/api/v1/leave/selection",
    responses(
        (status = 201, description = "Selection session created", body = SelectionResponse)
    ),
    tag = "Leave Selection"
)]
pub async fn begin_selection(store: web::Data<SelectionStore>) -> Result<HttpResponse, ApiError> {
    let (session_id, session) = store.create().await;
    let selector = lock(&session)?;

    Ok(HttpResponse::Created().json(selection_response(session_id, &selector, None)))
}

#[utoipa::path(
    get,
    path = "/api/v1/leave/selection/{session_id}",
    params(
        ("session_id" = String, Path, description = "Selection session id"),
        SelectionQuery
    ),
    responses(
        (status = 200, description = "Current selection state", body = SelectionResponse),
        (status = 400, description = "Invalid or half-specified month"),
        (status = 404, description = "Selection session not found", body = Object, example = json!({
            "message": "Selection session not found"
        }))
    ),
    tag = "Leave Selection"
)]
pub async fn get_selection(
    store: web::Data<SelectionStore>,
    config: web::Data<Config>,
    path: web::Path<Uuid>,
    query: web::Query<SelectionQuery>,
) -> Result<HttpResponse, ApiError> {
    let session_id = path.into_inner();
    let session = store.get(&session_id).await?;
    let ctx = config.selection_context();
    let selector = lock(&session)?;

    let requested = match (query.year, query.month) {
        (Some(year), Some(month)) => Some(VisibleMonth { year, month }),
        (None, None) => None,
        _ => {
            return Err(ApiError::BadPayload(
                "year and month must be given together".to_string(),
            ));
        }
    };
    let window = config.date_window(ctx.today);
    let month = resolve_month(requested, selector.state().preview_end_date, &window)?;
    let flags = continuation(&selector, month, &ctx);

    Ok(HttpResponse::Ok().json(selection_response(session_id, &selector, flags)))
}

/* =========================
Click a calendar cell
========================= */
#[utoipa::path(
    post,
    path = "/api/v1/leave/selection/{session_id}/click",
    params(
        ("session_id" = String, Path, description = "Selection session id")
    ),
    request_body(
        content = DateEvent,
        description = "Clicked date",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Click handled; a rejected click leaves the selection unchanged", body = ClickResponse),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Selection session not found")
    ),
    tag = "Leave Selection"
)]
#[tracing::instrument(
    name = "leave_click",
    skip(store, config, path, payload),
    fields(session_id = %path)
)]
pub async fn click_date(
    store: web::Data<SelectionStore>,
    config: web::Data<Config>,
    path: web::Path<Uuid>,
    payload: web::Json<DateEvent>,
) -> Result<HttpResponse, ApiError> {
    let session_id = path.into_inner();
    let session = store.get(&session_id).await?;
    let ctx = config.selection_context();
    let window = config.date_window(ctx.today);
    check_event_date(payload.date, &window)?;
    let month = resolve_month(payload.visible_month, Some(payload.date), &window)?;
    let mut selector = lock(&session)?;

    let outcome = match selector.handle_date_click(payload.date, &ctx) {
        ClickOutcome::Rejected => {
            tracing::debug!(date = %payload.date, "Anchor click rejected");
            ClickStatus::Rejected
        }
        ClickOutcome::Anchored => {
            tracing::debug!(date = %payload.date, "Selection anchored");
            ClickStatus::Anchored
        }
        ClickOutcome::Completed(range) => {
            tracing::info!(days = range.len(), "Leave selection completed");
            ClickStatus::Completed
        }
    };
    let flags = continuation(&selector, month, &ctx);

    Ok(HttpResponse::Ok().json(ClickResponse {
        outcome,
        selection: selection_response(session_id, &selector, flags),
    }))
}

/* =========================
Hover preview
========================= */
#[utoipa::path(
    post,
    path = "/api/v1/leave/selection/{session_id}/hover",
    params(
        ("session_id" = String, Path, description = "Selection session id")
    ),
    request_body(
        content = DateEvent,
        description = "Hovered date",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Preview recomputed (unchanged when no selection is active)", body = SelectionResponse),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Selection session not found")
    ),
    tag = "Leave Selection"
)]
pub async fn hover_date(
    store: web::Data<SelectionStore>,
    config: web::Data<Config>,
    path: web::Path<Uuid>,
    payload: web::Json<DateEvent>,
) -> Result<HttpResponse, ApiError> {
    let session_id = path.into_inner();
    let session = store.get(&session_id).await?;
    let ctx = config.selection_context();
    let window = config.date_window(ctx.today);
    check_event_date(payload.date, &window)?;
    let month = resolve_month(payload.visible_month, Some(payload.date), &window)?;
    let mut selector = lock(&session)?;

    if selector.handle_date_hover(payload.date, &ctx).is_none() {
        tracing::trace!(%session_id, date = %payload.date, "Hover ignored, no active selection");
    }
    let flags = continuation(&selector, month, &ctx);

    Ok(HttpResponse::Ok().json(selection_response(session_id, &selector, flags)))
}

/* =========================
Continue across a month boundary
========================= */
#[utoipa::path(
    post,
    path = "/api/v1/leave/selection/{session_id}/continue",
    params(
        ("session_id" = String, Path, description = "Selection session id")
    ),
    request_body(
        content = ContinueRequest,
        description = "Displayed month and navigation direction",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Continuation handled", body = ContinueResponse),
        (status = 400, description = "Invalid month or direction"),
        (status = 404, description = "Selection session not found")
    ),
    tag = "Leave Selection"
)]
pub async fn continue_selection(
    store: web::Data<SelectionStore>,
    config: web::Data<Config>,
    path: web::Path<Uuid>,
    payload: web::Json<ContinueRequest>,
) -> Result<HttpResponse, ApiError> {
    let session_id = path.into_inner();
    let session = store.get(&session_id).await?;
    let ctx = config.selection_context();
    let visible = VisibleMonth {
        year: payload.year,
        month: payload.month,
    }
    .to_month(&config.date_window(ctx.today))?;
    let mut selector = lock(&session)?;

    let advanced_to =
        selector.handle_month_boundary_continuation(payload.direction, visible, &ctx);
    match advanced_to {
        Some(month) => tracing::debug!(
            %session_id,
            direction = %payload.direction,
            month = %month,
            "Selection continued into adjacent month"
        ),
        None => tracing::debug!(%session_id, month = %visible, "Continuation not available"),
    }

    let month = advanced_to.unwrap_or(visible);
    let flags = continuation(&selector, Some(month), &ctx);

    Ok(HttpResponse::Ok().json(ContinueResponse {
        advanced: advanced_to.is_some(),
        visible_month: month.into(),
        selection: selection_response(session_id, &selector, flags),
    }))
}

/* =========================
Cancel / leave apply mode
========================= */
#[utoipa::path(
    post,
    path = "/api/v1/leave/selection/{session_id}/cancel",
    params(
        ("session_id" = String, Path, description = "Selection session id")
    ),
    responses(
        (status = 200, description = "Selection cleared", body = SelectionResponse),
        (status = 404, description = "Selection session not found")
    ),
    tag = "Leave Selection"
)]
pub async fn cancel_selection(
    store: web::Data<SelectionStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let session_id = path.into_inner();
    let session = store.get(&session_id).await?;
    let mut selector = lock(&session)?;

    selector.cancel_selection();
    tracing::debug!(%session_id, "Selection cancelled");

    Ok(HttpResponse::Ok().json(selection_response(session_id, &selector, None)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/leave/selection/{session_id}",
    params(
        ("session_id" = String, Path, description = "Selection session id")
    ),
    responses(
        (status = 200, description = "Selection session closed", body = Object, example = json!({
            "message": "Selection session closed"
        })),
        (status = 404, description = "Selection session not found")
    ),
    tag = "Leave Selection"
)]
pub async fn end_selection(
    store: web::Data<SelectionStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let session_id = path.into_inner();
    store.remove(&session_id).await?;
    tracing::debug!(%session_id, "Selection session closed");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Selection session closed"
    })))
}

/* =========================
Month grid
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/leave/selection/{session_id}/calendar/{year}/{month}",
    params(
        ("session_id" = String, Path, description = "Selection session id"),
        ("year" = i32, Path, description = "Year"),
        ("month" = u32, Path, description = "Month, 1-12")
    ),
    responses(
        (status = 200, description = "Calendar cells for the month", body = MonthGridResponse),
        (status = 400, description = "Invalid month"),
        (status = 404, description = "Selection session not found")
    ),
    tag = "Leave Selection"
)]
pub async fn calendar_month(
    store: web::Data<SelectionStore>,
    config: web::Data<Config>,
    path: web::Path<(Uuid, i32, u32)>,
) -> Result<HttpResponse, ApiError> {
    let (session_id, year, month) = path.into_inner();
    let ctx = config.selection_context();
    let visible = VisibleMonth { year, month }.to_month(&config.date_window(ctx.today))?;
    let session = store.get(&session_id).await?;
    let selector = lock(&session)?;

    Ok(HttpResponse::Ok().json(MonthGridResponse {
        visible_month: visible.into(),
        weeks: month_grid(visible, &selector, &ctx),
    }))
}
