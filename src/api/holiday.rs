use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::Config;

#[derive(Serialize, ToSchema)]
pub struct HolidayResponse {
    #[schema(example = "2025-12-16", format = "date")]
    pub date: String,
    #[schema(example = "Victory Day", nullable = true)]
    pub name: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct HolidayListResponse {
    pub holidays: Vec<HolidayResponse>,
    #[schema(example = 1)]
    pub count: usize,
    /// Reference date; only days after it can be selected
    #[schema(example = "2025-11-01", format = "date")]
    pub today: String,
}

/// Holidays excluded from leave selection
#[utoipa::path(
    get,
    path = "/api/v1/leave/holidays",
    responses(
        (status = 200, description = "Configured holidays, ascending", body = HolidayListResponse)
    ),
    tag = "Holidays"
)]
pub async fn list_holidays(config: web::Data<Config>) -> impl Responder {
    let holidays: Vec<HolidayResponse> = config
        .holidays
        .iter()
        .map(|(date, name)| HolidayResponse {
            date: date.to_string(),
            name: name.map(str::to_owned),
        })
        .collect();

    HttpResponse::Ok().json(HolidayListResponse {
        count: holidays.len(),
        holidays,
        today: config.today().to_string(),
    })
}
