use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "Selection session not found")]
    SessionNotFound,
    #[display(fmt = "Invalid month: {}-{}", year, month)]
    InvalidMonth { year: i32, month: u32 },
    #[display(fmt = "{}", _0)]
    BadPayload(String),
    #[display(fmt = "Internal Server Error")]
    SessionPoisoned,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::SessionNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidMonth { .. } | ApiError::BadPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::SessionPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
