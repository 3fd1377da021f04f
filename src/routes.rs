use crate::{
    api::{holiday, leave_selection},
    config::Config,
    error::ApiError,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

// Helper to build per-route limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / u64::from(requests_per_min)).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("period and burst size are non-zero");
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Malformed bodies, paths and queries answer with the same JSON shape as ApiError
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadPayload(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| ApiError::BadPayload(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::BadPayload(err.to_string()).into()),
    );

    cfg.service(
        web::scope(&config.api_prefix)
            // hover fires on every pointer move, so it gets its own bucket
            .service(
                web::resource("/leave/selection/{id}/hover")
                    .wrap(build_limiter(config.rate_hover_per_min))
                    .route(web::post().to(leave_selection::hover_date)),
            )
            .service(
                web::scope("/leave")
                    .wrap(build_limiter(config.rate_protected_per_min))
                    // /leave/holidays
                    .service(
                        web::resource("/holidays").route(web::get().to(holiday::list_holidays)),
                    )
                    // /leave/selection
                    .service(
                        web::resource("/selection")
                            .route(web::post().to(leave_selection::begin_selection)),
                    )
                    // /leave/selection/{id}
                    .service(
                        web::resource("/selection/{id}")
                            .route(web::get().to(leave_selection::get_selection))
                            .route(web::delete().to(leave_selection::end_selection)),
                    )
                    // /leave/selection/{id}/click
                    .service(
                        web::resource("/selection/{id}/click")
                            .route(web::post().to(leave_selection::click_date)),
                    )
                    // /leave/selection/{id}/continue
                    .service(
                        web::resource("/selection/{id}/continue")
                            .route(web::post().to(leave_selection::continue_selection)),
                    )
                    // /leave/selection/{id}/cancel
                    .service(
                        web::resource("/selection/{id}/cancel")
                            .route(web::post().to(leave_selection::cancel_selection)),
                    )
                    // /leave/selection/{id}/calendar/{year}/{month}
                    .service(
                        web::resource("/selection/{id}/calendar/{year}/{month}")
                            .route(web::get().to(leave_selection::calendar_month)),
                    ),
            ),
    );
}

// APPLY LEAVE
//  ├─ POST /leave/selection            -> session id
//  ├─ POST /leave/selection/{id}/click -> anchor
//  ├─ POST /leave/selection/{id}/hover -> preview (repeat)
//  ├─ POST /leave/selection/{id}/continue when the preview sits at the month edge
//  └─ POST /leave/selection/{id}/click -> confirmed range + draft
