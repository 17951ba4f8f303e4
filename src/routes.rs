use crate::{api::reports, config::Config};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-scope limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    // Report generation is the expensive path; keep it behind a limiter.
    let report_limiter = build_limiter(config.rate_report_per_min);

    cfg.service(
        web::scope(&config.api_prefix).service(
            web::scope("/reports")
                .wrap(report_limiter)
                // /reports/overtime
                .service(
                    web::resource("/overtime").route(web::get().to(reports::overtime_report)),
                )
                // /reports/exceptions
                .service(
                    web::resource("/exceptions").route(web::get().to(reports::exception_report)),
                ),
        ),
    );
}
