use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use sqlx::MySqlPool;
use tracing::{error, info};
use utoipa::{IntoParams, ToSchema};

use crate::analytics::context::{self, ContextFilter};
use crate::analytics::{exceptions, overtime};
use crate::api::error::ReportError;
use crate::export::csv::{exception_csv, overtime_csv};
use crate::export::{ExceptionReportResponse, OvertimeReportResponse, ReportFormat};
use crate::utils::period::ReportPeriod;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ReportQuery {
    #[schema(example = 1001)]
    /// Restrict the report to one employee
    pub employee_id: Option<u64>,
    #[schema(example = 10)]
    /// Restrict the report to one department
    pub department_id: Option<u64>,
    #[schema(example = "2024-03-01")]
    /// Period start (ISO date); used together with end_date
    pub start_date: Option<String>,
    #[schema(example = "2024-03-31")]
    /// Period end (ISO date); used together with start_date
    pub end_date: Option<String>,
    #[schema(example = "3")]
    /// Calendar month 1-12; used together with year when no explicit range is given
    pub month: Option<String>,
    #[schema(example = "2024")]
    /// Calendar year for the month parameter
    pub year: Option<String>,
    #[schema(example = "MISSED_PUNCH,SHORT_TIME")]
    /// Comma-separated exception type filter; ALL disables filtering
    pub exception_types: Option<String>,
    #[schema(example = "JSON")]
    /// Output format: JSON, CSV or EXCEL
    pub format: Option<String>,
}

impl ReportQuery {
    fn period(&self) -> ReportPeriod {
        ReportPeriod::resolve(
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            self.month.as_deref(),
            self.year.as_deref(),
        )
    }

    fn context_filter(&self) -> ContextFilter {
        ContextFilter {
            employee_id: self.employee_id,
            department_id: self.department_id,
        }
    }
}

fn excel_not_implemented() -> HttpResponse {
    HttpResponse::NotImplemented().json(serde_json::json!({
        "message": "Excel export is not implemented; request CSV or JSON instead"
    }))
}

/// Overtime report endpoint
#[utoipa::path(
    get,
    path = "/api/reports/overtime",
    params(ReportQuery),
    responses(
        (status = 200, description = "Overtime report for the resolved period", body = OvertimeReportResponse),
        (status = 501, description = "Excel export requested", body = Object, example = json!({
            "message": "Excel export is not implemented; request CSV or JSON instead"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reports"
)]
pub async fn overtime_report(
    pool: web::Data<MySqlPool>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    let period = query.period();
    let format = ReportFormat::from_query(query.format.as_deref());

    let ctx = context::build(pool.get_ref(), period, &query.context_filter())
        .await
        .map_err(|e| {
            error!(error = %e, "failed to build overtime report context");
            ReportError::from(e)
        })?;

    let outcome = overtime::compute(&ctx);
    info!(
        records = outcome.records.len(),
        skipped = outcome.skipped.total(),
        ?period,
        "overtime report computed"
    );

    Ok(match format {
        ReportFormat::Json => {
            HttpResponse::Ok().json(OvertimeReportResponse::new(period, outcome))
        }
        ReportFormat::Csv => HttpResponse::Ok()
            .content_type("text/csv")
            .body(overtime_csv(&outcome.records)),
        ReportFormat::Excel => excel_not_implemented(),
    })
}

/// Attendance exception report endpoint
#[utoipa::path(
    get,
    path = "/api/reports/exceptions",
    params(ReportQuery),
    responses(
        (status = 200, description = "Exception report for the resolved period", body = ExceptionReportResponse),
        (status = 501, description = "Excel export requested", body = Object, example = json!({
            "message": "Excel export is not implemented; request CSV or JSON instead"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reports"
)]
pub async fn exception_report(
    pool: web::Data<MySqlPool>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    let period = query.period();
    let format = ReportFormat::from_query(query.format.as_deref());
    let filter = query
        .exception_types
        .as_deref()
        .map(exceptions::parse_filter)
        .unwrap_or_default();

    let ctx = context::build(pool.get_ref(), period, &query.context_filter())
        .await
        .map_err(|e| {
            error!(error = %e, "failed to build exception report context");
            ReportError::from(e)
        })?;

    let outcome = exceptions::compute(&ctx, &filter);
    info!(
        records = outcome.records.len(),
        skipped = outcome.skipped.total(),
        ?period,
        "exception report computed"
    );

    Ok(match format {
        ReportFormat::Json => {
            HttpResponse::Ok().json(ExceptionReportResponse::new(period, outcome))
        }
        ReportFormat::Csv => HttpResponse::Ok()
            .content_type("text/csv")
            .body(exception_csv(&outcome.records)),
        ReportFormat::Excel => excel_not_implemented(),
    })
}
