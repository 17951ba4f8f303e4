pub mod csv;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::analytics::exceptions::{ExceptionOutcome, ExceptionRecord};
use crate::analytics::overtime::{OvertimeOutcome, OvertimeRecord};
use crate::analytics::SkippedRecords;
use crate::utils::period::ReportPeriod;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum ReportFormat {
    Json,
    Csv,
    Excel,
}

impl ReportFormat {
    /// Missing or unrecognized `format` values degrade to JSON, matching
    /// how period input degrades to the current month.
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse().ok()).unwrap_or(Self::Json)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OvertimeReportResponse {
    #[schema(example = "7f8d2c1e-4f7a-4b36-9f0a-2f4f1f6f8a2e")]
    pub report_id: String,
    #[schema(example = "2024-04-01T08:30:00Z", value_type = String, format = "date-time")]
    pub generated_at: DateTime<Utc>,
    #[schema(example = "2024-03-01", value_type = String, format = "date")]
    pub period_start: NaiveDate,
    #[schema(example = "2024-03-31", value_type = String, format = "date")]
    pub period_end: NaiveDate,
    #[schema(example = 12)]
    pub total_records: usize,
    #[schema(example = 18.5)]
    pub total_overtime_hours: f64,
    #[schema(example = 1)]
    pub total_skipped: u32,
    pub skipped: SkippedRecords,
    pub records: Vec<OvertimeRecord>,
}

impl OvertimeReportResponse {
    pub fn new(period: ReportPeriod, outcome: OvertimeOutcome) -> Self {
        Self {
            report_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            period_start: period.start,
            period_end: period.end,
            total_records: outcome.records.len(),
            total_overtime_hours: outcome.total_hours(),
            total_skipped: outcome.skipped.total(),
            skipped: outcome.skipped,
            records: outcome.records,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExceptionReportResponse {
    #[schema(example = "7f8d2c1e-4f7a-4b36-9f0a-2f4f1f6f8a2e")]
    pub report_id: String,
    #[schema(example = "2024-04-01T08:30:00Z", value_type = String, format = "date-time")]
    pub generated_at: DateTime<Utc>,
    #[schema(example = "2024-03-01", value_type = String, format = "date")]
    pub period_start: NaiveDate,
    #[schema(example = "2024-03-31", value_type = String, format = "date")]
    pub period_end: NaiveDate,
    #[schema(example = 4)]
    pub total_records: usize,
    #[schema(example = 0)]
    pub total_skipped: u32,
    pub skipped: SkippedRecords,
    pub records: Vec<ExceptionRecord>,
}

impl ExceptionReportResponse {
    pub fn new(period: ReportPeriod, outcome: ExceptionOutcome) -> Self {
        Self {
            report_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            period_start: period.start,
            period_end: period.end,
            total_records: outcome.records.len(),
            total_skipped: outcome.skipped.total(),
            skipped: outcome.skipped,
            records: outcome.records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parsing_is_case_insensitive_with_json_fallback() {
        assert_eq!(ReportFormat::from_query(Some("CSV")), ReportFormat::Csv);
        assert_eq!(ReportFormat::from_query(Some("csv")), ReportFormat::Csv);
        assert_eq!(ReportFormat::from_query(Some("Excel")), ReportFormat::Excel);
        assert_eq!(ReportFormat::from_query(Some("JSON")), ReportFormat::Json);
        assert_eq!(ReportFormat::from_query(Some("xlsx")), ReportFormat::Json);
        assert_eq!(ReportFormat::from_query(None), ReportFormat::Json);
    }

    #[test]
    fn overtime_envelope_carries_totals_and_period() {
        let period = ReportPeriod::month(2024, 3).unwrap();
        let response = OvertimeReportResponse::new(period, OvertimeOutcome::default());
        assert_eq!(response.period_start, period.start);
        assert_eq!(response.period_end, period.end);
        assert_eq!(response.total_records, 0);
        assert_eq!(response.total_overtime_hours, 0.0);
        assert_eq!(response.total_skipped, 0);
        assert!(!response.report_id.is_empty());
    }
}
