use chrono::NaiveDate;
use serde::Serialize;
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::analytics::{ReportContext, SkippedRecords};
use crate::model::attendance::AttendanceRecord;
use crate::model::shift::Shift;

/// A record classifies as SHORT_TIME when it worked less than this share
/// of the expected shift length.
pub const SHORT_TIME_RATIO: f64 = 0.8;

/// Shift name reported when no assignment covers the record's date.
pub const NOT_ASSIGNED: &str = "Not Assigned";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString, ToSchema,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExceptionKind {
    MissedPunch,
    ShortTime,
    Late,
    Unknown,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExceptionRecord {
    #[schema(example = 1001)]
    pub employee_id: u64,
    #[schema(example = "EMP-001")]
    pub employee_code: String,
    #[schema(example = "John Doe")]
    pub employee_name: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "2024-03-05", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "Day Shift")]
    pub shift_name: String,
    #[schema(example = 480)]
    pub expected_minutes: i64,
    #[schema(example = 310)]
    pub actual_minutes: i64,
    pub kind: ExceptionKind,
    #[schema(example = false)]
    pub weekly_rest: bool,
    #[schema(example = "Worked 310 of 480 expected minutes")]
    pub details: String,
}

#[derive(Debug, Default)]
pub struct ExceptionOutcome {
    pub records: Vec<ExceptionRecord>,
    pub skipped: SkippedRecords,
}

/// Classifies every record flagged by the time-capture process (missed
/// punch or linked exception). Shift resolution is optional here: a record
/// with no covering assignment reports "Not Assigned" with zero expected
/// minutes rather than being skipped.
pub fn compute(ctx: &ReportContext, filter: &[ExceptionKind]) -> ExceptionOutcome {
    let mut outcome = ExceptionOutcome::default();

    for record in &ctx.attendance {
        if !record.needs_exception_review() {
            continue;
        }

        let Some(employee) = ctx.employee(record.employee_id) else {
            outcome.skipped.missing_employee += 1;
            continue;
        };

        let shift = ctx
            .active_assignment(record.employee_id, record.date)
            .and_then(|a| ctx.shifts.get(&a.shift_id));
        let shift_name = shift.map_or(NOT_ASSIGNED, |s| s.name.as_str()).to_string();
        let expected_minutes = shift.and_then(Shift::expected_minutes).unwrap_or(0);

        let kind = classify(record, expected_minutes);
        if !filter.is_empty() && !filter.contains(&kind) {
            continue;
        }

        outcome.records.push(ExceptionRecord {
            employee_id: employee.id,
            employee_code: employee.employee_code.clone(),
            employee_name: employee.display_name(),
            department: ctx.department_name(employee),
            date: record.date,
            shift_name,
            expected_minutes,
            actual_minutes: record.total_work_minutes,
            kind,
            weekly_rest: ctx.is_weekly_rest(record.date),
            details: details(record, kind, expected_minutes),
        });
    }

    outcome
}

/// Classification order is fixed: a missed punch always wins, then the
/// short-time threshold, then any linked exception reads as lateness.
fn classify(record: &AttendanceRecord, expected_minutes: i64) -> ExceptionKind {
    if record.has_missed_punch {
        ExceptionKind::MissedPunch
    } else if (record.total_work_minutes as f64) < SHORT_TIME_RATIO * expected_minutes as f64 {
        ExceptionKind::ShortTime
    } else if !record.exception_ids.is_empty() {
        ExceptionKind::Late
    } else {
        ExceptionKind::Unknown
    }
}

fn details(record: &AttendanceRecord, kind: ExceptionKind, expected_minutes: i64) -> String {
    match kind {
        ExceptionKind::MissedPunch => format!("Missed punch; punches: {}", record.punch_summary()),
        ExceptionKind::ShortTime => format!(
            "Worked {} of {} expected minutes",
            record.total_work_minutes, expected_minutes
        ),
        ExceptionKind::Late => format!("{} exception(s) flagged", record.exception_ids.len()),
        ExceptionKind::Unknown => "Unclassified".to_string(),
    }
}

/// Comma-separated client filter. `ALL` anywhere bypasses filtering, and
/// unrecognized tokens are dropped, so a fully bogus filter degrades to an
/// unfiltered report.
pub fn parse_filter(raw: &str) -> Vec<ExceptionKind> {
    let mut kinds = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if token.eq_ignore_ascii_case("ALL") {
            return Vec::new();
        }
        if let Ok(kind) = token.parse::<ExceptionKind>() {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
    }
    kinds
}
