use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::analytics::{ReportContext, SkippedRecords};

/// One payroll-finalised attendance day that exceeded its shift window.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OvertimeRecord {
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
    #[schema(example = 590)]
    pub actual_minutes: i64,
    #[schema(example = 100)]
    pub overtime_minutes: i64,
    #[schema(example = 1.67)]
    pub overtime_hours: f64,
    #[schema(example = json!(null), nullable = true)]
    pub holiday: Option<String>,
    #[schema(example = false)]
    pub approval_required: bool,
}

#[derive(Debug, Default)]
pub struct OvertimeOutcome {
    pub records: Vec<OvertimeRecord>,
    pub skipped: SkippedRecords,
}

impl OvertimeOutcome {
    pub fn total_hours(&self) -> f64 {
        round_hours_sum(self.records.iter().map(|r| r.overtime_hours).sum())
    }
}

/// Overtime per finalised record: actual worked minutes beyond the active
/// shift's expected length plus its grace window. Days at or under the
/// threshold produce no record. Records whose employee, assignment, or
/// shift cannot be resolved are tallied instead of dropped.
pub fn compute(ctx: &ReportContext) -> OvertimeOutcome {
    let mut outcome = OvertimeOutcome::default();

    for record in &ctx.attendance {
        if !record.finalised_for_payroll {
            continue;
        }

        let Some(employee) = ctx.employee(record.employee_id) else {
            outcome.skipped.missing_employee += 1;
            continue;
        };

        let Some(assignment) = ctx.active_assignment(record.employee_id, record.date) else {
            outcome.skipped.missing_assignment += 1;
            continue;
        };

        let Some(shift) = ctx.shifts.get(&assignment.shift_id) else {
            outcome.skipped.missing_shift += 1;
            continue;
        };

        // unparseable shift window counts as an unresolved shift
        let Some(expected_minutes) = shift.expected_minutes() else {
            outcome.skipped.missing_shift += 1;
            continue;
        };

        let overtime_minutes =
            (record.total_work_minutes - expected_minutes - shift.total_grace_minutes()).max(0);
        if overtime_minutes == 0 {
            continue;
        }

        outcome.records.push(OvertimeRecord {
            employee_id: employee.id,
            employee_code: employee.employee_code.clone(),
            employee_name: employee.display_name(),
            department: ctx.department_name(employee),
            date: record.date,
            shift_name: shift.name.clone(),
            expected_minutes,
            actual_minutes: record.total_work_minutes,
            overtime_minutes,
            overtime_hours: minutes_to_hours(overtime_minutes),
            holiday: ctx.holiday_on(record.date).map(|h| h.name.clone()),
            approval_required: shift.overtime_requires_approval,
        });
    }

    outcome
}

/// Minutes to hours, rounded to 2 decimal places.
fn minutes_to_hours(minutes: i64) -> f64 {
    (minutes as f64 / 60.0 * 100.0).round() / 100.0
}

fn round_hours_sum(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
