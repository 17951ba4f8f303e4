use once_cell::sync::Lazy;

use crate::analytics::exceptions::ExceptionRecord;
use crate::analytics::overtime::OvertimeRecord;

/// Body returned for a CSV export with an empty record set.
pub const NO_RECORDS: &str = "No records found";

static OVERTIME_HEADERS: Lazy<String> = Lazy::new(|| {
    [
        "employee_id",
        "employee_code",
        "employee_name",
        "department",
        "date",
        "shift",
        "expected_minutes",
        "actual_minutes",
        "overtime_minutes",
        "overtime_hours",
        "holiday",
        "approval_required",
    ]
    .join(",")
});

static EXCEPTION_HEADERS: Lazy<String> = Lazy::new(|| {
    [
        "employee_id",
        "employee_code",
        "employee_name",
        "department",
        "date",
        "shift",
        "exception_type",
        "expected_minutes",
        "actual_minutes",
        "weekly_rest",
        "details",
    ]
    .join(",")
});

pub fn overtime_csv(records: &[OvertimeRecord]) -> String {
    if records.is_empty() {
        return NO_RECORDS.to_string();
    }

    let mut out = String::from(OVERTIME_HEADERS.as_str());
    for rec in records {
        out.push('\n');
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{:.2},{},{}",
            rec.employee_id,
            rec.employee_code,
            rec.employee_name,
            rec.department,
            rec.date,
            rec.shift_name,
            rec.expected_minutes,
            rec.actual_minutes,
            rec.overtime_minutes,
            rec.overtime_hours,
            rec.holiday.as_deref().unwrap_or(""),
            rec.approval_required,
        ));
    }
    out
}

pub fn exception_csv(records: &[ExceptionRecord]) -> String {
    if records.is_empty() {
        return NO_RECORDS.to_string();
    }

    let mut out = String::from(EXCEPTION_HEADERS.as_str());
    for rec in records {
        out.push('\n');
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{}",
            rec.employee_id,
            rec.employee_code,
            rec.employee_name,
            rec.department,
            rec.date,
            rec.shift_name,
            rec.kind,
            rec.expected_minutes,
            rec.actual_minutes,
            rec.weekly_rest,
            quote(&rec.details),
        ));
    }
    out
}

/// Free-text columns get quoted; embedded quotes double per RFC 4180.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::analytics::exceptions::ExceptionKind;

    fn overtime_record() -> OvertimeRecord {
        OvertimeRecord {
            employee_id: 10,
            employee_code: "EMP-010".to_string(),
            employee_name: "John Doe".to_string(),
            department: "Engineering".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            shift_name: "Day Shift".to_string(),
            expected_minutes: 480,
            actual_minutes: 590,
            overtime_minutes: 100,
            overtime_hours: 1.67,
            holiday: None,
            approval_required: false,
        }
    }

    fn exception_record(details: &str) -> ExceptionRecord {
        ExceptionRecord {
            employee_id: 10,
            employee_code: "EMP-010".to_string(),
            employee_name: "John Doe".to_string(),
            department: "Engineering".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            shift_name: "Day Shift".to_string(),
            expected_minutes: 480,
            actual_minutes: 310,
            kind: ExceptionKind::ShortTime,
            weekly_rest: false,
            details: details.to_string(),
        }
    }

    #[test]
    fn empty_export_is_the_no_records_literal() {
        assert_eq!(overtime_csv(&[]), "No records found");
        assert_eq!(exception_csv(&[]), "No records found");
    }

    #[test]
    fn overtime_rows_follow_the_fixed_column_order() {
        let csv = overtime_csv(&[overtime_record()]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "employee_id,employee_code,employee_name,department,date,shift,\
             expected_minutes,actual_minutes,overtime_minutes,overtime_hours,\
             holiday,approval_required"
        );
        assert_eq!(
            lines.next().unwrap(),
            "10,EMP-010,John Doe,Engineering,2024-03-05,Day Shift,480,590,100,1.67,,false"
        );
    }

    #[test]
    fn overtime_hours_always_render_two_decimals() {
        let mut rec = overtime_record();
        rec.overtime_hours = 1.5;
        assert!(overtime_csv(&[rec]).ends_with(",1.50,,false"));
    }

    #[test]
    fn exception_details_are_quoted() {
        let csv = exception_csv(&[exception_record("punches: IN 09:10, OUT 13:20")]);
        assert!(csv.ends_with("\"punches: IN 09:10, OUT 13:20\""));
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let csv = exception_csv(&[exception_record("flagged \"late\" twice")]);
        assert!(csv.ends_with("\"flagged \"\"late\"\" twice\""));
    }

    #[test]
    fn exception_header_row_is_stable() {
        let csv = exception_csv(&[exception_record("x")]);
        assert!(csv.starts_with(
            "employee_id,employee_code,employee_name,department,date,shift,exception_type,"
        ));
    }
}
