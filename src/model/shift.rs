use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Static shift definition. Start and end are stored as "HH:MM" strings,
/// matching how the scheduling subsystem writes them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Shift {
    pub id: u64,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub grace_in_minutes: i64,
    pub grace_out_minutes: i64,
    pub overtime_requires_approval: bool,
}

impl Shift {
    /// Scheduled shift length in minutes. A shift whose end is before its
    /// start wraps past midnight and gains 24 hours.
    /// Returns `None` when either bound is not a valid "HH:MM" string.
    pub fn expected_minutes(&self) -> Option<i64> {
        let start = parse_hhmm(&self.start_time)?;
        let end = parse_hhmm(&self.end_time)?;
        if end < start {
            Some(end + 1440 - start)
        } else {
            Some(end - start)
        }
    }

    /// Combined tolerance applied before minutes count as overtime.
    pub fn total_grace_minutes(&self) -> i64 {
        self.grace_in_minutes + self.grace_out_minutes
    }
}

/// Binds an employee to a shift over an inclusive date range. Ranges are
/// not supposed to overlap per employee; when they do, the newest
/// assignment wins (see `ReportContext::active_assignment`).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShiftAssignment {
    pub id: u64,
    pub employee_id: u64,
    pub shift_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: Option<DateTime<Utc>>,
}

impl ShiftAssignment {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// "HH:MM" wall-clock string to minutes since midnight.
fn parse_hhmm(raw: &str) -> Option<i64> {
    let (hh, mm) = raw.split_once(':')?;
    let hours: i64 = hh.parse().ok()?;
    let minutes: i64 = mm.parse().ok()?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    Some(hours * 60 + minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(start: &str, end: &str) -> Shift {
        Shift {
            id: 1,
            name: "Day".to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            grace_in_minutes: 5,
            grace_out_minutes: 5,
            overtime_requires_approval: false,
        }
    }

    #[test]
    fn day_shift_length() {
        assert_eq!(shift("09:00", "17:00").expected_minutes(), Some(480));
    }

    #[test]
    fn overnight_shift_gains_a_day() {
        // 22:00 -> 06:00 is (360 + 1440) - 1320 = 480
        assert_eq!(shift("22:00", "06:00").expected_minutes(), Some(480));
    }

    #[test]
    fn malformed_bounds_yield_none() {
        assert_eq!(shift("9am", "17:00").expected_minutes(), None);
        assert_eq!(shift("25:00", "17:00").expected_minutes(), None);
        assert_eq!(shift("09:61", "17:00").expected_minutes(), None);
        assert_eq!(shift("", "17:00").expected_minutes(), None);
    }

    #[test]
    fn grace_sums_both_ends() {
        assert_eq!(shift("09:00", "17:00").total_grace_minutes(), 10);
    }

    #[test]
    fn assignment_range_is_inclusive() {
        let assignment = ShiftAssignment {
            id: 1,
            employee_id: 10,
            shift_id: 1,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            created_at: None,
        };
        assert!(assignment.covers(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(assignment.covers(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!assignment.covers(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert!(!assignment.covers(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
    }
}
