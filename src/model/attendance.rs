use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// A single clock event captured by the external time-capture process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Punch {
    pub kind: PunchKind,
    pub punched_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PunchKind {
    In,
    Out,
}

/// One employee-day of attendance. Written by the time-capture process,
/// read-only to this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: u64,
    pub employee_id: u64,
    pub date: NaiveDate,
    pub punches: Vec<Punch>,
    pub total_work_minutes: i64,
    pub has_missed_punch: bool,
    pub finalised_for_payroll: bool,
    pub exception_ids: Vec<u64>,
}

impl AttendanceRecord {
    /// A record enters the exception report when a punch is missing or the
    /// capture process already linked at least one exception to it.
    pub fn needs_exception_review(&self) -> bool {
        self.has_missed_punch || !self.exception_ids.is_empty()
    }

    /// Compact punch listing used in report detail columns,
    /// e.g. `IN 09:10, OUT 19:00`.
    pub fn punch_summary(&self) -> String {
        if self.punches.is_empty() {
            return "no punches".to_string();
        }
        self.punches
            .iter()
            .map(|p| format!("{} {}", p.kind, p.punched_at.format("%H:%M")))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(has_missed_punch: bool, exception_ids: Vec<u64>) -> AttendanceRecord {
        AttendanceRecord {
            id: 1,
            employee_id: 10,
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            punches: Vec::new(),
            total_work_minutes: 480,
            has_missed_punch,
            finalised_for_payroll: true,
            exception_ids,
        }
    }

    #[test]
    fn review_gate_requires_missed_punch_or_linked_exception() {
        assert!(record(true, Vec::new()).needs_exception_review());
        assert!(record(false, vec![7]).needs_exception_review());
        assert!(!record(false, Vec::new()).needs_exception_review());
    }

    #[test]
    fn punch_summary_lists_events_in_order() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let mut rec = record(false, Vec::new());
        rec.punches = vec![
            Punch {
                kind: PunchKind::In,
                punched_at: date.and_hms_opt(9, 10, 0).unwrap(),
            },
            Punch {
                kind: PunchKind::Out,
                punched_at: date.and_hms_opt(19, 0, 0).unwrap(),
            },
        ];
        assert_eq!(rec.punch_summary(), "IN 09:10, OUT 19:00");
    }

    #[test]
    fn punch_summary_handles_empty_list() {
        assert_eq!(record(false, Vec::new()).punch_summary(), "no punches");
    }

    #[test]
    fn punch_kind_round_trips_db_strings() {
        assert_eq!("IN".parse::<PunchKind>().unwrap(), PunchKind::In);
        assert_eq!("OUT".parse::<PunchKind>().unwrap(), PunchKind::Out);
        assert_eq!(PunchKind::Out.to_string(), "OUT");
    }
}
