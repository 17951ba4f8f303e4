use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;

/// Inclusive reporting date range. Every report runs over exactly one of
/// these; invalid client input degrades to the current calendar month
/// instead of failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Full calendar month, first day through last day.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self {
            start,
            end: next.pred_opt()?,
        })
    }

    pub fn current_month() -> Self {
        let today = Utc::now().date_naive();
        // from_ymd_opt(today.year(), today.month(), ..) is always valid here
        Self::month(today.year(), today.month())
            .unwrap_or(Self { start: today, end: today })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Resolution order: explicit start/end pair, then month/year pair,
    /// then the current month. Unparseable or inconsistent values fall
    /// through to the next rule rather than rejecting the request.
    pub fn resolve(
        start: Option<&str>,
        end: Option<&str>,
        month: Option<&str>,
        year: Option<&str>,
    ) -> Self {
        if let (Some(start), Some(end)) = (parse_iso_date(start), parse_iso_date(end)) {
            if let Some(period) = Self::new(start, end) {
                return period;
            }
        }

        if let (Some(month), Some(year)) = (parse_number::<u32>(month), parse_number::<i32>(year)) {
            if let Some(period) = Self::month(year, month) {
                return period;
            }
        }

        Self::current_month()
    }
}

fn parse_iso_date(raw: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw?.trim(), "%Y-%m-%d").ok()
}

fn parse_number<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_bounds_cover_whole_month() {
        let period = ReportPeriod::month(2024, 3).unwrap();
        assert_eq!(period.start, date(2024, 3, 1));
        assert_eq!(period.end, date(2024, 3, 31));
    }

    #[test]
    fn february_bounds_respect_leap_years() {
        assert_eq!(ReportPeriod::month(2024, 2).unwrap().end, date(2024, 2, 29));
        assert_eq!(ReportPeriod::month(2023, 2).unwrap().end, date(2023, 2, 28));
    }

    #[test]
    fn december_rolls_into_next_year() {
        let period = ReportPeriod::month(2024, 12).unwrap();
        assert_eq!(period.end, date(2024, 12, 31));
    }

    #[test]
    fn containment_is_inclusive() {
        let period = ReportPeriod::month(2024, 3).unwrap();
        assert!(period.contains(date(2024, 3, 1)));
        assert!(period.contains(date(2024, 3, 31)));
        assert!(!period.contains(date(2024, 4, 1)));
    }

    #[test]
    fn explicit_range_wins_over_month() {
        let period =
            ReportPeriod::resolve(Some("2024-03-05"), Some("2024-03-10"), Some("1"), Some("2024"));
        assert_eq!(period.start, date(2024, 3, 5));
        assert_eq!(period.end, date(2024, 3, 10));
    }

    #[test]
    fn reversed_range_falls_through_to_month() {
        let period =
            ReportPeriod::resolve(Some("2024-03-10"), Some("2024-03-05"), Some("1"), Some("2024"));
        assert_eq!(period, ReportPeriod::month(2024, 1).unwrap());
    }

    #[test]
    fn garbage_input_falls_back_to_current_month() {
        let period = ReportPeriod::resolve(Some("yesterday"), Some("tomorrow"), Some("13"), None);
        assert_eq!(period, ReportPeriod::current_month());
    }

    #[test]
    fn missing_input_falls_back_to_current_month() {
        assert_eq!(
            ReportPeriod::resolve(None, None, None, None),
            ReportPeriod::current_month()
        );
    }
}
