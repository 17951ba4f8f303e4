use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Holiday type used for compliance reporting of non-working days.
pub const WEEKLY_REST: &str = "WEEKLY_REST";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Holiday {
    pub id: u64,
    pub name: String,
    pub holiday_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active: bool,
}

impl Holiday {
    /// Inclusive on both endpoints. Inactive holidays never match.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.active && self.start_date <= date && date <= self.end_date
    }

    pub fn is_weekly_rest(&self) -> bool {
        self.holiday_type == WEEKLY_REST
    }
}
