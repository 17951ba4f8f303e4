use serde::{Deserialize, Serialize};

/// Reference entity joined into reports for display names. Owned by the
/// profile subsystem; this service only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EmployeeProfile {
    pub id: u64,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department_id: u64,
    pub status: String,
}

impl EmployeeProfile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
