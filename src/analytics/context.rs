use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::MySqlPool;
use tracing::debug;

use crate::model::attendance::AttendanceRecord;
use crate::model::department::Department;
use crate::model::employee::EmployeeProfile;
use crate::model::holiday::Holiday;
use crate::model::shift::{Shift, ShiftAssignment};
use crate::store;
use crate::utils::period::ReportPeriod;

/// Optional narrowing of the attendance scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextFilter {
    pub employee_id: Option<u64>,
    pub department_id: Option<u64>,
}

/// One report request's in-memory snapshot: the filtered attendance list
/// plus lookup maps over every referenced entity. Built per request and
/// dropped with it; nothing here is shared or cached across requests.
#[derive(Debug)]
pub struct ReportContext {
    pub period: ReportPeriod,
    pub attendance: Vec<AttendanceRecord>,
    pub employees: HashMap<u64, EmployeeProfile>,
    pub departments: HashMap<u64, Department>,
    pub shifts: HashMap<u64, Shift>,
    /// Per employee, sorted newest-created first so the first range hit
    /// wins overlap ties.
    pub assignments: HashMap<u64, Vec<ShiftAssignment>>,
    pub holidays: Vec<Holiday>,
}

/// Fetches the attendance scan, then the reference entities it points at.
/// The employee-independent fetches run concurrently; a failure in any of
/// them fails the whole report.
pub async fn build(
    pool: &MySqlPool,
    period: ReportPeriod,
    filter: &ContextFilter,
) -> Result<ReportContext, sqlx::Error> {
    let mut attendance = store::attendance::fetch_attendance(pool, period, filter.employee_id).await?;

    let mut employee_ids: Vec<u64> = attendance.iter().map(|r| r.employee_id).collect();
    employee_ids.sort_unstable();
    employee_ids.dedup();

    let (employees, assignment_rows, holidays) = futures::try_join!(
        store::reference::fetch_employees(pool, &employee_ids),
        store::reference::fetch_assignments(pool, &employee_ids, period),
        store::reference::fetch_holidays(pool, period),
    )?;

    let mut shift_ids: Vec<u64> = assignment_rows.iter().map(|a| a.shift_id).collect();
    shift_ids.sort_unstable();
    shift_ids.dedup();

    let mut department_ids: Vec<u64> = employees.iter().map(|e| e.department_id).collect();
    department_ids.sort_unstable();
    department_ids.dedup();

    let (shifts, departments) = futures::try_join!(
        store::reference::fetch_shifts(pool, &shift_ids),
        store::reference::fetch_departments(pool, &department_ids),
    )?;

    let employees: HashMap<u64, EmployeeProfile> =
        employees.into_iter().map(|e| (e.id, e)).collect();

    if let Some(department_id) = filter.department_id {
        apply_department_filter(&mut attendance, &employees, department_id);
    }

    debug!(
        records = attendance.len(),
        employees = employees.len(),
        assignments = assignment_rows.len(),
        holidays = holidays.len(),
        "report context built"
    );

    Ok(ReportContext {
        period,
        attendance,
        employees,
        departments: departments.into_iter().map(|d| (d.id, d)).collect(),
        shifts: shifts.into_iter().map(|s| (s.id, s)).collect(),
        assignments: group_assignments(assignment_rows),
        holidays,
    })
}

/// Attendance rows carry no department, so the filter scans the fetched
/// profiles. Records whose profile is missing are retained on purpose: the
/// calculators count them as skips instead of losing them here unseen.
fn apply_department_filter(
    attendance: &mut Vec<AttendanceRecord>,
    employees: &HashMap<u64, EmployeeProfile>,
    department_id: u64,
) {
    attendance.retain(|record| {
        employees
            .get(&record.employee_id)
            .map(|e| e.department_id == department_id)
            .unwrap_or(true)
    });
}

/// Groups assignments by employee, newest `created_at` first with id as the
/// final tie-break, so overlap resolution is deterministic.
fn group_assignments(rows: Vec<ShiftAssignment>) -> HashMap<u64, Vec<ShiftAssignment>> {
    let mut grouped: HashMap<u64, Vec<ShiftAssignment>> = HashMap::new();
    for assignment in rows {
        grouped
            .entry(assignment.employee_id)
            .or_default()
            .push(assignment);
    }
    for assignments in grouped.values_mut() {
        assignments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    }
    grouped
}

impl ReportContext {
    /// The assignment in force for an employee on a date. When ranges
    /// overlap, the most recently created assignment wins.
    pub fn active_assignment(&self, employee_id: u64, date: NaiveDate) -> Option<&ShiftAssignment> {
        self.assignments
            .get(&employee_id)?
            .iter()
            .find(|a| a.covers(date))
    }

    pub fn employee(&self, id: u64) -> Option<&EmployeeProfile> {
        self.employees.get(&id)
    }

    pub fn department_name(&self, employee: &EmployeeProfile) -> String {
        self.departments
            .get(&employee.department_id)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn holiday_on(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.iter().find(|h| h.covers(date))
    }

    pub fn is_weekly_rest(&self, date: NaiveDate) -> bool {
        self.holidays
            .iter()
            .any(|h| h.is_weekly_rest() && h.covers(date))
    }
}
