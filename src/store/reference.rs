use anyhow::Result;
use sqlx::MySqlPool;

use crate::model::department::Department;
use crate::model::employee::EmployeeProfile;
use crate::model::holiday::Holiday;
use crate::model::shift::{Shift, ShiftAssignment};
use crate::store::in_placeholders;
use crate::utils::period::ReportPeriod;

pub async fn fetch_employees(
    pool: &MySqlPool,
    ids: &[u64],
) -> Result<Vec<EmployeeProfile>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        r#"
        SELECT id, employee_code, first_name, last_name, email, department_id, status
        FROM employees
        WHERE id IN ({})
        "#,
        in_placeholders(ids.len())
    );

    let mut query = sqlx::query_as::<_, EmployeeProfile>(&sql);
    for id in ids {
        query = query.bind(*id);
    }
    query.fetch_all(pool).await
}

pub async fn fetch_departments(
    pool: &MySqlPool,
    ids: &[u64],
) -> Result<Vec<Department>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT id, name FROM departments WHERE id IN ({})",
        in_placeholders(ids.len())
    );

    let mut query = sqlx::query_as::<_, Department>(&sql);
    for id in ids {
        query = query.bind(*id);
    }
    query.fetch_all(pool).await
}

pub async fn fetch_shifts(pool: &MySqlPool, ids: &[u64]) -> Result<Vec<Shift>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        r#"
        SELECT id, name, start_time, end_time,
               grace_in_minutes, grace_out_minutes, overtime_requires_approval
        FROM shifts
        WHERE id IN ({})
        "#,
        in_placeholders(ids.len())
    );

    let mut query = sqlx::query_as::<_, Shift>(&sql);
    for id in ids {
        query = query.bind(*id);
    }
    query.fetch_all(pool).await
}

/// Assignments whose range overlaps the reporting period, for the given
/// employees only.
pub async fn fetch_assignments(
    pool: &MySqlPool,
    employee_ids: &[u64],
    period: ReportPeriod,
) -> Result<Vec<ShiftAssignment>, sqlx::Error> {
    if employee_ids.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        r#"
        SELECT id, employee_id, shift_id, start_date, end_date, created_at
        FROM shift_assignments
        WHERE employee_id IN ({})
          AND start_date <= ?
          AND end_date >= ?
        "#,
        in_placeholders(employee_ids.len())
    );

    let mut query = sqlx::query_as::<_, ShiftAssignment>(&sql);
    for id in employee_ids {
        query = query.bind(*id);
    }
    query
        .bind(period.end)
        .bind(period.start)
        .fetch_all(pool)
        .await
}

/// Active holidays overlapping the reporting period. Inactive rows are
/// filtered here so the in-memory containment checks never see them.
pub async fn fetch_holidays(
    pool: &MySqlPool,
    period: ReportPeriod,
) -> Result<Vec<Holiday>, sqlx::Error> {
    sqlx::query_as::<_, Holiday>(
        r#"
        SELECT id, name, holiday_type, start_date, end_date, active
        FROM holidays
        WHERE active = TRUE
          AND start_date <= ?
          AND end_date >= ?
        "#,
    )
    .bind(period.end)
    .bind(period.start)
    .fetch_all(pool)
    .await
}

/// Row counts of the reference catalog, logged once at startup so an empty
/// shift table shows up in the logs before the first confusing report.
pub async fn log_catalog_stats(pool: &MySqlPool) -> Result<()> {
    let shifts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shifts")
        .fetch_one(pool)
        .await?;
    let assignments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shift_assignments")
        .fetch_one(pool)
        .await?;
    let holidays: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM holidays WHERE active = TRUE")
        .fetch_one(pool)
        .await?;

    log::info!(
        "reference catalog: {} shifts, {} assignments, {} active holidays",
        shifts,
        assignments,
        holidays
    );

    Ok(())
}
