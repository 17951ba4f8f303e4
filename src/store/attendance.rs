use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use futures_util::StreamExt;
use sqlx::MySqlPool;
use tracing::warn;

use crate::model::attendance::{AttendanceRecord, Punch, PunchKind};
use crate::store::in_placeholders;
use crate::utils::period::ReportPeriod;

#[derive(sqlx::FromRow)]
struct AttendanceRow {
    id: u64,
    employee_id: u64,
    date: NaiveDate,
    total_work_minutes: i64,
    has_missed_punch: bool,
    finalised_for_payroll: bool,
}

#[derive(sqlx::FromRow)]
struct PunchRow {
    attendance_id: u64,
    kind: String,
    punched_at: NaiveDateTime,
}

#[derive(sqlx::FromRow)]
struct ExceptionLinkRow {
    attendance_id: u64,
    exception_id: u64,
}

/// Streams the attendance scan for one reporting period, then batch-loads
/// the punch lists and exception links for the returned records.
pub async fn fetch_attendance(
    pool: &MySqlPool,
    period: ReportPeriod,
    employee_id: Option<u64>,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    let mut sql = String::from(
        r#"
        SELECT id, employee_id, date, total_work_minutes,
               has_missed_punch, finalised_for_payroll
        FROM attendance_records
        WHERE date BETWEEN ? AND ?
        "#,
    );
    if employee_id.is_some() {
        sql.push_str(" AND employee_id = ?");
    }
    sql.push_str(" ORDER BY date, employee_id");

    let mut query = sqlx::query_as::<_, AttendanceRow>(&sql)
        .bind(period.start)
        .bind(period.end);
    if let Some(employee_id) = employee_id {
        query = query.bind(employee_id);
    }

    let mut stream = query.fetch(pool);
    let mut records = Vec::new();
    let mut index_by_id: HashMap<u64, usize> = HashMap::new();

    while let Some(row) = stream.next().await {
        let row = row?;
        index_by_id.insert(row.id, records.len());
        records.push(AttendanceRecord {
            id: row.id,
            employee_id: row.employee_id,
            date: row.date,
            punches: Vec::new(),
            total_work_minutes: row.total_work_minutes,
            has_missed_punch: row.has_missed_punch,
            finalised_for_payroll: row.finalised_for_payroll,
            exception_ids: Vec::new(),
        });
    }

    if records.is_empty() {
        return Ok(records);
    }

    let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
    attach_punches(pool, &ids, &index_by_id, &mut records).await?;
    attach_exception_links(pool, &ids, &index_by_id, &mut records).await?;

    Ok(records)
}

async fn attach_punches(
    pool: &MySqlPool,
    ids: &[u64],
    index_by_id: &HashMap<u64, usize>,
    records: &mut [AttendanceRecord],
) -> Result<(), sqlx::Error> {
    let sql = format!(
        r#"
        SELECT attendance_id, kind, punched_at
        FROM attendance_punches
        WHERE attendance_id IN ({})
        ORDER BY punched_at
        "#,
        in_placeholders(ids.len())
    );

    let mut query = sqlx::query_as::<_, PunchRow>(&sql);
    for id in ids {
        query = query.bind(*id);
    }

    for row in query.fetch_all(pool).await? {
        let kind = match row.kind.parse::<PunchKind>() {
            Ok(kind) => kind,
            Err(_) => {
                warn!(attendance_id = row.attendance_id, kind = %row.kind, "skipping punch with unknown kind");
                continue;
            }
        };
        if let Some(&idx) = index_by_id.get(&row.attendance_id) {
            records[idx].punches.push(Punch {
                kind,
                punched_at: row.punched_at,
            });
        }
    }

    Ok(())
}

async fn attach_exception_links(
    pool: &MySqlPool,
    ids: &[u64],
    index_by_id: &HashMap<u64, usize>,
    records: &mut [AttendanceRecord],
) -> Result<(), sqlx::Error> {
    let sql = format!(
        r#"
        SELECT attendance_id, id AS exception_id
        FROM attendance_exceptions
        WHERE attendance_id IN ({})
        "#,
        in_placeholders(ids.len())
    );

    let mut query = sqlx::query_as::<_, ExceptionLinkRow>(&sql);
    for id in ids {
        query = query.bind(*id);
    }

    for row in query.fetch_all(pool).await? {
        if let Some(&idx) = index_by_id.get(&row.attendance_id) {
            records[idx].exception_ids.push(row.exception_id);
        }
    }

    Ok(())
}
