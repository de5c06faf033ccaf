// src/services/hours_service.rs

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::HoursRepository,
    models::hours::{HoursDay, HoursEntry, HoursQuery, RecordHoursPayload, WorkLog, WorkLogRow},
    services::schedule_service::ensure_range,
};

/// Agrupa as linhas (já ordenadas por data) em um dia por data.
pub fn group_by_date(rows: Vec<WorkLogRow>) -> Vec<HoursDay> {
    let mut days: Vec<HoursDay> = Vec::new();

    for row in rows {
        let entry = HoursEntry {
            worker_id: row.worker_id,
            name: format!("{} {}", row.first_name, row.last_name),
            work_hours: row.work_hours,
            break_hours: row.break_hours,
            paid_hours: row.paid_hours,
        };

        match days.last_mut() {
            Some(day) if day.date == row.work_date => day.entries.push(entry),
            _ => days.push(HoursDay { date: row.work_date, entries: vec![entry] }),
        }
    }

    days
}

fn check_bounds(query: &HoursQuery) -> Result<(), AppError> {
    match (query.from, query.to) {
        (Some(from), Some(to)) => ensure_range(from, to),
        _ => Ok(()),
    }
}

#[derive(Clone)]
pub struct HoursService {
    hours_repo: HoursRepository,
}

impl HoursService {
    pub fn new(hours_repo: HoursRepository) -> Self {
        Self { hours_repo }
    }

    pub async fn record_hours(
        &self,
        manager_id: Uuid,
        worker_id: Uuid,
        date: NaiveDate,
        payload: &RecordHoursPayload,
    ) -> Result<WorkLog, AppError> {
        let log = self
            .hours_repo
            .upsert_log(manager_id, worker_id, date, payload)
            .await?
            .ok_or(AppError::WorkerNotFound)?;

        tracing::info!("⏱️ Horas de {} gravadas para o funcionário {}", date, worker_id);
        Ok(log)
    }

    pub async fn hours_by_date(
        &self,
        manager_id: Uuid,
        query: &HoursQuery,
    ) -> Result<Vec<HoursDay>, AppError> {
        check_bounds(query)?;
        let rows = self
            .hours_repo
            .list_rows(manager_id, None, query.from, query.to)
            .await?;
        Ok(group_by_date(rows))
    }

    pub async fn my_hours(
        &self,
        manager_id: Uuid,
        worker_id: Uuid,
        query: &HoursQuery,
    ) -> Result<Vec<HoursDay>, AppError> {
        check_bounds(query)?;
        let rows = self
            .hours_repo
            .list_rows(manager_id, Some(worker_id), query.from, query.to)
            .await?;
        Ok(group_by_date(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn row(first: &str, d: u32, hours: f64) -> WorkLogRow {
        WorkLogRow {
            worker_id: Uuid::new_v4(),
            first_name: first.into(),
            last_name: "Silva".into(),
            work_date: NaiveDate::from_ymd_opt(2024, 6, d).unwrap(),
            work_hours: hours,
            break_hours: 1.0,
            paid_hours: hours - 1.0,
        }
    }

    #[test]
    fn rows_are_grouped_per_date_in_order() {
        let days = group_by_date(vec![row("Ana", 3, 8.0), row("Bia", 3, 6.0), row("Ana", 4, 4.0)]);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].entries.len(), 2);
        assert_eq!(days[0].entries[1].name, "Bia Silva");
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 6, 4).unwrap());
        assert_eq!(days[1].entries[0].paid_hours, 3.0);
    }

    #[test]
    fn no_rows_no_days() {
        assert!(group_by_date(Vec::new()).is_empty());
    }

    #[test]
    fn open_ended_ranges_are_allowed() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 6, day);
        assert!(check_bounds(&HoursQuery { from: d(10), to: None }).is_ok());
        assert!(check_bounds(&HoursQuery { from: d(10), to: d(1) }).is_err());
    }

    #[test]
    fn negative_hours_are_rejected() {
        let payload = RecordHoursPayload { work_hours: -1.0, break_hours: 0.0, paid_hours: 0.0 };
        assert!(payload.validate().is_err());

        let payload = RecordHoursPayload { work_hours: 8.0, break_hours: 1.0, paid_hours: 7.0 };
        assert!(payload.validate().is_ok());
    }
}
