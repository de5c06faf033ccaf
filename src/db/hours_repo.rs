// src/db/hours_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::hours::{RecordHoursPayload, WorkLog, WorkLogRow},
};

#[derive(Clone)]
pub struct HoursRepository {
    pool: PgPool,
}

impl HoursRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Um registro por funcionário por dia; gravar de novo substitui os valores.
    pub async fn upsert_log(
        &self,
        manager_id: Uuid,
        worker_id: Uuid,
        date: NaiveDate,
        input: &RecordHoursPayload,
    ) -> Result<Option<WorkLog>, AppError> {
        let log = sqlx::query_as::<_, WorkLog>(
            r#"
            INSERT INTO work_logs (worker_id, manager_id, work_date, work_hours, break_hours, paid_hours)
            SELECT w.id, w.manager_id, $3, $4, $5, $6
            FROM workers w
            WHERE w.id = $2 AND w.manager_id = $1
            ON CONFLICT (worker_id, work_date) DO UPDATE SET
                work_hours = EXCLUDED.work_hours,
                break_hours = EXCLUDED.break_hours,
                paid_hours = EXCLUDED.paid_hours,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(manager_id)
        .bind(worker_id)
        .bind(date)
        .bind(input.work_hours)
        .bind(input.break_hours)
        .bind(input.paid_hours)
        .fetch_optional(&self.pool)
        .await?;

        Ok(log)
    }

    /// Registros do gerente com o nome de cada funcionário, opcionalmente de um só
    /// funcionário e limitados por data (limites inclusivos).
    pub async fn list_rows(
        &self,
        manager_id: Uuid,
        worker_id: Option<Uuid>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<WorkLogRow>, AppError> {
        let rows = sqlx::query_as::<_, WorkLogRow>(
            r#"
            SELECT l.worker_id, w.first_name, w.last_name, l.work_date,
                   l.work_hours, l.break_hours, l.paid_hours
            FROM work_logs l
            JOIN workers w ON w.id = l.worker_id
            WHERE l.manager_id = $1
              AND ($2::uuid IS NULL OR l.worker_id = $2)
              AND ($3::date IS NULL OR l.work_date >= $3)
              AND ($4::date IS NULL OR l.work_date <= $4)
            ORDER BY l.work_date ASC, w.first_name ASC, w.last_name ASC
            "#,
        )
        .bind(manager_id)
        .bind(worker_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
