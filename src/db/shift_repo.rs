// src/db/shift_repo.rs

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::schedule::Shift};

#[derive(Clone)]
pub struct ShiftRepository {
    pool: PgPool,
}

impl ShiftRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Grava o turno do funcionário no dia, substituindo o anterior se existir.
    /// O SELECT em `workers` garante que o funcionário pertence ao gerente; se não
    /// pertencer, nenhuma linha é inserida e o retorno é `None`.
    pub async fn upsert_shift(
        &self,
        manager_id: Uuid,
        worker_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        title: Option<&str>,
    ) -> Result<Option<Shift>, AppError> {
        let shift = sqlx::query_as::<_, Shift>(
            r#"
            INSERT INTO shifts (manager_id, worker_id, title, shift_date, start_time, end_time)
            SELECT w.manager_id, w.id,
                   COALESCE($3, w.first_name || ' ' || w.last_name),
                   $4, $5, $6
            FROM workers w
            WHERE w.id = $2 AND w.manager_id = $1
            ON CONFLICT (worker_id, shift_date) DO UPDATE SET
                title = EXCLUDED.title,
                start_time = EXCLUDED.start_time,
                end_time = EXCLUDED.end_time
            RETURNING *
            "#,
        )
        .bind(manager_id)
        .bind(worker_id)
        .bind(title)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shift)
    }

    /// Turnos do gerente no intervalo fechado [from, to], opcionalmente de um funcionário.
    pub async fn list_in_range(
        &self,
        manager_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        worker_id: Option<Uuid>,
    ) -> Result<Vec<Shift>, AppError> {
        let shifts = sqlx::query_as::<_, Shift>(
            r#"
            SELECT * FROM shifts
            WHERE manager_id = $1
              AND shift_date BETWEEN $2 AND $3
              AND ($4::uuid IS NULL OR worker_id = $4)
            ORDER BY shift_date ASC, start_time ASC
            "#,
        )
        .bind(manager_id)
        .bind(from)
        .bind(to)
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(shifts)
    }

    pub async fn find_for_day(
        &self,
        manager_id: Uuid,
        worker_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<Shift>, AppError> {
        let shift = sqlx::query_as::<_, Shift>(
            "SELECT * FROM shifts WHERE manager_id = $1 AND worker_id = $2 AND shift_date = $3",
        )
        .bind(manager_id)
        .bind(worker_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shift)
    }

    pub async fn delete_shift(&self, manager_id: Uuid, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM shifts WHERE manager_id = $1 AND id = $2")
            .bind(manager_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
