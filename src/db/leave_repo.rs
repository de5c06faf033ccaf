// src/db/leave_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::leave::LeaveRequest};

#[derive(Clone)]
pub struct LeaveRepository {
    pool: PgPool,
}

impl LeaveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_request(
        &self,
        manager_id: Uuid,
        worker_id: Uuid,
        worker_name: &str,
        email: &str,
        selected_dates: &[NaiveDate],
        notes: &str,
    ) -> Result<LeaveRequest, AppError> {
        let request = sqlx::query_as::<_, LeaveRequest>(
            r#"
            INSERT INTO leave_requests (manager_id, worker_id, worker_name, email, selected_dates, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(manager_id)
        .bind(worker_id)
        .bind(worker_name)
        .bind(email)
        .bind(selected_dates)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    /// Mais recentes primeiro.
    pub async fn list_by_manager(&self, manager_id: Uuid) -> Result<Vec<LeaveRequest>, AppError> {
        let requests = sqlx::query_as::<_, LeaveRequest>(
            "SELECT * FROM leave_requests WHERE manager_id = $1 ORDER BY created_at DESC",
        )
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    pub async fn list_by_worker(
        &self,
        manager_id: Uuid,
        worker_id: Uuid,
    ) -> Result<Vec<LeaveRequest>, AppError> {
        let requests = sqlx::query_as::<_, LeaveRequest>(
            r#"
            SELECT * FROM leave_requests
            WHERE manager_id = $1 AND worker_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(manager_id)
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }
}
