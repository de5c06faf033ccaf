// src/db/message_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::support::SupportMessage};

#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_message(
        &self,
        manager_id: Uuid,
        worker_id: Uuid,
        name: &str,
        email: &str,
        message: &str,
        worker_first_name: &str,
        worker_last_name: &str,
    ) -> Result<SupportMessage, AppError> {
        let created = sqlx::query_as::<_, SupportMessage>(
            r#"
            INSERT INTO support_messages (
                manager_id, worker_id, name, email, message, worker_first_name, worker_last_name
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(manager_id)
        .bind(worker_id)
        .bind(name)
        .bind(email)
        .bind(message)
        .bind(worker_first_name)
        .bind(worker_last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Mais recentes primeiro.
    pub async fn list_by_manager(&self, manager_id: Uuid) -> Result<Vec<SupportMessage>, AppError> {
        let messages = sqlx::query_as::<_, SupportMessage>(
            "SELECT * FROM support_messages WHERE manager_id = $1 ORDER BY created_at DESC",
        )
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    pub async fn delete_message(&self, manager_id: Uuid, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM support_messages WHERE manager_id = $1 AND id = $2")
            .bind(manager_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
