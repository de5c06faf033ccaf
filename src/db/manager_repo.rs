// src/db/manager_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::Manager};

// O repositório de gerentes, responsável por todas as interações com a tabela 'managers'
#[derive(Clone)]
pub struct ManagerRepository {
    pool: PgPool,
}

impl ManagerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Manager>, AppError> {
        let manager = sqlx::query_as::<_, Manager>("SELECT * FROM managers WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(manager)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Manager>, AppError> {
        let manager = sqlx::query_as::<_, Manager>("SELECT * FROM managers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(manager)
    }

    pub async fn create_manager(
        &self,
        email: &str,
        password_hash: &str,
        display_name: Option<&str>,
    ) -> Result<Manager, AppError> {
        sqlx::query_as::<_, Manager>(
            r#"
            INSERT INTO managers (email, password_hash, display_name)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Converte erro de violação de chave única em um erro mais amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })
    }

    /// Retorna quantas linhas foram alteradas (0 = gerente inexistente).
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE managers SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
