// src/db/worker_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::worker::{CreateWorkerPayload, UpdateWorkerPayload, Worker},
};

#[derive(Clone)]
pub struct WorkerRepository {
    pool: PgPool,
}

// Violação de (manager_id, email) vira um erro amigável
fn map_worker_write_error(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::WorkerEmailAlreadyExists;
        }
    }
    e.into()
}

impl WorkerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  IDENTIDADE (login)
    // =========================================================================

    /// Todos os funcionários com esse e-mail, em qualquer equipe.
    /// A ordem é fixa (gerente mais antigo, depois funcionário mais antigo) para que
    /// "o primeiro que confere" seja sempre o mesmo.
    pub async fn find_all_by_email(&self, email: &str) -> Result<Vec<Worker>, AppError> {
        let workers = sqlx::query_as::<_, Worker>(
            r#"
            SELECT w.*
            FROM workers w
            JOIN managers m ON m.id = w.manager_id
            WHERE w.email = $1
            ORDER BY m.created_at ASC, w.created_at ASC, w.id ASC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(workers)
    }

    /// Busca pela chave composta (gerente, e-mail).
    pub async fn find_by_manager_and_email(
        &self,
        manager_id: Uuid,
        email: &str,
    ) -> Result<Option<Worker>, AppError> {
        let worker = sqlx::query_as::<_, Worker>(
            "SELECT * FROM workers WHERE manager_id = $1 AND email = $2",
        )
        .bind(manager_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(worker)
    }

    // =========================================================================
    //  EQUIPE DO GERENTE
    // =========================================================================

    pub async fn find_by_id(&self, manager_id: Uuid, id: Uuid) -> Result<Option<Worker>, AppError> {
        let worker = sqlx::query_as::<_, Worker>(
            "SELECT * FROM workers WHERE manager_id = $1 AND id = $2",
        )
        .bind(manager_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(worker)
    }

    /// Equipe inteira, em ordem alfabética de nome.
    pub async fn list_by_manager(&self, manager_id: Uuid) -> Result<Vec<Worker>, AppError> {
        let workers = sqlx::query_as::<_, Worker>(
            r#"
            SELECT * FROM workers
            WHERE manager_id = $1
            ORDER BY first_name ASC, last_name ASC, id ASC
            "#,
        )
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(workers)
    }

    pub async fn create_worker(
        &self,
        manager_id: Uuid,
        input: &CreateWorkerPayload,
        email: &str,
        passcode_hash: &str,
    ) -> Result<Worker, AppError> {
        sqlx::query_as::<_, Worker>(
            r#"
            INSERT INTO workers (
                manager_id, first_name, last_name, position, phone_number,
                address, city, state, zip_code, email, passcode_hash,
                date_of_birth, start_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(manager_id)
        .bind(input.first_name.trim())
        .bind(input.last_name.trim())
        .bind(input.position.as_deref())
        .bind(input.phone_number.as_deref())
        .bind(input.address.as_deref())
        .bind(input.city.as_deref())
        .bind(input.state.as_deref())
        .bind(input.zip_code.as_deref())
        .bind(email)
        .bind(passcode_hash)
        .bind(input.date_of_birth)
        .bind(input.start_date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_worker_write_error)
    }

    /// Atualização parcial: NULL no parâmetro mantém o valor atual.
    pub async fn update_worker(
        &self,
        manager_id: Uuid,
        id: Uuid,
        input: &UpdateWorkerPayload,
        email: Option<&str>,
    ) -> Result<Option<Worker>, AppError> {
        sqlx::query_as::<_, Worker>(
            r#"
            UPDATE workers SET
                first_name    = COALESCE($3, first_name),
                last_name     = COALESCE($4, last_name),
                position      = COALESCE($5, position),
                phone_number  = COALESCE($6, phone_number),
                address       = COALESCE($7, address),
                city          = COALESCE($8, city),
                state         = COALESCE($9, state),
                zip_code      = COALESCE($10, zip_code),
                email         = COALESCE($11, email),
                date_of_birth = COALESCE($12, date_of_birth),
                start_date    = COALESCE($13, start_date),
                updated_at    = NOW()
            WHERE manager_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(manager_id)
        .bind(id)
        .bind(input.first_name.as_deref().map(str::trim))
        .bind(input.last_name.as_deref().map(str::trim))
        .bind(input.position.as_deref())
        .bind(input.phone_number.as_deref())
        .bind(input.address.as_deref())
        .bind(input.city.as_deref())
        .bind(input.state.as_deref())
        .bind(input.zip_code.as_deref())
        .bind(email)
        .bind(input.date_of_birth)
        .bind(input.start_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_worker_write_error)
    }

    pub async fn update_passcode(
        &self,
        manager_id: Uuid,
        id: Uuid,
        passcode_hash: &str,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE workers SET passcode_hash = $3, updated_at = NOW()
            WHERE manager_id = $1 AND id = $2
            "#,
        )
        .bind(manager_id)
        .bind(id)
        .bind(passcode_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Exclui em lote, mas só funcionários do próprio gerente.
    pub async fn delete_many(&self, manager_id: Uuid, ids: &[Uuid]) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM workers WHERE manager_id = $1 AND id = ANY($2)")
            .bind(manager_id)
            .bind(ids)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
