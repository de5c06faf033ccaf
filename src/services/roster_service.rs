// src/services/roster_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::WorkerRepository,
    models::worker::{CreateWorkerPayload, UpdateWorkerPayload, Worker, WorkerListQuery},
    services::{
        auth::hash_secret,
        export::{select_workers, workers_to_csv},
        identity::normalize_email,
    },
};

/// Filtros da tela de funcionários aplicados sobre o quadro já ordenado.
pub fn filter_workers(workers: Vec<Worker>, query: &WorkerListQuery) -> Vec<Worker> {
    let search = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());
    let position = query.position.as_deref().filter(|p| !p.is_empty());

    workers
        .into_iter()
        .filter(|worker| match &search {
            Some(term) => {
                worker.first_name.to_lowercase().contains(term)
                    || worker.last_name.to_lowercase().contains(term)
            }
            None => true,
        })
        .filter(|worker| match position {
            Some(position) => worker.position.as_deref() == Some(position),
            None => true,
        })
        .collect()
}

/// Cargos distintos e não vazios, em ordem alfabética.
pub fn distinct_positions(workers: &[Worker]) -> Vec<String> {
    let mut positions: Vec<String> = workers
        .iter()
        .filter_map(|worker| worker.position.as_deref())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    positions.sort();
    positions.dedup();
    positions
}

#[derive(Clone)]
pub struct RosterService {
    worker_repo: WorkerRepository,
}

impl RosterService {
    pub fn new(worker_repo: WorkerRepository) -> Self {
        Self { worker_repo }
    }

    pub async fn create_worker(
        &self,
        manager_id: Uuid,
        payload: &CreateWorkerPayload,
    ) -> Result<Worker, AppError> {
        let email = normalize_email(&payload.email);
        let passcode_hash = hash_secret(&payload.passcode).await?;

        let worker = self
            .worker_repo
            .create_worker(manager_id, payload, &email, &passcode_hash)
            .await?;

        tracing::info!("➕ Funcionário {} criado pelo gerente {}", worker.id, manager_id);
        Ok(worker)
    }

    pub async fn list_workers(
        &self,
        manager_id: Uuid,
        query: &WorkerListQuery,
    ) -> Result<Vec<Worker>, AppError> {
        let workers = self.worker_repo.list_by_manager(manager_id).await?;
        Ok(filter_workers(workers, query))
    }

    pub async fn list_positions(&self, manager_id: Uuid) -> Result<Vec<String>, AppError> {
        let workers = self.worker_repo.list_by_manager(manager_id).await?;
        Ok(distinct_positions(&workers))
    }

    pub async fn get_worker(&self, manager_id: Uuid, id: Uuid) -> Result<Worker, AppError> {
        self.worker_repo
            .find_by_id(manager_id, id)
            .await?
            .ok_or(AppError::WorkerNotFound)
    }

    pub async fn update_worker(
        &self,
        manager_id: Uuid,
        id: Uuid,
        payload: &UpdateWorkerPayload,
    ) -> Result<Worker, AppError> {
        let email = payload.email.as_deref().map(normalize_email);

        let worker = self
            .worker_repo
            .update_worker(manager_id, id, payload, email.as_deref())
            .await?
            .ok_or(AppError::WorkerNotFound)?;

        tracing::info!("✏️ Funcionário {} atualizado", worker.id);
        Ok(worker)
    }

    pub async fn update_passcode(
        &self,
        manager_id: Uuid,
        id: Uuid,
        passcode: &str,
    ) -> Result<(), AppError> {
        let passcode_hash = hash_secret(passcode).await?;

        if self.worker_repo.update_passcode(manager_id, id, &passcode_hash).await? == 0 {
            return Err(AppError::WorkerNotFound);
        }

        tracing::info!("🔒 Passcode do funcionário {} alterado", id);
        Ok(())
    }

    pub async fn delete_workers(&self, manager_id: Uuid, ids: &[Uuid]) -> Result<u64, AppError> {
        let deleted = self.worker_repo.delete_many(manager_id, ids).await?;
        tracing::info!("🗑️ {} funcionário(s) excluído(s) pelo gerente {}", deleted, manager_id);
        Ok(deleted)
    }

    pub async fn export_csv(&self, manager_id: Uuid, ids: &[Uuid]) -> Result<String, AppError> {
        let roster = self.worker_repo.list_by_manager(manager_id).await?;
        let selected = select_workers(&roster, ids);

        tracing::info!("📄 Exportando {} funcionário(s) em CSV", selected.len());
        Ok(workers_to_csv(&selected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn worker(first: &str, last: &str, position: Option<&str>) -> Worker {
        Worker {
            id: Uuid::new_v4(),
            manager_id: Uuid::new_v4(),
            first_name: first.into(),
            last_name: last.into(),
            position: position.map(str::to_string),
            phone_number: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            email: format!("{}@x.com", first.to_lowercase()),
            passcode_hash: String::new(),
            date_of_birth: None,
            start_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn roster() -> Vec<Worker> {
        vec![
            worker("Ana", "Souza", Some("Barista")),
            worker("Bruno", "Anaya", Some("Caixa")),
            worker("Carla", "Lima", None),
            worker("Diego", "Souza", Some("Barista")),
        ]
    }

    fn names(workers: &[Worker]) -> Vec<&str> {
        workers.iter().map(|w| w.first_name.as_str()).collect()
    }

    #[test]
    fn search_matches_first_or_last_name_ignoring_case() {
        let query = WorkerListQuery { search: Some("ANA".into()), position: None };
        assert_eq!(names(&filter_workers(roster(), &query)), ["Ana", "Bruno"]);
    }

    #[test]
    fn position_filter_is_exact() {
        let query = WorkerListQuery { search: None, position: Some("Barista".into()) };
        assert_eq!(names(&filter_workers(roster(), &query)), ["Ana", "Diego"]);

        let partial = WorkerListQuery { search: None, position: Some("Bar".into()) };
        assert!(filter_workers(roster(), &partial).is_empty());
    }

    #[test]
    fn filters_combine() {
        let query = WorkerListQuery { search: Some("souza".into()), position: Some("Barista".into()) };
        assert_eq!(names(&filter_workers(roster(), &query)), ["Ana", "Diego"]);
    }

    #[test]
    fn blank_filters_keep_everyone() {
        let query = WorkerListQuery { search: Some("  ".into()), position: Some(String::new()) };
        assert_eq!(filter_workers(roster(), &query).len(), 4);
    }

    #[test]
    fn positions_are_distinct_and_sorted() {
        assert_eq!(distinct_positions(&roster()), ["Barista", "Caixa"]);
    }
}
