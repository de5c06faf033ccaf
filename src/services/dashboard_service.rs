// src/services/dashboard_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{LeaveRepository, MessageRepository, WorkerRepository},
    models::dashboard::DashboardOverview,
    services::roster_service::distinct_positions,
};

#[derive(Clone)]
pub struct DashboardService {
    worker_repo: WorkerRepository,
    message_repo: MessageRepository,
    leave_repo: LeaveRepository,
}

impl DashboardService {
    pub fn new(
        worker_repo: WorkerRepository,
        message_repo: MessageRepository,
        leave_repo: LeaveRepository,
    ) -> Self {
        Self { worker_repo, message_repo, leave_repo }
    }

    pub async fn overview(&self, manager_id: Uuid) -> Result<DashboardOverview, AppError> {
        // As três leituras são independentes
        let (workers, messages, leave_requests) = tokio::try_join!(
            self.worker_repo.list_by_manager(manager_id),
            self.message_repo.list_by_manager(manager_id),
            self.leave_repo.list_by_manager(manager_id),
        )?;

        Ok(DashboardOverview {
            worker_count: workers.len(),
            positions: distinct_positions(&workers),
            messages,
            leave_requests,
        })
    }
}
