// src/services/leave_service.rs

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{LeaveRepository, WorkerRepository},
    models::leave::{CreateLeaveRequestPayload, LeaveRequest},
};

/// Datas em ordem e sem repetição.
pub fn normalize_dates(dates: &[NaiveDate]) -> Vec<NaiveDate> {
    let mut dates = dates.to_vec();
    dates.sort();
    dates.dedup();
    dates
}

#[derive(Clone)]
pub struct LeaveService {
    leave_repo: LeaveRepository,
    worker_repo: WorkerRepository,
}

impl LeaveService {
    pub fn new(leave_repo: LeaveRepository, worker_repo: WorkerRepository) -> Self {
        Self { leave_repo, worker_repo }
    }

    /// Nome, e-mail e gerente vêm do cadastro do funcionário, não do corpo da requisição.
    pub async fn request_leave(
        &self,
        manager_id: Uuid,
        worker_id: Uuid,
        payload: &CreateLeaveRequestPayload,
    ) -> Result<LeaveRequest, AppError> {
        let worker = self
            .worker_repo
            .find_by_id(manager_id, worker_id)
            .await?
            .ok_or(AppError::WorkerNotFound)?;

        let dates = normalize_dates(&payload.selected_dates);
        let notes = payload.notes.as_deref().map(str::trim).unwrap_or_default();

        let request = self
            .leave_repo
            .create_request(
                worker.manager_id,
                worker.id,
                &worker.full_name(),
                &worker.email,
                &dates,
                notes,
            )
            .await?;

        tracing::info!(
            "🏖️ Pedido de folga {} ({} dia(s)) do funcionário {}",
            request.id,
            dates.len(),
            worker.id
        );
        Ok(request)
    }

    pub async fn list_leave_requests(&self, manager_id: Uuid) -> Result<Vec<LeaveRequest>, AppError> {
        self.leave_repo.list_by_manager(manager_id).await
    }

    pub async fn my_leave_requests(
        &self,
        manager_id: Uuid,
        worker_id: Uuid,
    ) -> Result<Vec<LeaveRequest>, AppError> {
        self.leave_repo.list_by_worker(manager_id, worker_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn dates_are_sorted_and_deduplicated() {
        let dates = normalize_dates(&[date(12), date(3), date(12), date(7)]);
        assert_eq!(dates, [date(3), date(7), date(12)]);
    }

    #[test]
    fn at_least_one_date_is_required() {
        let payload = CreateLeaveRequestPayload { selected_dates: vec![], notes: None };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("selected_dates"));

        let payload = CreateLeaveRequestPayload { selected_dates: vec![date(3)], notes: None };
        assert!(payload.validate().is_ok());
    }
}
