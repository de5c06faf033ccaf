// src/services/schedule_service.rs

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ShiftRepository, WorkerRepository},
    models::schedule::{CreateShiftPayload, ShiftLookupResponse, ShiftView, WeekSchedule},
    services::calendar::{day_headers, week_grid, week_of},
};

/// Intervalo inclusivo; início depois do fim é erro do cliente.
pub fn ensure_range(from: NaiveDate, to: NaiveDate) -> Result<(), AppError> {
    if from > to {
        return Err(AppError::InvalidDateRange);
    }
    Ok(())
}

/// Todo turno precisa de um dia seguinte para poder atravessar a meia-noite.
pub fn ensure_schedulable(date: NaiveDate) -> Result<(), AppError> {
    date.succ_opt().map(|_| ()).ok_or(AppError::InvalidDateRange)
}

#[derive(Clone)]
pub struct ScheduleService {
    shift_repo: ShiftRepository,
    worker_repo: WorkerRepository,
}

impl ScheduleService {
    pub fn new(shift_repo: ShiftRepository, worker_repo: WorkerRepository) -> Self {
        Self { shift_repo, worker_repo }
    }

    /// Uma única escrita: o turno do funcionário no dia é criado ou substituído.
    pub async fn create_shift(
        &self,
        manager_id: Uuid,
        payload: &CreateShiftPayload,
    ) -> Result<ShiftView, AppError> {
        ensure_schedulable(payload.date)?;
        let title = payload.title.as_deref().map(str::trim).filter(|t| !t.is_empty());

        let shift = self
            .shift_repo
            .upsert_shift(
                manager_id,
                payload.worker_id,
                payload.date,
                payload.start_time,
                payload.end_time,
                title,
            )
            .await?
            .ok_or(AppError::WorkerNotFound)?;

        tracing::info!(
            "📅 Turno {} gravado para o funcionário {} em {}",
            shift.id,
            shift.worker_id,
            shift.shift_date
        );
        Ok(ShiftView::from(&shift))
    }

    pub async fn list_shifts(
        &self,
        manager_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        worker_id: Option<Uuid>,
    ) -> Result<Vec<ShiftView>, AppError> {
        ensure_range(from, to)?;

        let shifts = self.shift_repo.list_in_range(manager_id, from, to, worker_id).await?;
        Ok(shifts.iter().map(ShiftView::from).collect())
    }

    pub async fn delete_shift(&self, manager_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if self.shift_repo.delete_shift(manager_id, id).await? == 0 {
            return Err(AppError::ShiftNotFound);
        }
        tracing::info!("🗑️ Turno {} excluído", id);
        Ok(())
    }

    /// Célula do calendário: rótulo do turno ou vazio.
    pub async fn shift_for(
        &self,
        manager_id: Uuid,
        worker_id: Uuid,
        date: NaiveDate,
    ) -> Result<ShiftLookupResponse, AppError> {
        let shift = self.shift_repo.find_for_day(manager_id, worker_id, date).await?;

        Ok(ShiftLookupResponse {
            worker_id,
            date,
            label: shift.as_ref().map(|s| s.label()).unwrap_or_default(),
            shift: shift.as_ref().map(ShiftView::from),
        })
    }

    pub async fn week_schedule(
        &self,
        manager_id: Uuid,
        date: Option<NaiveDate>,
    ) -> Result<WeekSchedule, AppError> {
        let days = week_of(date.unwrap_or_else(|| Utc::now().date_naive()))?;

        let workers = self.worker_repo.list_by_manager(manager_id).await?;
        let shifts = self
            .shift_repo
            .list_in_range(manager_id, days[0], days[6], None)
            .await?;

        Ok(WeekSchedule {
            days: day_headers(&days),
            rows: week_grid(&days, &workers, &shifts),
        })
    }

    /// A mesma grade, só com a linha de quem está logado.
    pub async fn my_week(
        &self,
        manager_id: Uuid,
        worker_id: Uuid,
        date: Option<NaiveDate>,
    ) -> Result<WeekSchedule, AppError> {
        let days = week_of(date.unwrap_or_else(|| Utc::now().date_naive()))?;

        let worker = self
            .worker_repo
            .find_by_id(manager_id, worker_id)
            .await?
            .ok_or(AppError::WorkerNotFound)?;
        let shifts = self
            .shift_repo
            .list_in_range(manager_id, days[0], days[6], Some(worker_id))
            .await?;

        Ok(WeekSchedule {
            days: day_headers(&days),
            rows: week_grid(&days, std::slice::from_ref(&worker), &shifts),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_is_rejected() {
        let from = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();

        assert!(matches!(ensure_range(from, to), Err(AppError::InvalidDateRange)));
        assert!(ensure_range(to, from).is_ok());
        assert!(ensure_range(from, from).is_ok());
    }

    #[test]
    fn last_calendar_date_cannot_hold_a_shift() {
        assert!(matches!(
            ensure_schedulable(NaiveDate::MAX),
            Err(AppError::InvalidDateRange)
        ));
        assert!(ensure_schedulable(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()).is_ok());
    }
}
