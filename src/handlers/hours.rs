// src/handlers/hours.rs

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{ManagerSession, WorkerSession},
    },
    models::hours::{HoursDay, HoursQuery, RecordHoursPayload, WorkLog},
};

#[utoipa::path(
    put,
    path = "/api/workers/{id}/hours/{date}",
    tag = "Hours",
    params(
        ("id" = Uuid, Path, description = "ID do funcionário"),
        ("date" = NaiveDate, Path, description = "Dia trabalhado (AAAA-MM-DD)")
    ),
    request_body = RecordHoursPayload,
    responses(
        (status = 200, description = "Horas gravadas (substituem as do mesmo dia)", body = WorkLog),
        (status = 404, description = "Funcionário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn record_hours(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
    Path((worker_id, date)): Path<(Uuid, NaiveDate)>,
    Json(payload): Json<RecordHoursPayload>,
) -> Result<Json<WorkLog>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let log = app_state
        .hours_service
        .record_hours(session.principal.manager_id, worker_id, date, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(log))
}

#[utoipa::path(
    get,
    path = "/api/hours",
    tag = "Hours",
    params(HoursQuery),
    responses(
        (status = 200, description = "Horas da equipe agrupadas por dia", body = Vec<HoursDay>),
        (status = 400, description = "Intervalo de datas inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn hours_by_date(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
    Query(query): Query<HoursQuery>,
) -> Result<Json<Vec<HoursDay>>, ApiError> {
    let days = app_state
        .hours_service
        .hours_by_date(session.principal.manager_id, &query)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(days))
}

#[utoipa::path(
    get,
    path = "/api/me/hours",
    tag = "Hours",
    params(HoursQuery),
    responses(
        (status = 200, description = "Horas do funcionário logado", body = Vec<HoursDay>)
    ),
    security(("api_jwt" = []))
)]
pub async fn my_hours(
    State(app_state): State<AppState>,
    locale: Locale,
    session: WorkerSession,
    Query(query): Query<HoursQuery>,
) -> Result<Json<Vec<HoursDay>>, ApiError> {
    let days = app_state
        .hours_service
        .my_hours(session.principal.manager_id, session.principal.id, &query)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(days))
}
