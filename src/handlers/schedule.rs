// src/handlers/schedule.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{ManagerSession, WorkerSession},
    },
    models::schedule::{
        CreateShiftPayload, ShiftListQuery, ShiftLookupQuery, ShiftLookupResponse, ShiftView,
        WeekDays, WeekQuery, WeekSchedule,
    },
    services::calendar::{day_headers, week_of},
};

#[utoipa::path(
    get,
    path = "/api/calendar/week",
    tag = "Schedule",
    params(WeekQuery),
    responses(
        (status = 200, description = "Segunda a domingo da semana que contém a data", body = WeekDays),
        (status = 400, description = "Semana fora dos limites do calendário")
    )
)]
pub async fn calendar_week(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<WeekQuery>,
) -> Result<Json<WeekDays>, ApiError> {
    let days = week_of(query.date.unwrap_or_else(|| Utc::now().date_naive()))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(WeekDays { days: day_headers(&days) }))
}

#[utoipa::path(
    post,
    path = "/api/shifts",
    tag = "Schedule",
    request_body = CreateShiftPayload,
    responses(
        (status = 201, description = "Turno gravado (substitui o do mesmo dia)", body = ShiftView),
        (status = 404, description = "Funcionário não pertence ao gerente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_shift(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
    Json(payload): Json<CreateShiftPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let shift = app_state
        .schedule_service
        .create_shift(session.principal.manager_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(shift)))
}

#[utoipa::path(
    get,
    path = "/api/shifts",
    tag = "Schedule",
    params(ShiftListQuery),
    responses(
        (status = 200, description = "Turnos no intervalo (inclusivo)", body = Vec<ShiftView>),
        (status = 400, description = "Intervalo de datas inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_shifts(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
    Query(query): Query<ShiftListQuery>,
) -> Result<Json<Vec<ShiftView>>, ApiError> {
    let shifts = app_state
        .schedule_service
        .list_shifts(session.principal.manager_id, query.from, query.to, query.worker_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(shifts))
}

#[utoipa::path(
    delete,
    path = "/api/shifts/{id}",
    tag = "Schedule",
    params(("id" = Uuid, Path, description = "ID do turno")),
    responses(
        (status = 204, description = "Turno excluído"),
        (status = 404, description = "Turno não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_shift(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state
        .schedule_service
        .delete_shift(session.principal.manager_id, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/shifts/lookup",
    tag = "Schedule",
    params(ShiftLookupQuery),
    responses(
        (status = 200, description = "Rótulo \"HH:MM - HH:MM\" ou vazio", body = ShiftLookupResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn lookup_shift(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
    Query(query): Query<ShiftLookupQuery>,
) -> Result<Json<ShiftLookupResponse>, ApiError> {
    let lookup = app_state
        .schedule_service
        .shift_for(session.principal.manager_id, query.worker_id, query.date)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(lookup))
}

#[utoipa::path(
    get,
    path = "/api/schedule/week",
    tag = "Schedule",
    params(WeekQuery),
    responses(
        (status = 200, description = "Grade semanal da equipe", body = WeekSchedule)
    ),
    security(("api_jwt" = []))
)]
pub async fn week_schedule(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
    Query(query): Query<WeekQuery>,
) -> Result<Json<WeekSchedule>, ApiError> {
    let schedule = app_state
        .schedule_service
        .week_schedule(session.principal.manager_id, query.date)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(schedule))
}

#[utoipa::path(
    get,
    path = "/api/me/schedule",
    tag = "Schedule",
    params(WeekQuery),
    responses(
        (status = 200, description = "Semana do funcionário logado", body = WeekSchedule)
    ),
    security(("api_jwt" = []))
)]
pub async fn my_week(
    State(app_state): State<AppState>,
    locale: Locale,
    session: WorkerSession,
    Query(query): Query<WeekQuery>,
) -> Result<Json<WeekSchedule>, ApiError> {
    let schedule = app_state
        .schedule_service
        .my_week(session.principal.manager_id, session.principal.id, query.date)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(schedule))
}
