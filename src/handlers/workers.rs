// src/handlers/workers.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, rbac::ManagerSession},
    models::worker::{
        CreateWorkerPayload, DeleteWorkersResponse, UpdatePasscodePayload, UpdateWorkerPayload,
        Worker, WorkerListQuery, WorkerSelectionPayload,
    },
};

#[utoipa::path(
    post,
    path = "/api/workers",
    tag = "Workers",
    request_body = CreateWorkerPayload,
    responses(
        (status = 201, description = "Funcionário criado", body = Worker),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já cadastrado na equipe")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_worker(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
    Json(payload): Json<CreateWorkerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let worker = app_state
        .roster_service
        .create_worker(session.principal.manager_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(worker)))
}

#[utoipa::path(
    get,
    path = "/api/workers",
    tag = "Workers",
    params(WorkerListQuery),
    responses(
        (status = 200, description = "Equipe do gerente, por nome", body = Vec<Worker>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_workers(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
    Query(query): Query<WorkerListQuery>,
) -> Result<Json<Vec<Worker>>, ApiError> {
    let workers = app_state
        .roster_service
        .list_workers(session.principal.manager_id, &query)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(workers))
}

#[utoipa::path(
    get,
    path = "/api/workers/positions",
    tag = "Workers",
    responses(
        (status = 200, description = "Cargos distintos da equipe", body = Vec<String>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_positions(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
) -> Result<Json<Vec<String>>, ApiError> {
    let positions = app_state
        .roster_service
        .list_positions(session.principal.manager_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(positions))
}

#[utoipa::path(
    get,
    path = "/api/workers/{id}",
    tag = "Workers",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 200, description = "Funcionário", body = Worker),
        (status = 404, description = "Funcionário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_worker(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
    Path(id): Path<Uuid>,
) -> Result<Json<Worker>, ApiError> {
    let worker = app_state
        .roster_service
        .get_worker(session.principal.manager_id, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(worker))
}

#[utoipa::path(
    put,
    path = "/api/workers/{id}",
    tag = "Workers",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    request_body = UpdateWorkerPayload,
    responses(
        (status = 200, description = "Funcionário atualizado", body = Worker),
        (status = 404, description = "Funcionário não encontrado"),
        (status = 409, description = "E-mail já cadastrado na equipe")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_worker(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateWorkerPayload>,
) -> Result<Json<Worker>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let worker = app_state
        .roster_service
        .update_worker(session.principal.manager_id, id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(worker))
}

#[utoipa::path(
    put,
    path = "/api/workers/{id}/passcode",
    tag = "Workers",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    request_body = UpdatePasscodePayload,
    responses(
        (status = 204, description = "Passcode alterado"),
        (status = 404, description = "Funcionário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_passcode(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePasscodePayload>,
) -> Result<StatusCode, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .roster_service
        .update_passcode(session.principal.manager_id, id, &payload.passcode)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/workers/delete",
    tag = "Workers",
    request_body = WorkerSelectionPayload,
    responses(
        (status = 200, description = "Quantidade excluída", body = DeleteWorkersResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_workers(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
    Json(payload): Json<WorkerSelectionPayload>,
) -> Result<Json<DeleteWorkersResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let deleted = app_state
        .roster_service
        .delete_workers(session.principal.manager_id, &payload.worker_ids)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(DeleteWorkersResponse { deleted }))
}

#[utoipa::path(
    post,
    path = "/api/workers/export",
    tag = "Workers",
    request_body = WorkerSelectionPayload,
    responses(
        (status = 200, description = "CSV com os funcionários selecionados", content_type = "text/csv", body = String)
    ),
    security(("api_jwt" = []))
)]
pub async fn export_workers(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
    Json(payload): Json<WorkerSelectionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let csv = app_state
        .roster_service
        .export_csv(session.principal.manager_id, &payload.worker_ids)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"workers.csv\""),
        ],
        csv,
    ))
}
