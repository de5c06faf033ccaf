// src/handlers/leave.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{ManagerSession, WorkerSession},
    },
    models::leave::{CreateLeaveRequestPayload, LeaveRequest},
};

#[utoipa::path(
    post,
    path = "/api/leave-requests",
    tag = "Leave",
    request_body = CreateLeaveRequestPayload,
    responses(
        (status = 201, description = "Pedido de folga registrado", body = LeaveRequest),
        (status = 400, description = "Nenhuma data selecionada")
    ),
    security(("api_jwt" = []))
)]
pub async fn request_leave(
    State(app_state): State<AppState>,
    locale: Locale,
    session: WorkerSession,
    Json(payload): Json<CreateLeaveRequestPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let request = app_state
        .leave_service
        .request_leave(session.principal.manager_id, session.principal.id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(request)))
}

#[utoipa::path(
    get,
    path = "/api/leave-requests",
    tag = "Leave",
    responses(
        (status = 200, description = "Pedidos da equipe, mais recentes primeiro", body = Vec<LeaveRequest>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_leave_requests(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
) -> Result<Json<Vec<LeaveRequest>>, ApiError> {
    let requests = app_state
        .leave_service
        .list_leave_requests(session.principal.manager_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(requests))
}

#[utoipa::path(
    get,
    path = "/api/me/leave-requests",
    tag = "Leave",
    responses(
        (status = 200, description = "Pedidos do funcionário logado", body = Vec<LeaveRequest>)
    ),
    security(("api_jwt" = []))
)]
pub async fn my_leave_requests(
    State(app_state): State<AppState>,
    locale: Locale,
    session: WorkerSession,
) -> Result<Json<Vec<LeaveRequest>>, ApiError> {
    let requests = app_state
        .leave_service
        .my_leave_requests(session.principal.manager_id, session.principal.id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(requests))
}
