// src/handlers/support.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{ManagerSession, WorkerSession},
    },
    models::support::{DeleteMessageResponse, SendMessagePayload, SupportMessage},
};

#[utoipa::path(
    post,
    path = "/api/support-messages",
    tag = "Support",
    request_body = SendMessagePayload,
    responses(
        (status = 201, description = "Mensagem enviada ao gerente", body = SupportMessage)
    ),
    security(("api_jwt" = []))
)]
pub async fn send_message(
    State(app_state): State<AppState>,
    locale: Locale,
    session: WorkerSession,
    Json(payload): Json<SendMessagePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let message = app_state
        .support_service
        .send_message(session.principal.manager_id, session.principal.id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(message)))
}

#[utoipa::path(
    get,
    path = "/api/support-messages",
    tag = "Support",
    responses(
        (status = 200, description = "Mensagens recebidas, mais recentes primeiro", body = Vec<SupportMessage>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_messages(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
) -> Result<Json<Vec<SupportMessage>>, ApiError> {
    let messages = app_state
        .support_service
        .list_messages(session.principal.manager_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(messages))
}

#[utoipa::path(
    delete,
    path = "/api/support-messages/{id}",
    tag = "Support",
    params(("id" = Uuid, Path, description = "ID da mensagem")),
    responses(
        (status = 200, description = "Mensagem excluída; devolve as restantes", body = DeleteMessageResponse),
        (status = 404, description = "Mensagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_message(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteMessageResponse>, ApiError> {
    let response = app_state
        .support_service
        .delete_message(session.principal.manager_id, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(response))
}
