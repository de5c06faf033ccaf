// src/models/support.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::worker::not_blank;

// Mensagem do funcionário para o gerente (aparece no dashboard)
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupportMessage {
    pub id: Uuid,
    pub manager_id: Uuid,
    pub worker_id: Option<Uuid>,
    #[schema(example = "João Silva")]
    pub name: String,
    pub email: String,
    #[schema(example = "Posso trocar meu turno de sexta?")]
    pub message: String,
    pub worker_first_name: String,
    pub worker_last_name: String,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    /// Padrão: nome completo do funcionário
    #[validate(length(min = 1, max = 120, message = "validation.too_long"))]
    pub name: Option<String>,
    #[validate(
        length(min = 1, max = 5000, message = "validation.required"),
        custom(function = "not_blank")
    )]
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMessageResponse {
    pub deleted_id: Uuid,
    /// A lista como ficou depois da exclusão
    pub remaining: Vec<SupportMessage>,
}
