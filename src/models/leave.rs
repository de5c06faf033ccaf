// src/models/leave.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Pedido de folga. Só é criado, nunca muda de estado.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: Uuid,
    pub manager_id: Uuid,
    pub worker_id: Option<Uuid>,
    #[schema(example = "João Silva")]
    pub worker_name: String,
    pub email: String,
    pub selected_dates: Vec<NaiveDate>,
    pub notes: String,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequestPayload {
    #[validate(length(min = 1, message = "validation.dates_required"))]
    pub selected_dates: Vec<NaiveDate>,
    #[validate(length(max = 2000, message = "validation.too_long"))]
    #[schema(example = "Consulta médica")]
    pub notes: Option<String>,
}
