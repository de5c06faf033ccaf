// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{leave::LeaveRequest, support::SupportMessage};

// Tudo o que a tela inicial do gerente precisa numa única chamada
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub worker_count: usize,
    pub positions: Vec<String>,
    pub messages: Vec<SupportMessage>,   // Mais recentes primeiro
    pub leave_requests: Vec<LeaveRequest>, // Mais recentes primeiro
}
