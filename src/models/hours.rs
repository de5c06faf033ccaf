// src/models/hours.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// Resumo de um dia de trabalho de um funcionário
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkLog {
    pub worker_id: Uuid,
    pub manager_id: Uuid,
    pub work_date: NaiveDate,
    #[schema(example = 8.0)]
    pub work_hours: f64,
    #[schema(example = 1.0)]
    pub break_hours: f64,
    #[schema(example = 7.0)]
    pub paid_hours: f64,
    pub updated_at: DateTime<Utc>,
}

// Linha da consulta com o nome do funcionário (JOIN com workers)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkLogRow {
    pub worker_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub work_date: NaiveDate,
    pub work_hours: f64,
    pub break_hours: f64,
    pub paid_hours: f64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordHoursPayload {
    #[validate(range(min = 0.0, max = 24.0, message = "validation.non_negative"))]
    pub work_hours: f64,
    #[validate(range(min = 0.0, max = 24.0, message = "validation.non_negative"))]
    pub break_hours: f64,
    #[validate(range(min = 0.0, max = 24.0, message = "validation.non_negative"))]
    pub paid_hours: f64,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct HoursQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoursEntry {
    pub worker_id: Uuid,
    #[schema(example = "João Silva")]
    pub name: String,
    pub work_hours: f64,
    pub break_hours: f64,
    pub paid_hours: f64,
}

// Um dia do calendário de horas com todos os funcionários que trabalharam nele
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoursDay {
    pub date: NaiveDate,
    pub entries: Vec<HoursEntry>,
}
