// src/models/schedule.rs

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// Horário no formato do formulário ("09:00"); segundos são aceitos na entrada.
pub mod clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const INPUT_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

    pub fn parse(raw: &str) -> Option<NaiveTime> {
        INPUT_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(raw.trim(), fmt).ok())
    }

    pub fn format(time: &NaiveTime) -> String {
        time.format("%H:%M").to_string()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("horário inválido '{}', esperado HH:MM", raw))
        })
    }
}

// Linha da tabela `shifts`: um turno por funcionário por dia
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Shift {
    pub id: Uuid,
    pub manager_id: Uuid,
    pub worker_id: Uuid,
    pub title: String,
    pub shift_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

impl Shift {
    pub fn start(&self) -> NaiveDateTime {
        self.shift_date.and_time(self.start_time)
    }

    /// Um fim antes (ou igual) ao início é um turno que atravessa a meia-noite.
    /// No último dia do calendário não há dia seguinte; o fim fica no próprio dia.
    pub fn end(&self) -> NaiveDateTime {
        let end = self.shift_date.and_time(self.end_time);
        if self.end_time <= self.start_time {
            end.checked_add_days(Days::new(1)).unwrap_or(end)
        } else {
            end
        }
    }

    /// Texto exibido na célula do calendário: "09:00 - 17:00".
    pub fn label(&self) -> String {
        format!("{} - {}", clock::format(&self.start_time), clock::format(&self.end_time))
    }
}

// O turno como sai pela API
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShiftView {
    pub id: Uuid,
    pub worker_id: Uuid,
    #[schema(example = "João Silva")]
    pub title: String,
    pub date: NaiveDate,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(with = "clock")]
    #[schema(value_type = String, example = "09:00")]
    pub start_time: NaiveTime,
    #[serde(with = "clock")]
    #[schema(value_type = String, example = "17:00")]
    pub end_time: NaiveTime,
    #[schema(example = "09:00 - 17:00")]
    pub label: String,
}

impl From<&Shift> for ShiftView {
    fn from(shift: &Shift) -> Self {
        Self {
            id: shift.id,
            worker_id: shift.worker_id,
            title: shift.title.clone(),
            date: shift.shift_date,
            start: shift.start(),
            end: shift.end(),
            start_time: shift.start_time,
            end_time: shift.end_time,
            label: shift.label(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShiftPayload {
    pub worker_id: Uuid,
    #[schema(example = "2024-06-03")]
    pub date: NaiveDate,
    #[serde(with = "clock")]
    #[schema(value_type = String, example = "09:00")]
    pub start_time: NaiveTime,
    #[serde(with = "clock")]
    #[schema(value_type = String, example = "17:00")]
    pub end_time: NaiveTime,
    /// Padrão: nome completo do funcionário
    #[validate(length(min = 1, max = 200, message = "validation.too_long"))]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShiftListQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub worker_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShiftLookupQuery {
    pub worker_id: Uuid,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShiftLookupResponse {
    pub worker_id: Uuid,
    pub date: NaiveDate,
    /// Vazio quando não há turno no dia
    pub label: String,
    pub shift: Option<ShiftView>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WeekQuery {
    /// Qualquer dia da semana desejada (padrão: hoje)
    pub date: Option<NaiveDate>,
}

// Cabeçalho de coluna do calendário semanal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayHeader {
    pub date: NaiveDate,
    #[schema(example = "Monday")]
    pub weekday: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeekDays {
    pub days: Vec<DayHeader>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub worker_id: Uuid,
    pub worker_name: String,
    /// Uma célula por dia (segunda a domingo); vazia quando não há turno
    pub cells: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeekSchedule {
    pub days: Vec<DayHeader>,
    pub rows: Vec<ScheduleRow>,
}
