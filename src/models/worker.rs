// src/models/worker.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

// Um funcionário pertence a exatamente um gerente
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: Uuid,
    pub manager_id: Uuid,

    #[schema(example = "João")]
    pub first_name: String,
    #[schema(example = "Silva")]
    pub last_name: String,
    #[schema(example = "Barista")]
    pub position: Option<String>,
    #[schema(example = "(11) 99999-8888")]
    pub phone_number: Option<String>,

    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,

    #[schema(example = "joao@shifteaze.com")]
    pub email: String,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub passcode_hash: String,

    pub date_of_birth: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Worker {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// Nomes são gravados sem espaços nas pontas; só espaços equivale a vazio
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("validation.required".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkerPayload {
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    pub position: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    #[validate(email(message = "validation.email"))]
    pub email: String,
    #[validate(length(min = 4, message = "validation.passcode_length"))]
    pub passcode: String,
    pub date_of_birth: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
}

// Atualização parcial: campos ausentes ficam como estão
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkerPayload {
    #[validate(custom(function = "not_blank"))]
    pub first_name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    #[validate(email(message = "validation.email"))]
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasscodePayload {
    #[validate(length(min = 4, message = "validation.passcode_length"))]
    pub passcode: String,
}

// Filtros da lista de funcionários
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WorkerListQuery {
    /// Trecho do nome ou sobrenome (sem diferenciar maiúsculas)
    pub search: Option<String>,
    /// Cargo exato
    pub position: Option<String>,
}

// Funcionários marcados na tabela (exclusão em lote e exportação CSV)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSelectionPayload {
    #[validate(length(min = 1, message = "validation.required"))]
    pub worker_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteWorkersResponse {
    pub deleted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_payload(first: &str, last: &str) -> CreateWorkerPayload {
        CreateWorkerPayload {
            first_name: first.into(),
            last_name: last.into(),
            position: None,
            phone_number: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            email: "joao@x.com".into(),
            passcode: "1234".into(),
            date_of_birth: None,
            start_date: None,
        }
    }

    #[test]
    fn whitespace_only_names_are_rejected_on_create() {
        let errors = create_payload("   ", "Silva").validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("first_name"));
        assert!(!fields.contains_key("last_name"));
        assert_eq!(
            fields["first_name"][0].message.as_deref(),
            Some("validation.required")
        );
        assert!(create_payload(" João ", "Silva").validate().is_ok());
    }

    #[test]
    fn whitespace_only_names_are_rejected_on_update() {
        let blank = UpdateWorkerPayload { last_name: Some("\t ".into()), ..Default::default() };
        assert!(blank.validate().unwrap_err().field_errors().contains_key("last_name"));

        // Campo ausente continua valendo como "não alterar"
        assert!(UpdateWorkerPayload::default().validate().is_ok());
    }
}
