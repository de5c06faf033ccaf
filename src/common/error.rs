// src/common/error.rs

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// O erro de domínio. Serviços e repositórios só conhecem este tipo.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail already in use")]
    EmailAlreadyExists,

    #[error("Worker e-mail already in use for this manager")]
    WorkerEmailAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Forbidden")]
    Forbidden,

    #[error("Manager not found")]
    ManagerNotFound,

    #[error("Worker not found")]
    WorkerNotFound,

    #[error("Support message not found")]
    MessageNotFound,

    #[error("Shift not found")]
    ShiftNotFound,

    #[error("No associated manager found for this email")]
    NoAssociatedManager,

    #[error("Invalid date range")]
    InvalidDateRange,

    #[error("Federated sign-in disabled")]
    FederatedSignInDisabled,

    #[error("Invalid identity assertion")]
    InvalidAssertion,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidDateRange => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists | AppError::WorkerEmailAlreadyExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken | AppError::InvalidAssertion => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::ManagerNotFound
            | AppError::WorkerNotFound
            | AppError::MessageNotFound
            | AppError::ShiftNotFound
            | AppError::NoAssociatedManager => StatusCode::NOT_FOUND,
            AppError::FederatedSignInDisabled => StatusCode::NOT_IMPLEMENTED,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Chave do catálogo de mensagens (locales/*.json).
    pub fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "errors.validation",
            AppError::EmailAlreadyExists => "errors.email_exists",
            AppError::WorkerEmailAlreadyExists => "errors.worker_email_exists",
            AppError::InvalidCredentials => "errors.invalid_credentials",
            AppError::InvalidToken => "errors.invalid_token",
            AppError::Forbidden => "errors.forbidden",
            AppError::ManagerNotFound => "errors.manager_not_found",
            AppError::WorkerNotFound => "errors.worker_not_found",
            AppError::MessageNotFound => "errors.message_not_found",
            AppError::ShiftNotFound => "errors.shift_not_found",
            AppError::NoAssociatedManager => "errors.no_associated_manager",
            AppError::InvalidDateRange => "errors.invalid_date_range",
            AppError::FederatedSignInDisabled => "errors.federated_disabled",
            AppError::InvalidAssertion => "errors.invalid_assertion",
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => "errors.internal",
        }
    }

    /// Converte o erro de domínio na resposta HTTP, já traduzida para o idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // O detalhe fica no log, nunca na resposta
            tracing::error!("🔥 Erro interno do servidor: {}", self);
        }

        let details = match self {
            AppError::ValidationError(errors) => {
                let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(key) => store.translate(&locale.0, key),
                            None => e.code.to_string(),
                        })
                        .collect();
                    fields.insert(field.to_string(), messages);
                }
                Some(json!(fields))
            }
            _ => None,
        };

        ApiError {
            status,
            error: store.translate(&locale.0, self.message_key()),
            details,
        }
    }
}

// O erro já pronto para sair pela API
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(email(message = "validation.email"))]
        email: String,
    }

    fn english() -> Locale {
        Locale("en".to_string())
    }

    #[test]
    fn not_found_variants_map_to_404() {
        for err in [
            AppError::ManagerNotFound,
            AppError::WorkerNotFound,
            AppError::MessageNotFound,
            AppError::ShiftNotFound,
            AppError::NoAssociatedManager,
        ] {
            assert_eq!(err.status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn failed_sign_in_is_a_plain_status_string() {
        let store = I18nStore::embedded().unwrap();
        let api = AppError::InvalidCredentials.to_api_error(&english(), &store);

        assert_eq!(api.status, StatusCode::UNAUTHORIZED);
        assert_eq!(api.error, "Invalid Email or Password, please try again.");
        assert!(api.details.is_none());
    }

    #[test]
    fn internal_errors_hide_the_underlying_message() {
        let store = I18nStore::embedded().unwrap();
        let err = AppError::InternalServerError(anyhow::anyhow!("pool exhausted"));
        let api = err.to_api_error(&english(), &store);

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("pool exhausted"));
    }

    #[test]
    fn validation_details_are_translated_per_field() {
        let store = I18nStore::embedded().unwrap();
        let errors = Probe { email: "not-an-email".into() }.validate().unwrap_err();
        let api = AppError::ValidationError(errors).to_api_error(&Locale("pt".into()), &store);

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.unwrap();
        assert_eq!(details["email"][0], "O e-mail fornecido é inválido.");
    }
}
