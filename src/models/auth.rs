// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::worker::Worker;

// Papel de quem está logado. Gerente e funcionário nunca se misturam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Worker,
}

// Representa um gerente vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Manager {
    pub id: Uuid,
    #[schema(example = "gerente@shifteaze.com")]
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    #[schema(example = "Ana Souza")]
    pub display_name: Option<String>,
    pub photo_url: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para registro de um novo gerente
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterManagerPayload {
    #[validate(email(message = "validation.email"))]
    #[schema(example = "gerente@shifteaze.com")]
    pub email: String,
    #[validate(length(min = 6, message = "validation.password_length"))]
    pub password: String,
    #[validate(length(max = 120, message = "validation.too_long"))]
    pub display_name: Option<String>,
}

// Dados para login. `password` é a senha do gerente ou o passcode do funcionário.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[validate(email(message = "validation.email"))]
    #[schema(example = "joao@shifteaze.com")]
    pub email: String,
    #[validate(length(min = 1, message = "validation.required"))]
    pub password: String,
    /// Opcional: restringe a busca de funcionários a um único gerente.
    pub manager_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FederatedLoginPayload {
    /// JWT HS256 emitido pelo provedor de identidade federado.
    #[validate(length(min = 1, message = "validation.required"))]
    pub assertion: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequestPayload {
    #[validate(email(message = "validation.email"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetConfirmPayload {
    #[validate(length(min = 1, message = "validation.required"))]
    pub token: String,
    #[validate(length(min = 6, message = "validation.password_length"))]
    pub new_password: String,
}

// Resposta de registro com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Resposta do login: o token e para onde o cliente deve ir
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub token: String,
    pub role: Role,
    #[schema(example = "/workerLandingPage?managerId=6a1f...&workerId=9b2c...")]
    pub redirect: String,
    pub manager_id: Uuid,
    pub worker_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub role: Role,
    pub manager: Option<Manager>,
    pub worker: Option<Worker>,
}

// Estrutura de dados ("claims") dentro do JWT de sessão
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Gerente ou funcionário
    pub role: Role,
    pub mgr: Uuid,  // Gerente dono da sessão (igual a `sub` para gerentes)
    pub exp: usize,
    pub iat: usize,
}

// Claims do token de redefinição de senha
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetClaims {
    pub sub: Uuid,
    pub purpose: String,
    pub exp: usize,
    pub iat: usize,
}

// Claims da asserção do provedor federado
#[derive(Debug, Serialize, Deserialize)]
pub struct FederatedClaims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
}

/// Quem está fazendo a requisição, já validado pelo middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub role: Role,
    pub manager_id: Uuid,
}

impl From<&Claims> for Principal {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
            manager_id: claims.mgr,
        }
    }
}
