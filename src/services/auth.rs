// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ManagerRepository, WorkerRepository},
    models::{
        auth::{
            Claims, FederatedClaims, MeResponse, Principal, ResetClaims, Role, SignInResponse,
        },
        worker::Worker,
    },
    services::identity::{normalize_email, route_credentials, route_verified_email, Landing},
};

const RESET_PURPOSE: &str = "reset";

/// Emite e confere os JWTs de sessão e de redefinição de senha.
#[derive(Clone)]
pub struct SessionKeys {
    secret: String,
    ttl: Duration,
    reset_ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: String, ttl_hours: i64, reset_ttl_minutes: i64) -> Self {
        Self {
            secret,
            ttl: Duration::hours(ttl_hours),
            reset_ttl: Duration::minutes(reset_ttl_minutes),
        }
    }

    pub fn issue(&self, principal: &Principal) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: principal.id,
            role: principal.role,
            mgr: principal.manager_id,
            exp: (now + self.ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )?)
    }

    pub fn decode(&self, token: &str) -> Result<Principal, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(Principal::from(&token_data.claims))
    }

    pub fn issue_reset(&self, manager_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = ResetClaims {
            sub: manager_id,
            purpose: RESET_PURPOSE.to_string(),
            exp: (now + self.reset_ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )?)
    }

    /// Um token de sessão não serve para redefinir senha (falta `purpose`).
    pub fn decode_reset(&self, token: &str) -> Result<Uuid, AppError> {
        let token_data = decode::<ResetClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        if token_data.claims.purpose != RESET_PURPOSE {
            return Err(AppError::InvalidToken);
        }
        Ok(token_data.claims.sub)
    }
}

/// Confere a asserção assinada pelo provedor de identidade e devolve o e-mail verificado.
pub fn decode_assertion(secret: &str, assertion: &str) -> Result<String, AppError> {
    let token_data = decode::<FederatedClaims>(
        assertion,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::InvalidAssertion)?;

    Ok(normalize_email(&token_data.claims.email))
}

/// bcrypt é caro; roda fora do executor assíncrono.
pub async fn hash_secret(secret: &str) -> Result<String, AppError> {
    let secret = secret.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&secret, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

    Ok(hashed)
}

#[derive(Clone)]
pub struct AuthService {
    manager_repo: ManagerRepository,
    worker_repo: WorkerRepository,
    keys: SessionKeys,
    federated_secret: Option<String>,
}

impl AuthService {
    pub fn new(
        manager_repo: ManagerRepository,
        worker_repo: WorkerRepository,
        keys: SessionKeys,
        federated_secret: Option<String>,
    ) -> Self {
        Self { manager_repo, worker_repo, keys, federated_secret }
    }

    pub async fn register_manager(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<String, AppError> {
        let email = normalize_email(email);
        let password_hash = hash_secret(password).await?;

        let manager = self
            .manager_repo
            .create_manager(&email, &password_hash, display_name)
            .await?;

        tracing::info!("👤 Gerente registrado: {}", manager.id);

        self.keys.issue(&Principal {
            id: manager.id,
            role: Role::Manager,
            manager_id: manager.id,
        })
    }

    /// Gerente primeiro; depois os funcionários com o mesmo e-mail.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        manager_id: Option<Uuid>,
    ) -> Result<SignInResponse, AppError> {
        let email = normalize_email(email);

        let manager = self.manager_repo.find_by_email(&email).await?;
        let candidates: Vec<Worker> = match manager_id {
            Some(manager_id) => self
                .worker_repo
                .find_by_manager_and_email(manager_id, &email)
                .await?
                .into_iter()
                .collect(),
            None => self.worker_repo.find_all_by_email(&email).await?,
        };

        if candidates.len() > 1 {
            tracing::warn!(
                "⚠️ E-mail de funcionário presente em {} equipes; vale o primeiro passcode que conferir",
                candidates.len()
            );
        }

        let secret = password.to_owned();
        let landing = tokio::task::spawn_blocking(move || {
            route_credentials(manager.as_ref(), &candidates, &secret, |secret, hashed| {
                Ok(verify(secret, hashed)?)
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        tracing::info!("🔑 Login aceito como {:?}", landing.role());
        self.respond(landing)
    }

    pub async fn federated_sign_in(&self, assertion: &str) -> Result<SignInResponse, AppError> {
        let secret = self
            .federated_secret
            .as_deref()
            .ok_or(AppError::FederatedSignInDisabled)?;
        let email = decode_assertion(secret, assertion)?;

        let manager = self.manager_repo.find_by_email(&email).await?;
        let candidates = self.worker_repo.find_all_by_email(&email).await?;

        let landing = route_verified_email(manager.as_ref(), &candidates)?;

        tracing::info!("🔑 Login federado aceito como {:?}", landing.role());
        self.respond(landing)
    }

    /// Não revela se o e-mail existe. O envio do e-mail é externo; o token vai para o log.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let email = normalize_email(email);

        match self.manager_repo.find_by_email(&email).await? {
            Some(manager) => {
                let token = self.keys.issue_reset(manager.id)?;
                tracing::info!("✉️ Redefinição de senha solicitada para o gerente {}", manager.id);
                tracing::debug!("Token de redefinição: {}", token);
            }
            None => tracing::debug!("Redefinição de senha para e-mail desconhecido"),
        }

        Ok(())
    }

    pub async fn confirm_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let manager_id = self.keys.decode_reset(token)?;
        let password_hash = hash_secret(new_password).await?;

        if self.manager_repo.update_password(manager_id, &password_hash).await? == 0 {
            return Err(AppError::ManagerNotFound);
        }

        tracing::info!("🔒 Senha redefinida para o gerente {}", manager_id);
        Ok(())
    }

    /// Token válido e dono ainda existente.
    pub async fn validate_token(&self, token: &str) -> Result<Principal, AppError> {
        let principal = self.keys.decode(token)?;

        let exists = match principal.role {
            Role::Manager => self.manager_repo.find_by_id(principal.id).await?.is_some(),
            Role::Worker => self
                .worker_repo
                .find_by_id(principal.manager_id, principal.id)
                .await?
                .is_some(),
        };

        if !exists {
            return Err(AppError::InvalidToken);
        }
        Ok(principal)
    }

    pub async fn me(&self, principal: &Principal) -> Result<MeResponse, AppError> {
        match principal.role {
            Role::Manager => {
                let manager = self
                    .manager_repo
                    .find_by_id(principal.id)
                    .await?
                    .ok_or(AppError::ManagerNotFound)?;
                Ok(MeResponse { role: Role::Manager, manager: Some(manager), worker: None })
            }
            Role::Worker => {
                let worker = self
                    .worker_repo
                    .find_by_id(principal.manager_id, principal.id)
                    .await?
                    .ok_or(AppError::WorkerNotFound)?;
                Ok(MeResponse { role: Role::Worker, manager: None, worker: Some(worker) })
            }
        }
    }

    fn respond(&self, landing: Landing) -> Result<SignInResponse, AppError> {
        Ok(SignInResponse {
            token: self.keys.issue(&landing.principal())?,
            role: landing.role(),
            redirect: landing.redirect(),
            manager_id: landing.manager_id(),
            worker_id: landing.worker_id(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> SessionKeys {
        SessionKeys::new("segredo-de-teste".to_string(), 1, 30)
    }

    fn worker_principal() -> Principal {
        Principal { id: Uuid::new_v4(), role: Role::Worker, manager_id: Uuid::new_v4() }
    }

    #[test]
    fn session_token_round_trip_keeps_identity() {
        let principal = worker_principal();
        let token = keys().issue(&principal).unwrap();

        assert_eq!(keys().decode(&token).unwrap(), principal);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = SessionKeys::new("outro".to_string(), 1, 30);
        let token = other.issue(&worker_principal()).unwrap();

        assert!(matches!(keys().decode(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let expired = SessionKeys::new("segredo-de-teste".to_string(), -2, 30);
        let token = expired.issue(&worker_principal()).unwrap();

        assert!(matches!(keys().decode(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(keys().decode("nao.e.jwt"), Err(AppError::InvalidToken)));
    }

    #[test]
    fn reset_and_session_tokens_are_not_interchangeable() {
        let manager_id = Uuid::new_v4();
        let reset = keys().issue_reset(manager_id).unwrap();
        let session = keys()
            .issue(&Principal { id: manager_id, role: Role::Manager, manager_id })
            .unwrap();

        assert_eq!(keys().decode_reset(&reset).unwrap(), manager_id);
        assert!(keys().decode_reset(&session).is_err());
        assert!(keys().decode(&reset).is_err());
    }

    #[test]
    fn reset_token_with_other_purpose_is_rejected() {
        let now = Utc::now();
        let claims = ResetClaims {
            sub: Uuid::new_v4(),
            purpose: "invite".to_string(),
            exp: (now + Duration::minutes(5)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("segredo-de-teste".as_ref()),
        )
        .unwrap();

        assert!(matches!(keys().decode_reset(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn assertion_yields_normalized_email() {
        let claims = FederatedClaims {
            sub: "provider|42".to_string(),
            email: "  Ana@Exemplo.COM ".to_string(),
            exp: (Utc::now() + Duration::minutes(5)).timestamp() as usize,
        };
        let assertion =
            encode(&Header::default(), &claims, &EncodingKey::from_secret("idp".as_ref())).unwrap();

        assert_eq!(decode_assertion("idp", &assertion).unwrap(), "ana@exemplo.com");
        assert!(matches!(
            decode_assertion("outro", &assertion),
            Err(AppError::InvalidAssertion)
        ));
    }

    #[tokio::test]
    async fn hashed_secret_verifies() {
        let hashed = hash_secret("1234").await.unwrap();

        assert_ne!(hashed, "1234");
        assert!(verify("1234", &hashed).unwrap());
        assert!(!verify("4321", &hashed).unwrap());
    }
}
