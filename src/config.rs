// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{
        HoursRepository, LeaveRepository, ManagerRepository, MessageRepository, ShiftRepository,
        WorkerRepository,
    },
    services::{
        auth::{AuthService, SessionKeys},
        dashboard_service::DashboardService,
        hours_service::HoursService,
        leave_service::LeaveService,
        roster_service::RosterService,
        schedule_service::ScheduleService,
        support_service::SupportService,
    },
};

// Configuração lida do ambiente (e do .env, se existir)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub federated_jwt_secret: Option<String>,
    pub server_addr: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub token_ttl_hours: i64,
    pub reset_token_ttl_minutes: i64,
}

fn required<F>(lookup: &F, key: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .with_context(|| format!("{} deve ser definida", key))
}

fn parsed_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} inválida: '{}'", key, raw)),
        None => Ok(default),
    }
}

// Limites das validades de token; acima disso a conta de expiração estoura
const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;
const MAX_RESET_TOKEN_TTL_MINUTES: i64 = 24 * 60;

fn bounded(key: &str, value: i64, max: i64) -> anyhow::Result<i64> {
    anyhow::ensure!(
        (1..=max).contains(&value),
        "{} deve estar entre 1 e {}, recebido {}",
        key,
        max,
        value
    );
    Ok(value)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database_url: required(&lookup, "DATABASE_URL")?,
            jwt_secret: required(&lookup, "JWT_SECRET")?,
            federated_jwt_secret: lookup("FEDERATED_JWT_SECRET").filter(|s| !s.trim().is_empty()),
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            db_max_connections: parsed_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout: Duration::from_secs(parsed_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 3)?),
            token_ttl_hours: bounded(
                "TOKEN_TTL_HOURS",
                parsed_or(&lookup, "TOKEN_TTL_HOURS", 168)?,
                MAX_TOKEN_TTL_HOURS,
            )?,
            reset_token_ttl_minutes: bounded(
                "RESET_TOKEN_TTL_MINUTES",
                parsed_or(&lookup, "RESET_TOKEN_TTL_MINUTES", 30)?,
                MAX_RESET_TOKEN_TTL_MINUTES,
            )?,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<Config>,
    pub i18n_store: Arc<I18nStore>,

    pub auth_service: AuthService,
    pub roster_service: RosterService,
    pub schedule_service: ScheduleService,
    pub leave_service: LeaveService,
    pub support_service: SupportService,
    pub hours_service: HoursService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout)
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let i18n_store = I18nStore::embedded().context("Catálogo de mensagens inválido")?;

        Ok(Self::assemble(db_pool, config, i18n_store))
    }

    // --- Monta o gráfico de dependências ---
    fn assemble(db_pool: PgPool, config: Config, i18n_store: I18nStore) -> Self {
        let manager_repo = ManagerRepository::new(db_pool.clone());
        let worker_repo = WorkerRepository::new(db_pool.clone());
        let shift_repo = ShiftRepository::new(db_pool.clone());
        let leave_repo = LeaveRepository::new(db_pool.clone());
        let message_repo = MessageRepository::new(db_pool.clone());
        let hours_repo = HoursRepository::new(db_pool.clone());

        let keys = SessionKeys::new(
            config.jwt_secret.clone(),
            config.token_ttl_hours,
            config.reset_token_ttl_minutes,
        );

        Self {
            auth_service: AuthService::new(
                manager_repo,
                worker_repo.clone(),
                keys,
                config.federated_jwt_secret.clone(),
            ),
            roster_service: RosterService::new(worker_repo.clone()),
            schedule_service: ScheduleService::new(shift_repo, worker_repo.clone()),
            leave_service: LeaveService::new(leave_repo.clone(), worker_repo.clone()),
            support_service: SupportService::new(message_repo.clone(), worker_repo.clone()),
            hours_service: HoursService::new(hours_repo),
            dashboard_service: DashboardService::new(worker_repo, message_repo, leave_repo),
            db_pool,
            config: Arc::new(config),
            i18n_store: Arc::new(i18n_store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    const BASE: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/shifteaze"),
        ("JWT_SECRET", "segredo"),
    ];

    #[test]
    fn defaults_apply_when_optional_values_are_missing() {
        let config = Config::from_lookup(lookup_from(&BASE)).unwrap();

        assert_eq!(config.server_addr, "0.0.0.0:3000");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_acquire_timeout, Duration::from_secs(3));
        assert_eq!(config.token_ttl_hours, 168);
        assert_eq!(config.reset_token_ttl_minutes, 30);
        assert!(config.federated_jwt_secret.is_none());
    }

    #[test]
    fn missing_required_value_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x")])).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn unparsable_number_is_an_error() {
        let mut pairs = BASE.to_vec();
        pairs.push(("DB_MAX_CONNECTIONS", "muitas"));

        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
    }

    #[test]
    fn token_lifetimes_out_of_bounds_are_errors() {
        for (key, value) in [
            ("TOKEN_TTL_HOURS", "9223372036854775807"),
            ("TOKEN_TTL_HOURS", "0"),
            ("RESET_TOKEN_TTL_MINUTES", "100000000000000"),
            ("RESET_TOKEN_TTL_MINUTES", "-5"),
        ] {
            let mut pairs = BASE.to_vec();
            pairs.push((key, value));

            let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert!(err.to_string().contains(key), "{} = {}", key, value);
        }
    }

    #[test]
    fn largest_token_lifetimes_are_usable() {
        let max_hours = MAX_TOKEN_TTL_HOURS.to_string();
        let max_minutes = MAX_RESET_TOKEN_TTL_MINUTES.to_string();
        let mut pairs = BASE.to_vec();
        pairs.extend([
            ("TOKEN_TTL_HOURS", max_hours.as_str()),
            ("RESET_TOKEN_TTL_MINUTES", max_minutes.as_str()),
        ]);

        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        let keys = crate::services::auth::SessionKeys::new(
            config.jwt_secret,
            config.token_ttl_hours,
            config.reset_token_ttl_minutes,
        );
        assert!(keys.issue_reset(uuid::Uuid::new_v4()).is_ok());
    }

    #[test]
    fn overrides_are_read() {
        let mut pairs = BASE.to_vec();
        pairs.extend([
            ("SERVER_ADDR", "127.0.0.1:8080"),
            ("TOKEN_TTL_HOURS", "12"),
            ("FEDERATED_JWT_SECRET", "idp"),
        ]);

        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:8080");
        assert_eq!(config.token_ttl_hours, 12);
        assert_eq!(config.federated_jwt_secret.as_deref(), Some("idp"));
    }
}
