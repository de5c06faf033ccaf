//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Config};
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG sobrescreve o nível padrão
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env()?;
    let app_state = AppState::new(config).await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let listener = TcpListener::bind(app_state.config.server_addr.as_str()).await?;
    let app = router(app_state);

    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(app_state: AppState) -> Router {
    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/federated", post(handlers::auth::federated_login))
        .route("/password-reset", post(handlers::auth::request_password_reset))
        .route("/password-reset/confirm", post(handlers::auth::confirm_password_reset));

    // Tudo abaixo exige sessão; o papel é conferido em cada handler (RequireRole)
    let protected_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/me/schedule", get(handlers::schedule::my_week))
        .route("/me/hours", get(handlers::hours::my_hours))
        .route("/me/leave-requests", get(handlers::leave::my_leave_requests))
        .route("/dashboard", get(handlers::dashboard::get_overview))
        .route(
            "/workers",
            post(handlers::workers::create_worker).get(handlers::workers::list_workers),
        )
        .route("/workers/positions", get(handlers::workers::list_positions))
        .route("/workers/delete", post(handlers::workers::delete_workers))
        .route("/workers/export", post(handlers::workers::export_workers))
        .route(
            "/workers/{id}",
            get(handlers::workers::get_worker).put(handlers::workers::update_worker),
        )
        .route("/workers/{id}/passcode", put(handlers::workers::update_passcode))
        .route("/workers/{id}/hours/{date}", put(handlers::hours::record_hours))
        .route(
            "/shifts",
            post(handlers::schedule::create_shift).get(handlers::schedule::list_shifts),
        )
        .route("/shifts/lookup", get(handlers::schedule::lookup_shift))
        .route("/shifts/{id}", delete(handlers::schedule::delete_shift))
        .route("/schedule/week", get(handlers::schedule::week_schedule))
        .route(
            "/leave-requests",
            post(handlers::leave::request_leave).get(handlers::leave::list_leave_requests),
        )
        .route(
            "/support-messages",
            post(handlers::support::send_message).get(handlers::support::list_messages),
        )
        .route("/support-messages/{id}", delete(handlers::support::delete_message))
        .route("/hours", get(handlers::hours::hours_by_date))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/calendar/week", get(handlers::schedule::calendar_week))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected_routes)
        .with_state(app_state)
}
