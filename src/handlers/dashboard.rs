// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{i18n::Locale, rbac::ManagerSession},
    models::dashboard::DashboardOverview,
};

#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Equipe, cargos, mensagens e pedidos de folga", body = DashboardOverview),
        (status = 401, description = "Não autorizado"),
        (status = 403, description = "Somente gerentes")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_overview(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ManagerSession,
) -> Result<Json<DashboardOverview>, ApiError> {
    let overview = app_state
        .dashboard_service
        .overview(session.principal.manager_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(overview))
}
