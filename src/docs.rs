// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::federated_login,
        handlers::auth::request_password_reset,
        handlers::auth::confirm_password_reset,

        // --- Users ---
        handlers::auth::get_me,

        // --- Dashboard ---
        handlers::dashboard::get_overview,

        // --- Workers ---
        handlers::workers::create_worker,
        handlers::workers::list_workers,
        handlers::workers::list_positions,
        handlers::workers::get_worker,
        handlers::workers::update_worker,
        handlers::workers::update_passcode,
        handlers::workers::delete_workers,
        handlers::workers::export_workers,

        // --- Schedule ---
        handlers::schedule::calendar_week,
        handlers::schedule::create_shift,
        handlers::schedule::list_shifts,
        handlers::schedule::delete_shift,
        handlers::schedule::lookup_shift,
        handlers::schedule::week_schedule,
        handlers::schedule::my_week,

        // --- Leave ---
        handlers::leave::request_leave,
        handlers::leave::list_leave_requests,
        handlers::leave::my_leave_requests,

        // --- Support ---
        handlers::support::send_message,
        handlers::support::list_messages,
        handlers::support::delete_message,

        // --- Hours ---
        handlers::hours::record_hours,
        handlers::hours::hours_by_date,
        handlers::hours::my_hours,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::Manager,
            models::auth::RegisterManagerPayload,
            models::auth::LoginPayload,
            models::auth::FederatedLoginPayload,
            models::auth::PasswordResetRequestPayload,
            models::auth::PasswordResetConfirmPayload,
            models::auth::AuthResponse,
            models::auth::SignInResponse,
            models::auth::MeResponse,

            // --- Workers ---
            models::worker::Worker,
            models::worker::CreateWorkerPayload,
            models::worker::UpdateWorkerPayload,
            models::worker::UpdatePasscodePayload,
            models::worker::WorkerSelectionPayload,
            models::worker::DeleteWorkersResponse,

            // --- Schedule ---
            models::schedule::ShiftView,
            models::schedule::CreateShiftPayload,
            models::schedule::ShiftLookupResponse,
            models::schedule::DayHeader,
            models::schedule::WeekDays,
            models::schedule::ScheduleRow,
            models::schedule::WeekSchedule,

            // --- Leave ---
            models::leave::LeaveRequest,
            models::leave::CreateLeaveRequestPayload,

            // --- Support ---
            models::support::SupportMessage,
            models::support::SendMessagePayload,
            models::support::DeleteMessageResponse,

            // --- Hours ---
            models::hours::WorkLog,
            models::hours::RecordHoursPayload,
            models::hours::HoursEntry,
            models::hours::HoursDay,

            // --- Dashboard ---
            models::dashboard::DashboardOverview,
        )
    ),
    tags(
        (name = "Auth", description = "Registro, login e redefinição de senha"),
        (name = "Users", description = "Perfil de quem está logado"),
        (name = "Dashboard", description = "Tela inicial do gerente"),
        (name = "Workers", description = "Quadro de funcionários"),
        (name = "Schedule", description = "Turnos e calendário semanal"),
        (name = "Leave", description = "Pedidos de folga"),
        (name = "Support", description = "Mensagens dos funcionários ao gerente"),
        (name = "Hours", description = "Horas trabalhadas")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route_group() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/auth/login",
            "/api/workers/{id}",
            "/api/shifts/lookup",
            "/api/support-messages/{id}",
            "/api/workers/{id}/hours/{date}",
            "/api/me/schedule",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "faltando {}", expected);
        }
        assert!(doc.components.unwrap().security_schemes.contains_key("api_jwt"));
    }
}
