// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::{Principal, Role},
};

/// 1. O Trait que define qual papel a rota exige
pub trait RoleDef: Send + Sync + 'static {
    fn role() -> Role;
}

/// 2. O Extractor (Guardião). Entrega a identidade já conferida.
pub struct RequireRole<T> {
    pub principal: Principal,
    _role: PhantomData<T>,
}

pub fn check_role(principal: &Principal, required: Role) -> Result<(), AppError> {
    if principal.role != required {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

// 3. Implementação do FromRequestParts
impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(principal) = AuthenticatedUser::from_request_parts(parts, state).await?;

        if let Err(err) = check_role(&principal, T::role()) {
            let app_state = AppState::from_ref(state);
            let Ok(locale) = Locale::from_request_parts(parts, state).await;
            tracing::warn!(
                "🚫 {:?} {} tentou acessar rota de {:?}",
                principal.role,
                principal.id,
                T::role()
            );
            return Err(err.to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(RequireRole { principal, _role: PhantomData })
    }
}

// ---
// DEFINIÇÃO DOS PAPÉIS (TIPOS)
// ---

pub struct ManagerOnly;
impl RoleDef for ManagerOnly {
    fn role() -> Role { Role::Manager }
}

pub struct WorkerOnly;
impl RoleDef for WorkerOnly {
    fn role() -> Role { Role::Worker }
}

pub type ManagerSession = RequireRole<ManagerOnly>;
pub type WorkerSession = RequireRole<WorkerOnly>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn principal(role: Role) -> Principal {
        let id = Uuid::new_v4();
        Principal { id, role, manager_id: id }
    }

    #[test]
    fn matching_role_passes() {
        assert!(check_role(&principal(Role::Manager), ManagerOnly::role()).is_ok());
        assert!(check_role(&principal(Role::Worker), WorkerOnly::role()).is_ok());
    }

    #[test]
    fn other_role_is_forbidden() {
        assert!(matches!(
            check_role(&principal(Role::Worker), ManagerOnly::role()),
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            check_role(&principal(Role::Manager), WorkerOnly::role()),
            Err(AppError::Forbidden)
        ));
    }
}
