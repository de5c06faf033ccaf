// src/services/identity.rs
//
// Decide para onde vai quem acabou de se autenticar. Aqui não há banco nem bcrypt:
// o serviço de auth busca os dados e passa o verificador de senha.

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::{Manager, Principal, Role},
        worker::Worker,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    ManagerDashboard { manager_id: Uuid },
    WorkerLanding { manager_id: Uuid, worker_id: Uuid },
}

impl Landing {
    pub fn role(&self) -> Role {
        match self {
            Landing::ManagerDashboard { .. } => Role::Manager,
            Landing::WorkerLanding { .. } => Role::Worker,
        }
    }

    pub fn manager_id(&self) -> Uuid {
        match *self {
            Landing::ManagerDashboard { manager_id } | Landing::WorkerLanding { manager_id, .. } => {
                manager_id
            }
        }
    }

    pub fn worker_id(&self) -> Option<Uuid> {
        match *self {
            Landing::ManagerDashboard { .. } => None,
            Landing::WorkerLanding { worker_id, .. } => Some(worker_id),
        }
    }

    /// Caminho da página de destino no front-end.
    pub fn redirect(&self) -> String {
        match self {
            Landing::ManagerDashboard { .. } => "/dashboard".to_string(),
            Landing::WorkerLanding { manager_id, worker_id } => {
                format!("/workerLandingPage?managerId={}&workerId={}", manager_id, worker_id)
            }
        }
    }

    /// Identidade que vai dentro do token de sessão.
    pub fn principal(&self) -> Principal {
        match *self {
            Landing::ManagerDashboard { manager_id } => Principal {
                id: manager_id,
                role: Role::Manager,
                manager_id,
            },
            Landing::WorkerLanding { manager_id, worker_id } => Principal {
                id: worker_id,
                role: Role::Worker,
                manager_id,
            },
        }
    }
}

/// E-mails são comparados sem espaços e em minúsculas.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Login por e-mail e segredo.
///
/// 1. O gerente com esse e-mail e senha correta vai para o dashboard, mesmo que exista
///    um funcionário com o mesmo e-mail em qualquer equipe.
/// 2. Senão, os candidatos (já na ordem determinística do repositório) são testados um a um;
///    o primeiro cujo passcode confere vence.
/// 3. Nenhum confere: credenciais inválidas.
pub fn route_credentials<V>(
    manager: Option<&Manager>,
    candidates: &[Worker],
    secret: &str,
    verify: V,
) -> Result<Landing, AppError>
where
    V: Fn(&str, &str) -> Result<bool, AppError>,
{
    if let Some(manager) = manager {
        if verify(secret, &manager.password_hash)? {
            return Ok(Landing::ManagerDashboard { manager_id: manager.id });
        }
    }

    for worker in candidates {
        if verify(secret, &worker.passcode_hash)? {
            return Ok(Landing::WorkerLanding {
                manager_id: worker.manager_id,
                worker_id: worker.id,
            });
        }
    }

    Err(AppError::InvalidCredentials)
}

/// Login federado: o provedor já verificou o e-mail, então não há segredo a conferir.
pub fn route_verified_email(
    manager: Option<&Manager>,
    candidates: &[Worker],
) -> Result<Landing, AppError> {
    if let Some(manager) = manager {
        return Ok(Landing::ManagerDashboard { manager_id: manager.id });
    }

    candidates
        .first()
        .map(|worker| Landing::WorkerLanding {
            manager_id: worker.manager_id,
            worker_id: worker.id,
        })
        .ok_or(AppError::NoAssociatedManager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    // Verificador de teste: o "hash" é o próprio segredo
    fn plain(secret: &str, hash: &str) -> Result<bool, AppError> {
        Ok(secret == hash)
    }

    fn manager(email: &str, password: &str) -> Manager {
        Manager {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password.to_string(),
            display_name: None,
            photo_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn worker(manager_id: Uuid, email: &str, passcode: &str) -> Worker {
        Worker {
            id: Uuid::new_v4(),
            manager_id,
            first_name: "João".into(),
            last_name: "Silva".into(),
            position: Some("Barista".into()),
            phone_number: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            email: email.to_string(),
            passcode_hash: passcode.to_string(),
            date_of_birth: None,
            start_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn matching_worker_lands_on_worker_page_with_its_manager() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let candidates = vec![
            worker(other, "joao@x.com", "9999"),
            worker(owner, "joao@x.com", "1234"),
        ];

        let landing = route_credentials(None, &candidates, "1234", plain).unwrap();

        assert_eq!(
            landing,
            Landing::WorkerLanding { manager_id: owner, worker_id: candidates[1].id }
        );
        assert_eq!(landing.role(), Role::Worker);
        assert!(landing.redirect().starts_with("/workerLandingPage?"));
        assert!(landing.redirect().contains(&format!("managerId={}", owner)));
        assert!(landing.redirect().contains(&format!("workerId={}", candidates[1].id)));
    }

    #[test]
    fn manager_credentials_always_win_over_workers() {
        let boss = manager("ana@x.com", "segredo");
        // Mesmo e-mail e mesmo segredo cadastrados como funcionário em outra equipe
        let candidates = vec![worker(Uuid::new_v4(), "ana@x.com", "segredo")];

        let landing = route_credentials(Some(&boss), &candidates, "segredo", plain).unwrap();

        assert_eq!(landing, Landing::ManagerDashboard { manager_id: boss.id });
        assert_eq!(landing.redirect(), "/dashboard");
        assert_eq!(landing.principal().manager_id, boss.id);
    }

    #[test]
    fn wrong_manager_password_falls_through_to_worker_scan() {
        let boss = manager("ana@x.com", "segredo");
        let candidates = vec![worker(Uuid::new_v4(), "ana@x.com", "4321")];

        let landing = route_credentials(Some(&boss), &candidates, "4321", plain).unwrap();

        assert_eq!(landing.role(), Role::Worker);
    }

    #[test]
    fn first_verified_candidate_wins() {
        let first = worker(Uuid::new_v4(), "dup@x.com", "1111");
        let second = worker(Uuid::new_v4(), "dup@x.com", "1111");

        let landing =
            route_credentials(None, &[first.clone(), second], "1111", plain).unwrap();

        assert_eq!(landing.worker_id(), Some(first.id));
        assert_eq!(landing.manager_id(), first.manager_id);
    }

    #[test]
    fn no_match_is_invalid_credentials() {
        let candidates = vec![worker(Uuid::new_v4(), "joao@x.com", "1234")];

        let result = route_credentials(None, &candidates, "0000", plain);

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[test]
    fn verifier_errors_are_propagated() {
        let candidates = vec![worker(Uuid::new_v4(), "joao@x.com", "1234")];

        let result = route_credentials(None, &candidates, "1234", |_, _| {
            Err(AppError::InternalServerError(anyhow::anyhow!("hash corrompido")))
        });

        assert!(matches!(result, Err(AppError::InternalServerError(_))));
    }

    #[test]
    fn works_with_real_bcrypt_hashes() {
        let mut stored = worker(Uuid::new_v4(), "joao@x.com", "");
        stored.passcode_hash = bcrypt::hash("1234", 4).unwrap();
        let verify = |secret: &str, hash: &str| bcrypt::verify(secret, hash).map_err(AppError::from);

        let candidates = [stored.clone()];
        assert!(route_credentials(None, &candidates, "1234", verify).is_ok());
        assert!(route_credentials(None, &candidates, "4321", verify).is_err());
    }

    #[test]
    fn emails_are_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Joao@X.com\n"), "joao@x.com");
    }

    #[test]
    fn federated_email_without_account_has_no_manager() {
        let result = route_verified_email(None, &[]);
        assert!(matches!(result, Err(AppError::NoAssociatedManager)));

        let boss = manager("ana@x.com", "x");
        let landing = route_verified_email(Some(&boss), &[]).unwrap();
        assert_eq!(landing.role(), Role::Manager);
    }
}
