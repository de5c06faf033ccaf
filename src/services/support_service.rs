// src/services/support_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{MessageRepository, WorkerRepository},
    models::support::{DeleteMessageResponse, SendMessagePayload, SupportMessage},
};

/// Resultado da exclusão a partir da lista lida antes dela.
/// Nenhuma linha removida significa id desconhecido ou mensagem de outro gerente.
pub fn settle_deletion(
    rows_affected: u64,
    deleted_id: Uuid,
    before: Vec<SupportMessage>,
) -> Result<DeleteMessageResponse, AppError> {
    if rows_affected == 0 {
        return Err(AppError::MessageNotFound);
    }

    let remaining = before.into_iter().filter(|m| m.id != deleted_id).collect();
    Ok(DeleteMessageResponse { deleted_id, remaining })
}

#[derive(Clone)]
pub struct SupportService {
    message_repo: MessageRepository,
    worker_repo: WorkerRepository,
}

impl SupportService {
    pub fn new(message_repo: MessageRepository, worker_repo: WorkerRepository) -> Self {
        Self { message_repo, worker_repo }
    }

    pub async fn send_message(
        &self,
        manager_id: Uuid,
        worker_id: Uuid,
        payload: &SendMessagePayload,
    ) -> Result<SupportMessage, AppError> {
        let worker = self
            .worker_repo
            .find_by_id(manager_id, worker_id)
            .await?
            .ok_or(AppError::WorkerNotFound)?;

        let name = payload
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| worker.full_name());

        let message = self
            .message_repo
            .create_message(
                worker.manager_id,
                worker.id,
                &name,
                &worker.email,
                payload.message.trim(),
                &worker.first_name,
                &worker.last_name,
            )
            .await?;

        tracing::info!("💬 Mensagem {} enviada ao gerente {}", message.id, message.manager_id);
        Ok(message)
    }

    pub async fn list_messages(&self, manager_id: Uuid) -> Result<Vec<SupportMessage>, AppError> {
        self.message_repo.list_by_manager(manager_id).await
    }

    /// Remove só a mensagem pedida e devolve o que sobrou.
    pub async fn delete_message(
        &self,
        manager_id: Uuid,
        id: Uuid,
    ) -> Result<DeleteMessageResponse, AppError> {
        let before = self.message_repo.list_by_manager(manager_id).await?;
        let rows = self.message_repo.delete_message(manager_id, id).await?;

        let response = settle_deletion(rows, id, before)?;
        tracing::info!("🗑️ Mensagem {} excluída", id);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn message(manager_id: Uuid, text: &str, minutes_ago: i64) -> SupportMessage {
        SupportMessage {
            id: Uuid::new_v4(),
            manager_id,
            worker_id: Some(Uuid::new_v4()),
            name: "João Silva".into(),
            email: "joao@x.com".into(),
            message: text.into(),
            worker_first_name: "João".into(),
            worker_last_name: "Silva".into(),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn deleting_removes_exactly_that_message() {
        let manager_id = Uuid::new_v4();
        let inbox = vec![
            message(manager_id, "terceira", 1),
            message(manager_id, "segunda", 5),
            message(manager_id, "primeira", 10),
        ];
        let target = inbox[1].id;

        let response = settle_deletion(1, target, inbox.clone()).unwrap();

        assert_eq!(response.deleted_id, target);
        assert_eq!(response.remaining.len(), 2);
        assert!(response.remaining.iter().all(|m| m.id != target));
        // As outras continuam, na mesma ordem
        assert_eq!(response.remaining[0].id, inbox[0].id);
        assert_eq!(response.remaining[1].id, inbox[2].id);
    }

    #[test]
    fn nothing_deleted_is_not_found() {
        let manager_id = Uuid::new_v4();
        let inbox = vec![message(manager_id, "oi", 1)];

        let result = settle_deletion(0, Uuid::new_v4(), inbox);

        assert!(matches!(result, Err(AppError::MessageNotFound)));
    }

    #[test]
    fn empty_message_is_rejected() {
        use validator::Validate;

        let payload = SendMessagePayload { name: None, message: String::new() };
        assert!(payload.validate().is_err());

        let payload = SendMessagePayload { name: None, message: "  \n ".into() };
        assert!(payload.validate().is_err());

        let payload = SendMessagePayload { name: None, message: "Oi".into() };
        assert!(payload.validate().is_ok());
    }
}
