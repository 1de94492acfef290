use std::sync::Arc;

use tracing::info;

use crate::{
    entities::contact::{ContactInfo, ContactInfoPayload, ContactMessage, ContactMessagePayload},
    errors::AppError,
    repositories::contact::{ContactInfoRepository, ContactMessageRepository},
    utils::valid_id::valid_id,
};

fn info_not_found() -> AppError {
    AppError::NotFound("Contact info not found".to_string())
}

fn message_not_found() -> AppError {
    AppError::NotFound("Message not found".to_string())
}

pub struct ContactHandler {
    pub info_repo: Arc<dyn ContactInfoRepository>,
    pub message_repo: Arc<dyn ContactMessageRepository>,
}

impl ContactHandler {
    pub fn new(
        info_repo: Arc<dyn ContactInfoRepository>,
        message_repo: Arc<dyn ContactMessageRepository>,
    ) -> Self {
        ContactHandler { info_repo, message_repo }
    }

    pub async fn get_contact_info(&self) -> Result<ContactInfo, AppError> {
        self.info_repo
            .get_contact_info()
            .await?
            .ok_or_else(info_not_found)
    }

    pub async fn update_contact_info(&self, payload: ContactInfoPayload) -> Result<ContactInfo, AppError> {
        let update = payload.prepare_for_update()?;
        self.info_repo
            .update_contact_info(&update)
            .await?
            .ok_or_else(info_not_found)
    }

    pub async fn submit_message(&self, payload: ContactMessagePayload) -> Result<ContactMessage, AppError> {
        let insert = payload.prepare_for_insert()?;
        let message = self.message_repo.create_message(&insert).await?;

        info!(message_id = message.id, "Contact message received");
        Ok(message)
    }

    pub async fn list_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        self.message_repo.list_messages().await
    }

    pub async fn get_message(&self, id: &str) -> Result<ContactMessage, AppError> {
        let id = valid_id(id)?;
        self.message_repo
            .get_message_by_id(id)
            .await?
            .ok_or_else(message_not_found)
    }

    pub async fn delete_message(&self, id: &str) -> Result<ContactMessage, AppError> {
        let id = valid_id(id)?;
        self.message_repo
            .delete_message(id)
            .await?
            .ok_or_else(message_not_found)
    }
}
