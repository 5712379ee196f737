//! Admin Notification Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{AdminNotification, NotificationUpdate};

const TABLE: &str = "notification";

#[derive(Clone)]
pub struct NotificationRepository {
    base: BaseRepository,
}

impl NotificationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<AdminNotification>> {
        let notifications: Vec<AdminNotification> = self
            .base
            .db()
            .query("SELECT * FROM notification ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(notifications)
    }

    pub async fn create(&self, notification: AdminNotification) -> RepoResult<AdminNotification> {
        let created: Option<AdminNotification> =
            self.base.db().create(TABLE).content(notification).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create notification".to_string()))
    }

    pub async fn merge(&self, id: &str, data: NotificationUpdate) -> RepoResult<AdminNotification> {
        let updated: Option<AdminNotification> = self
            .base
            .db()
            .update((TABLE, record_key(TABLE, id)))
            .merge(data)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Notification {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<AdminNotification> =
            self.base.db().delete((TABLE, record_key(TABLE, id))).await?;
        Ok(deleted.is_some())
    }
}
