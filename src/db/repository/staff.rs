//! Staff Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Staff, StaffUpdate};

const TABLE: &str = "staff";

#[derive(Clone)]
pub struct StaffRepository {
    base: BaseRepository,
}

impl StaffRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Staff>> {
        let staff: Vec<Staff> = self
            .base
            .db()
            .query("SELECT * FROM staff ORDER BY name")
            .await?
            .take(0)?;
        Ok(staff)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Staff>> {
        let member: Option<Staff> = self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(member)
    }

    pub async fn create(&self, member: Staff) -> RepoResult<Staff> {
        let created: Option<Staff> = self.base.db().create(TABLE).content(member).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create staff member".to_string()))
    }

    pub async fn merge(&self, id: &str, data: StaffUpdate) -> RepoResult<Staff> {
        let updated: Option<Staff> = self
            .base
            .db()
            .update((TABLE, record_key(TABLE, id)))
            .merge(data)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Staff {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<Staff> = self.base.db().delete((TABLE, record_key(TABLE, id))).await?;
        Ok(deleted.is_some())
    }
}
