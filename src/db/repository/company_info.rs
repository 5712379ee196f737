//! Company Info Repository (Singleton)

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{CompanyInfo, CompanyInfoUpdate};
use crate::utils::time::now_millis;

const TABLE: &str = "company_info";
const SINGLETON_ID: &str = "main";

#[derive(Clone)]
pub struct CompanyInfoRepository {
    base: BaseRepository,
}

impl CompanyInfoRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Get or create the singleton company info
    pub async fn get_or_create(&self) -> RepoResult<CompanyInfo> {
        if let Some(info) = self.get().await? {
            return Ok(info);
        }

        let created: Option<CompanyInfo> = self
            .base
            .db()
            .create((TABLE, SINGLETON_ID))
            .content(CompanyInfo::default())
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create company info".to_string()))
    }

    pub async fn get(&self) -> RepoResult<Option<CompanyInfo>> {
        let info: Option<CompanyInfo> = self.base.db().select((TABLE, SINGLETON_ID)).await?;
        Ok(info)
    }

    /// Upsert: merge the partial onto the singleton
    pub async fn update(&self, data: CompanyInfoUpdate) -> RepoResult<CompanyInfo> {
        self.get_or_create().await?;

        let singleton_id = RecordId::from_table_key(TABLE, SINGLETON_ID);
        let _ = self
            .base
            .db()
            .query("UPDATE $id SET updatedAt = $now")
            .bind(("id", singleton_id.clone()))
            .bind(("now", now_millis()))
            .await?;

        let updated: Option<CompanyInfo> =
            self.base.db().update(singleton_id).merge(data).await?;
        updated.ok_or_else(|| RepoError::Database("Failed to update company info".to_string()))
    }
}
