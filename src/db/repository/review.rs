//! Customer Review Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{CustomerReview, ReviewUpdate};

const TABLE: &str = "review";

#[derive(Clone)]
pub struct ReviewRepository {
    base: BaseRepository,
}

impl ReviewRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<CustomerReview>> {
        let reviews: Vec<CustomerReview> = self
            .base
            .db()
            .query("SELECT * FROM review ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(reviews)
    }

    pub async fn create(&self, review: CustomerReview) -> RepoResult<CustomerReview> {
        let created: Option<CustomerReview> = self.base.db().create(TABLE).content(review).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create review".to_string()))
    }

    pub async fn merge(&self, id: &str, data: ReviewUpdate) -> RepoResult<CustomerReview> {
        let updated: Option<CustomerReview> = self
            .base
            .db()
            .update((TABLE, record_key(TABLE, id)))
            .merge(data)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<CustomerReview> =
            self.base.db().delete((TABLE, record_key(TABLE, id))).await?;
        Ok(deleted.is_some())
    }
}
