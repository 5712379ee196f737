//! Food Item Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{FoodItem, FoodItemUpdate};

const TABLE: &str = "food_item";

#[derive(Clone)]
pub struct FoodItemRepository {
    base: BaseRepository,
}

impl FoodItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<FoodItem>> {
        let items: Vec<FoodItem> = self
            .base
            .db()
            .query("SELECT * FROM food_item ORDER BY category, name")
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<FoodItem>> {
        let item: Option<FoodItem> = self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(item)
    }

    pub async fn create(&self, item: FoodItem) -> RepoResult<FoodItem> {
        let created: Option<FoodItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create food item".to_string()))
    }

    pub async fn merge(&self, id: &str, data: FoodItemUpdate) -> RepoResult<FoodItem> {
        let updated: Option<FoodItem> = self
            .base
            .db()
            .update((TABLE, record_key(TABLE, id)))
            .merge(data)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Food item {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<FoodItem> =
            self.base.db().delete((TABLE, record_key(TABLE, id))).await?;
        Ok(deleted.is_some())
    }
}
