//! Repository Module
//!
//! Provides CRUD operations over the embedded SurrealDB tables.
//!
//! # ID Convention
//!
//! 全栈统一使用 "table:id" 字符串格式。repository 接口接受两种形式
//! （"booking:abc" 或纯 "abc"），内部统一剥离表前缀。

pub mod booking;
pub mod booking_item;
pub mod company_info;
pub mod food_item;
pub mod notification;
pub mod review;
pub mod staff;
pub mod staff_request;

pub use booking::BookingRepository;
pub use booking_item::BookingItemRepository;
pub use company_info::CompanyInfoRepository;
pub use food_item::FoodItemRepository;
pub use notification::NotificationRepository;
pub use review::ReviewRepository;
pub use staff::StaffRepository;
pub use staff_request::StaffRequestRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Strip the "table:" prefix from an id if present
pub(crate) fn record_key<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}
