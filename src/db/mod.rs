//! Database Module
//!
//! Embedded SurrealDB storage. The handle is created once at startup and
//! passed down through [`crate::core::ServerState`]; there is no global
//! connection singleton.

pub mod models;
pub mod normalize;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "catering";
const DATABASE: &str = "main";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the on-disk database under `data_dir` (RocksDB engine)
    pub async fn open(data_dir: &str) -> Result<Self, AppError> {
        let path = std::path::Path::new(data_dir).join("catering.db");
        let db = Surreal::new::<RocksDb>(path.to_string_lossy().as_ref())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        Self::prepare(&db).await?;
        tracing::info!(path = %path.display(), "Database opened (SurrealDB/RocksDB)");
        Ok(Self { db })
    }

    /// Open an in-memory database (tests)
    pub async fn open_in_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::prepare(&db).await?;
        Ok(Self { db })
    }

    async fn prepare(db: &Surreal<Db>) -> Result<(), AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        // Schemaless tables; only uniqueness is declared.
        // (booking, staff) — one assignment request per pair
        // token — capability URL credential must be unique
        db.query(
            "DEFINE INDEX IF NOT EXISTS uniq_request_pair ON staff_request FIELDS booking, staff UNIQUE;
             DEFINE INDEX IF NOT EXISTS uniq_request_token ON staff_request FIELDS token UNIQUE;",
        )
        .await
        .map_err(|e| AppError::database(format!("Failed to define indexes: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Failed to define indexes: {e}")))?;

        Ok(())
    }
}
