//! 服务器共享状态
//!
//! 打开数据库、构建各业务服务，随后以 axum State 形式
//! 注入到所有 handler。

use std::sync::Arc;

use anyhow::Result;

use crate::assignment::AssignmentService;
use crate::audit::AuditService;
use crate::auth::JwtService;
use crate::booking::BookingService;
use crate::core::config::Config;
use crate::db::DbService;
use crate::db::repository::{
    CompanyInfoRepository, FoodItemRepository, NotificationRepository, ReviewRepository,
    StaffRepository,
};

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub jwt: Arc<JwtService>,
    pub bookings: BookingService,
    pub assignments: AssignmentService,
    pub audit: AuditService,
    pub food_items: FoodItemRepository,
    pub staff: StaffRepository,
    pub company_info: CompanyInfoRepository,
    pub reviews: ReviewRepository,
    pub notifications: NotificationRepository,
}

impl ServerState {
    /// 初始化状态：打开数据库并接好所有服务
    pub async fn initialize(config: Config) -> Result<Self> {
        let db_service = DbService::open(&config.data_dir).await?;
        Ok(Self::with_db(config, db_service))
    }

    /// 基于已打开的数据库构建状态（测试用内存库也走这里）
    pub fn with_db(config: Config, db_service: DbService) -> Self {
        let db = db_service.db;
        let jwt = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_minutes,
        ));

        Self {
            config: Arc::new(config),
            jwt,
            bookings: BookingService::new(db.clone()),
            assignments: AssignmentService::new(db.clone()),
            audit: AuditService::new(db.clone()),
            food_items: FoodItemRepository::new(db.clone()),
            staff: StaffRepository::new(db.clone()),
            company_info: CompanyInfoRepository::new(db.clone()),
            reviews: ReviewRepository::new(db.clone()),
            notifications: NotificationRepository::new(db),
        }
    }
}
