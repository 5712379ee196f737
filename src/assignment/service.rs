//! Staff Assignment Service
//!
//! request / accept / reject 工作流。每对 (booking, staff) 只有一行；
//! token 是公开确认页的唯一凭证（capability URL）。
//!
//! 终态规则：重复同一决定是幂等 no-op；从终态切换到另一决定
//! 返回 Conflict — 不允许无声翻转。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use crate::db::models::{
    AssignedStaffView, RequestStatus, ResolvedRequest, Staff, StaffBookingRequest,
};
use crate::db::repository::{BookingRepository, StaffRepository, StaffRequestRepository};
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct AssignmentService {
    requests: StaffRequestRepository,
    staff: StaffRepository,
    bookings: BookingRepository,
}

impl AssignmentService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            requests: StaffRequestRepository::new(db.clone()),
            staff: StaffRepository::new(db.clone()),
            bookings: BookingRepository::new(db),
        }
    }

    /// 发起指派请求（自助确认流程）
    ///
    /// 已存在的 (booking, staff) 行原样返回 — 不插入重复行。
    pub async fn request_assignment(
        &self,
        booking_id: &str,
        staff_id: &str,
    ) -> AppResult<StaffBookingRequest> {
        self.create_or_reuse(booking_id, staff_id, RequestStatus::Pending)
            .await
    }

    /// 管理员直接指派 — 跳过确认，直接 accepted
    pub async fn assign_direct(
        &self,
        booking_id: &str,
        staff_id: &str,
    ) -> AppResult<StaffBookingRequest> {
        self.create_or_reuse(booking_id, staff_id, RequestStatus::Accepted)
            .await
    }

    async fn create_or_reuse(
        &self,
        booking_id: &str,
        staff_id: &str,
        initial: RequestStatus,
    ) -> AppResult<StaffBookingRequest> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {} not found", booking_id)))?;
        let staff = self
            .staff
            .find_by_id(staff_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Staff {} not found", staff_id)))?;

        if let Some(existing) = self.requests.find_pair(booking_id, staff_id).await? {
            return Ok(existing);
        }

        let now = now_millis();
        let request = StaffBookingRequest {
            id: None,
            booking: booking
                .id
                .ok_or_else(|| AppError::internal("booking record has no id"))?,
            staff: staff
                .id
                .ok_or_else(|| AppError::internal("staff record has no id"))?,
            status: initial,
            token: Uuid::new_v4().simple().to_string(),
            created_at: now,
            responded_at: initial.is_terminal().then_some(now),
        };

        let created = self.requests.create(request).await?;
        tracing::info!(
            booking = booking_id,
            staff = staff_id,
            status = ?initial,
            "Staff assignment request created"
        );
        Ok(created)
    }

    /// 公开确认页的只读联合视图
    pub async fn resolve_by_token(&self, token: &str) -> AppResult<ResolvedRequest> {
        let request = self
            .requests
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Unknown confirmation token"))?;

        let booking = self
            .bookings
            .find_by_id(&request.booking.to_string())
            .await?
            .ok_or_else(|| AppError::not_found("Booking for this request no longer exists"))?;
        let staff = self
            .staff
            .find_by_id(&request.staff.to_string())
            .await?
            .ok_or_else(|| AppError::not_found("Staff for this request no longer exists"))?;

        Ok(ResolvedRequest {
            request,
            booking,
            staff,
        })
    }

    /// 确认或拒绝一个指派请求
    pub async fn respond(
        &self,
        request_id: &str,
        decision: RequestStatus,
    ) -> AppResult<StaffBookingRequest> {
        if decision == RequestStatus::Pending {
            return Err(AppError::validation(
                "decision must be 'accepted' or 'rejected'",
            ));
        }

        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Staff request {} not found", request_id)))?;

        if request.status.is_terminal() {
            if request.status == decision {
                // 幂等重放
                return Ok(request);
            }
            return Err(AppError::conflict(format!(
                "request already {}",
                status_label(request.status)
            )));
        }

        let updated = self
            .requests
            .set_status(request_id, decision, now_millis())
            .await?;
        tracing::info!(request = request_id, decision = ?decision, "Staff request resolved");
        Ok(updated)
    }

    /// token 形式的 respond（公开确认页提交）
    pub async fn respond_by_token(
        &self,
        token: &str,
        decision: RequestStatus,
    ) -> AppResult<StaffBookingRequest> {
        let request = self
            .requests
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Unknown confirmation token"))?;
        let id = request
            .id
            .as_ref()
            .ok_or_else(|| AppError::internal("request record has no id"))?
            .to_string();
        self.respond(&id, decision).await
    }

    /// 管理端「谁被请求过」视图（含各自状态）
    pub async fn list_requests(&self, booking_id: &str) -> AppResult<Vec<AssignedStaffView>> {
        let requests = self.requests.find_by_booking(booking_id).await?;
        let staff_ids = requests.iter().map(|r| r.staff.clone()).collect();
        let staff = self.requests.find_staff_by_ids(staff_ids).await?;

        let views = requests
            .into_iter()
            .filter_map(|request| {
                let member = staff
                    .iter()
                    .find(|s| s.id.as_ref() == Some(&request.staff))?
                    .clone();
                Some(AssignedStaffView {
                    request_id: request.id.map(|id| id.to_string()).unwrap_or_default(),
                    status: request.status,
                    staff: member,
                })
            })
            .collect();
        Ok(views)
    }

    /// 实际到岗名单：仅 accepted（区别于「被问过的人」）
    pub async fn list_accepted(&self, booking_id: &str) -> AppResult<Vec<Staff>> {
        Ok(self.requests.find_accepted_staff(booking_id).await?)
    }

    /// 解除指派 — 整行删除；之后重新指派从全新的周期开始
    pub async fn unassign(&self, booking_id: &str, staff_id: &str) -> AppResult<bool> {
        Ok(self.requests.delete_pair(booking_id, staff_id).await?)
    }
}

fn status_label(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "pending",
        RequestStatus::Accepted => "accepted",
        RequestStatus::Rejected => "rejected",
    }
}
