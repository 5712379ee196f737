//! Staff Booking Request Repository

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{RequestStatus, Staff, StaffBookingRequest};

const TABLE: &str = "staff_request";
const BOOKING_TABLE: &str = "booking";
const STAFF_TABLE: &str = "staff";

#[derive(Clone)]
pub struct StaffRequestRepository {
    base: BaseRepository,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusPatch {
    status: RequestStatus,
    responded_at: i64,
}

/// 写入行：booking / staff 用原生 RecordId，落库为 record link
/// （模型的字符串形式只用于 API JSON）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestRow {
    booking: RecordId,
    staff: RecordId,
    status: RequestStatus,
    token: String,
    created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    responded_at: Option<i64>,
}

impl StaffRequestRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn booking_ref(booking_id: &str) -> RecordId {
        RecordId::from_table_key(BOOKING_TABLE, record_key(BOOKING_TABLE, booking_id))
    }

    fn staff_ref(staff_id: &str) -> RecordId {
        RecordId::from_table_key(STAFF_TABLE, record_key(STAFF_TABLE, staff_id))
    }

    /// Find the unique (booking, staff) pair row, if any
    pub async fn find_pair(
        &self,
        booking_id: &str,
        staff_id: &str,
    ) -> RepoResult<Option<StaffBookingRequest>> {
        let requests: Vec<StaffBookingRequest> = self
            .base
            .db()
            .query("SELECT * FROM staff_request WHERE booking = $booking AND staff = $staff LIMIT 1")
            .bind(("booking", Self::booking_ref(booking_id)))
            .bind(("staff", Self::staff_ref(staff_id)))
            .await?
            .take(0)?;
        Ok(requests.into_iter().next())
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<StaffBookingRequest>> {
        let request: Option<StaffBookingRequest> =
            self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(request)
    }

    pub async fn find_by_token(&self, token: &str) -> RepoResult<Option<StaffBookingRequest>> {
        // $token is a protected SurrealDB variable; bind under another name
        let requests: Vec<StaffBookingRequest> = self
            .base
            .db()
            .query("SELECT * FROM staff_request WHERE token = $tok LIMIT 1")
            .bind(("tok", token.to_string()))
            .await?
            .take(0)?;
        Ok(requests.into_iter().next())
    }

    pub async fn find_by_booking(&self, booking_id: &str) -> RepoResult<Vec<StaffBookingRequest>> {
        let requests: Vec<StaffBookingRequest> = self
            .base
            .db()
            .query("SELECT * FROM staff_request WHERE booking = $booking ORDER BY createdAt")
            .bind(("booking", Self::booking_ref(booking_id)))
            .await?
            .take(0)?;
        Ok(requests)
    }

    pub async fn create(&self, request: StaffBookingRequest) -> RepoResult<StaffBookingRequest> {
        let row = RequestRow {
            booking: request.booking,
            staff: request.staff,
            status: request.status,
            token: request.token,
            created_at: request.created_at,
            responded_at: request.responded_at,
        };
        let created: Option<StaffBookingRequest> =
            self.base.db().create(TABLE).content(row).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create staff request".to_string()))
    }

    pub async fn set_status(
        &self,
        id: &str,
        status: RequestStatus,
        responded_at: i64,
    ) -> RepoResult<StaffBookingRequest> {
        let updated: Option<StaffBookingRequest> = self
            .base
            .db()
            .update((TABLE, record_key(TABLE, id)))
            .merge(StatusPatch {
                status,
                responded_at,
            })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Staff request {} not found", id)))
    }

    /// Hard-delete the pair row; returns whether a row existed
    pub async fn delete_pair(&self, booking_id: &str, staff_id: &str) -> RepoResult<bool> {
        let deleted: Vec<StaffBookingRequest> = self
            .base
            .db()
            .query("DELETE staff_request WHERE booking = $booking AND staff = $staff RETURN BEFORE")
            .bind(("booking", Self::booking_ref(booking_id)))
            .bind(("staff", Self::staff_ref(staff_id)))
            .await?
            .take(0)?;
        Ok(!deleted.is_empty())
    }

    /// Staff whose request for this booking is accepted —
    /// the canonical "who is actually assigned" view
    pub async fn find_accepted_staff(&self, booking_id: &str) -> RepoResult<Vec<Staff>> {
        let staff: Vec<Staff> = self
            .base
            .db()
            .query(
                "SELECT * FROM staff WHERE id INSIDE (
                     SELECT VALUE staff FROM staff_request
                     WHERE booking = $booking AND status = 'accepted'
                 ) ORDER BY name",
            )
            .bind(("booking", Self::booking_ref(booking_id)))
            .await?
            .take(0)?;
        Ok(staff)
    }

    /// Staff documents for a set of request rows (admin joined view)
    pub async fn find_staff_by_ids(&self, ids: Vec<RecordId>) -> RepoResult<Vec<Staff>> {
        let staff: Vec<Staff> = self
            .base
            .db()
            .query("SELECT * FROM staff WHERE id INSIDE $ids")
            .bind(("ids", ids))
            .await?
            .take(0)?;
        Ok(staff)
    }
}
