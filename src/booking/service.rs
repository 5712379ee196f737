//! Booking Entity Service
//!
//! 预订的创建、金额计算和两阶段付款生命周期都集中在这里；
//! handler 层只做请求/响应映射。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::payment;
use crate::db::models::{
    Booking, BookingCreate, BookingItem, BookingItemInput, BookingStatus, BookingUpdate,
    PaymentPhase, PaymentState,
};
use crate::db::repository::{BookingItemRepository, BookingRepository};
use crate::utils::time::{now_millis, parse_date};
use crate::utils::validation::{MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct BookingService {
    bookings: BookingRepository,
    items: BookingItemRepository,
}

impl BookingService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            bookings: BookingRepository::new(db.clone()),
            items: BookingItemRepository::new(db),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Booking>> {
        Ok(self.bookings.find_all().await?)
    }

    pub async fn get(&self, id: &str) -> AppResult<Booking> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {} not found", id)))
    }

    /// 创建预订
    ///
    /// 缺失/非法字段统一收集后报一条 ValidationError。
    /// 金额：调用方给定的值优先；缺省时 total = guests × price，
    /// advance = round(total × 0.5)。
    pub async fn create(&self, input: BookingCreate) -> AppResult<Booking> {
        let mut problems: Vec<String> = Vec::new();

        let client_name = require_text(&input.client_name, "clientName", MAX_NAME_LEN, &mut problems);
        let event_date = require_text(&input.event_date, "eventDate", MAX_SHORT_TEXT_LEN, &mut problems);
        let event_type = require_text(&input.event_type, "eventType", MAX_SHORT_TEXT_LEN, &mut problems);
        let contact_email = require_text(&input.contact_email, "contactEmail", MAX_EMAIL_LEN, &mut problems);
        let contact_phone = require_text(&input.contact_phone, "contactPhone", MAX_SHORT_TEXT_LEN, &mut problems);

        let guest_count = require_amount(input.guest_count, "guestCount", &mut problems);
        let price_per_plate = require_amount(input.price_per_plate, "pricePerPlate", &mut problems);

        if let Some(date) = &input.event_date
            && parse_date(date).is_err()
        {
            problems.push("eventDate".into());
        }
        if let Some(email) = &input.contact_email
            && !email.contains('@')
        {
            problems.push("contactEmail".into());
        }
        if let Some(requests) = &input.special_requests
            && requests.len() > MAX_NOTE_LEN
        {
            problems.push("specialRequests".into());
        }
        if input.total_amount.is_some_and(|v| v < 0) {
            problems.push("totalAmount".into());
        }
        if input.advance_amount.is_some_and(|v| v < 0) {
            problems.push("advanceAmount".into());
        }

        if !problems.is_empty() {
            problems.dedup();
            return Err(AppError::validation(format!(
                "missing or invalid fields: {}",
                problems.join(", ")
            )));
        }

        // 调用方预先固定的金额优先
        let total_amount = match input.total_amount {
            Some(v) => v,
            None => payment::compute_total(guest_count, price_per_plate)?,
        };
        let advance_amount = input
            .advance_amount
            .unwrap_or_else(|| payment::advance_from_total(total_amount));

        let now = now_millis();
        let booking = Booking {
            id: None,
            client_name,
            event_date,
            event_type,
            guest_count,
            price_per_plate,
            special_requests: input.special_requests,
            contact_email,
            contact_phone,
            total_amount,
            advance_amount,
            status: BookingStatus::Pending,
            advance_payment: PaymentState::default(),
            final_payment: PaymentState::default(),
            created_at: now,
            updated_at: now,
        };

        let created = self.bookings.create(booking).await?;
        tracing::info!(
            booking = %created.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            total = created.total_amount,
            "Booking created"
        );
        Ok(created)
    }

    /// Shallow merge — "what you send is what you get"，金额从不自动重算
    pub async fn update(&self, id: &str, partial: BookingUpdate) -> AppResult<Booking> {
        if let Some(guests) = partial.guest_count
            && guests < 0
        {
            return Err(AppError::validation("guestCount must not be negative"));
        }
        if let Some(price) = partial.price_per_plate
            && price < 0
        {
            return Err(AppError::validation("pricePerPlate must not be negative"));
        }
        if let Some(total) = partial.total_amount
            && total < 0
        {
            return Err(AppError::validation("totalAmount must not be negative"));
        }
        if let Some(advance) = partial.advance_amount
            && advance < 0
        {
            return Err(AppError::validation("advanceAmount must not be negative"));
        }
        Ok(self.bookings.merge(id, partial).await?)
    }

    /// 删除预订并级联删除其 BookingItems / StaffBookingRequests
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        Ok(self.bookings.delete_cascade(id).await?)
    }

    pub async fn get_items(&self, booking_id: &str) -> AppResult<Vec<BookingItem>> {
        self.get(booking_id).await?;
        Ok(self.items.find_by_booking(booking_id).await?)
    }

    /// Replace-all：管理端总是重发完整的当前菜单选择
    pub async fn set_items(
        &self,
        booking_id: &str,
        inputs: Vec<BookingItemInput>,
    ) -> AppResult<Vec<BookingItem>> {
        let booking = self.get(booking_id).await?;
        let booking_ref = booking
            .id
            .ok_or_else(|| AppError::internal("booking record has no id"))?;

        for input in &inputs {
            if input.quantity < 0 {
                return Err(AppError::validation("item quantity must not be negative"));
            }
        }

        let rows: Vec<BookingItem> = inputs
            .into_iter()
            .map(|input| BookingItem {
                id: None,
                booking: booking_ref.clone(),
                food_item: input.food_item,
                quantity: input.quantity,
            })
            .collect();

        Ok(self.items.replace_all(booking_id, rows).await?)
    }

    /// 客户提交付款截图
    pub async fn record_customer_payment(
        &self,
        booking_id: &str,
        phase: PaymentPhase,
        screenshot: String,
    ) -> AppResult<Booking> {
        let mut booking = self.get(booking_id).await?;
        payment::apply_customer_payment(&mut booking, phase, screenshot)?;
        self.persist_payment(booking_id, &booking, phase).await
    }

    /// 管理员审批付款阶段（幂等）
    pub async fn approve_payment(
        &self,
        booking_id: &str,
        phase: PaymentPhase,
    ) -> AppResult<Booking> {
        let mut booking = self.get(booking_id).await?;
        let changed = payment::apply_admin_approval(&mut booking, phase)?;
        if !changed {
            return Ok(booking);
        }
        tracing::info!(booking = booking_id, %phase, "Payment approved");
        self.persist_payment(booking_id, &booking, phase).await
    }

    async fn persist_payment(
        &self,
        booking_id: &str,
        booking: &Booking,
        phase: PaymentPhase,
    ) -> AppResult<Booking> {
        let (advance, r#final) = match phase {
            PaymentPhase::Advance => (Some(booking.advance_payment.clone()), None),
            PaymentPhase::Final => (None, Some(booking.final_payment.clone())),
        };
        Ok(self.bookings.set_payment(booking_id, advance, r#final).await?)
    }
}

fn require_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
    problems: &mut Vec<String>,
) -> String {
    match value {
        Some(v) if !v.trim().is_empty() && v.len() <= max_len => v.clone(),
        _ => {
            problems.push(field.to_string());
            String::new()
        }
    }
}

fn require_amount(value: Option<i64>, field: &str, problems: &mut Vec<String>) -> i64 {
    match value {
        Some(v) if v >= 0 => v,
        _ => {
            problems.push(field.to_string());
            0
        }
    }
}
