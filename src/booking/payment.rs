//! 付款生命周期 — 纯状态转换逻辑
//!
//! 规则：
//! - 客户提交只会把阶段置为 paid / 审批 pending，永远不能自我审批
//! - 审批是管理员专属动作；重复审批是幂等 no-op
//! - final 阶段在 advance 审批通过之前不得向 paid 转换（服务端强制）
//! - 已审批的阶段拒绝客户重新提交，否则会悄悄把审批打回 pending

use crate::db::models::{ApprovalStatus, Booking, PaymentPhase, PaymentStatus};
use crate::utils::{AppError, AppResult};

/// totalAmount = guestCount × pricePerPlate
pub fn compute_total(guest_count: i64, price_per_plate: i64) -> AppResult<i64> {
    guest_count
        .checked_mul(price_per_plate)
        .ok_or_else(|| AppError::validation("guestCount × pricePerPlate overflows"))
}

/// advanceAmount = round(totalAmount × 0.5)，四舍五入向上取整到最小货币单位
pub fn advance_from_total(total: i64) -> i64 {
    total / 2 + total % 2
}

/// 客户上传付款截图
///
/// 置 status = paid、approvalStatus = pending，保存截图。
pub fn apply_customer_payment(
    booking: &mut Booking,
    phase: PaymentPhase,
    screenshot: String,
) -> AppResult<()> {
    ensure_phase_open(booking, phase)?;

    let state = booking.payment_mut(phase);
    if state.approval_status == ApprovalStatus::Approved {
        return Err(AppError::business_rule(format!(
            "{phase} payment is already approved"
        )));
    }

    state.status = PaymentStatus::Paid;
    state.approval_status = ApprovalStatus::Pending;
    state.screenshot = Some(screenshot);
    Ok(())
}

/// 管理员审批一个付款阶段
///
/// 置 status = paid、approvalStatus = approved（管理员可以不看截图
/// 强制审批）。返回 `false` 表示该阶段已经是审批通过状态（no-op）。
pub fn apply_admin_approval(booking: &mut Booking, phase: PaymentPhase) -> AppResult<bool> {
    if booking.payment(phase).is_settled() {
        return Ok(false);
    }
    ensure_phase_open(booking, phase)?;

    let state = booking.payment_mut(phase);
    state.status = PaymentStatus::Paid;
    state.approval_status = ApprovalStatus::Approved;
    Ok(true)
}

/// final 阶段只有在 advance 审批通过后才开放
fn ensure_phase_open(booking: &Booking, phase: PaymentPhase) -> AppResult<()> {
    if phase == PaymentPhase::Final
        && booking.advance_payment.approval_status != ApprovalStatus::Approved
    {
        return Err(AppError::business_rule(
            "final payment is not open until the advance payment is approved",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{BookingStatus, PaymentState};

    fn booking(guest_count: i64, price_per_plate: i64) -> Booking {
        let total = compute_total(guest_count, price_per_plate).unwrap();
        Booking {
            id: None,
            client_name: "Asha Rao".into(),
            event_date: "2026-09-14".into(),
            event_type: "Wedding".into(),
            guest_count,
            price_per_plate,
            special_requests: None,
            contact_email: "asha@example.com".into(),
            contact_phone: "9876543210".into(),
            total_amount: total,
            advance_amount: advance_from_total(total),
            status: BookingStatus::Pending,
            advance_payment: PaymentState::default(),
            final_payment: PaymentState::default(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn totals_are_guest_count_times_price() {
        assert_eq!(compute_total(50, 500).unwrap(), 25_000);
        assert_eq!(advance_from_total(25_000), 12_500);
    }

    #[test]
    fn overflowing_total_is_a_validation_error() {
        let err = compute_total(i64::MAX, 2).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        // 极端但合法的总额仍可以算出 advance
        assert_eq!(advance_from_total(i64::MAX), i64::MAX / 2 + 1);
    }

    #[test]
    fn advance_rounds_half_up() {
        assert_eq!(advance_from_total(25_001), 12_501);
        assert_eq!(advance_from_total(0), 0);
        assert_eq!(advance_from_total(1), 1);
    }

    #[test]
    fn customer_payment_never_self_approves() {
        let mut b = booking(50, 500);
        apply_customer_payment(&mut b, PaymentPhase::Advance, "img".into()).unwrap();
        assert_eq!(b.advance_payment.status, PaymentStatus::Paid);
        assert_eq!(b.advance_payment.approval_status, ApprovalStatus::Pending);
        assert_eq!(b.advance_payment.screenshot.as_deref(), Some("img"));
    }

    #[test]
    fn final_phase_is_closed_until_advance_approved() {
        let mut b = booking(50, 500);
        let err = apply_customer_payment(&mut b, PaymentPhase::Final, "img".into()).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));

        let err = apply_admin_approval(&mut b, PaymentPhase::Final).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[test]
    fn final_phase_opens_after_advance_approval() {
        let mut b = booking(50, 500);
        apply_admin_approval(&mut b, PaymentPhase::Advance).unwrap();
        apply_customer_payment(&mut b, PaymentPhase::Final, "img".into()).unwrap();
        assert_eq!(b.final_payment.status, PaymentStatus::Paid);
        assert_eq!(b.final_payment.approval_status, ApprovalStatus::Pending);
    }

    #[test]
    fn approval_is_idempotent() {
        let mut b = booking(50, 500);
        assert!(apply_admin_approval(&mut b, PaymentPhase::Advance).unwrap());
        assert!(!apply_admin_approval(&mut b, PaymentPhase::Advance).unwrap());
        assert!(b.advance_payment.is_settled());
    }

    #[test]
    fn resubmission_after_approval_is_rejected() {
        let mut b = booking(50, 500);
        apply_admin_approval(&mut b, PaymentPhase::Advance).unwrap();
        let err = apply_customer_payment(&mut b, PaymentPhase::Advance, "img".into()).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[test]
    fn fully_paid_requires_both_phases_settled_and_approved() {
        let mut b = booking(50, 500);
        assert!(!b.is_fully_paid());

        apply_customer_payment(&mut b, PaymentPhase::Advance, "img".into()).unwrap();
        assert!(!b.is_fully_paid()); // paid but not approved

        apply_admin_approval(&mut b, PaymentPhase::Advance).unwrap();
        assert!(!b.is_fully_paid()); // final still pending

        apply_admin_approval(&mut b, PaymentPhase::Final).unwrap();
        assert!(b.is_fully_paid());
    }

    #[test]
    fn balance_only_credits_settled_phases() {
        let mut b = booking(50, 500);
        assert_eq!(b.balance_remaining(), 25_000);

        // customer paid, admin not yet approved — balance unchanged
        apply_customer_payment(&mut b, PaymentPhase::Advance, "img".into()).unwrap();
        assert_eq!(b.balance_remaining(), 25_000);

        apply_admin_approval(&mut b, PaymentPhase::Advance).unwrap();
        assert_eq!(b.balance_remaining(), 12_500);

        apply_admin_approval(&mut b, PaymentPhase::Final).unwrap();
        assert_eq!(b.balance_remaining(), 0);
    }

    #[test]
    fn odd_total_balance_settles_to_zero() {
        let mut b = booking(3, 333); // total 999, advance 500
        assert_eq!(b.advance_amount, 500);
        apply_admin_approval(&mut b, PaymentPhase::Advance).unwrap();
        assert_eq!(b.balance_remaining(), 499);
        apply_admin_approval(&mut b, PaymentPhase::Final).unwrap();
        assert_eq!(b.balance_remaining(), 0);
    }
}
