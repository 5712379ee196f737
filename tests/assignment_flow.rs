//! 人员指派工作流集成测试（内存数据库）

use catering_server::assignment::AssignmentService;
use catering_server::booking::BookingService;
use catering_server::db::DbService;
use catering_server::db::models::{
    Booking, BookingCreate, RequestStatus, Staff, StaffRole,
};
use catering_server::db::repository::StaffRepository;
use catering_server::utils::AppError;

struct Fixture {
    assignments: AssignmentService,
    booking_id: String,
    staff_id: String,
    _db: DbService,
}

async fn setup() -> Fixture {
    let db = DbService::open_in_memory().await.unwrap();

    let bookings = BookingService::new(db.db.clone());
    let booking = bookings
        .create(BookingCreate {
            client_name: Some("Ravi Kumar".into()),
            event_date: Some("2026-12-05".into()),
            event_type: Some("Reception".into()),
            guest_count: Some(120),
            price_per_plate: Some(350),
            contact_email: Some("ravi@example.com".into()),
            contact_phone: Some("9876511111".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let staff = create_staff(&db, "Meena", StaffRole::Chef).await;

    Fixture {
        assignments: AssignmentService::new(db.db.clone()),
        booking_id: id_of_booking(&booking),
        staff_id: staff.id.unwrap().to_string(),
        _db: db,
    }
}

fn id_of_booking(booking: &Booking) -> String {
    booking.id.as_ref().unwrap().to_string()
}

async fn create_staff(db: &DbService, name: &str, role: StaffRole) -> Staff {
    StaffRepository::new(db.db.clone())
        .create(Staff {
            id: None,
            name: name.into(),
            role,
            phone: "9000000000".into(),
            created_at: 0,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn request_creates_pending_with_token() {
    let fx = setup().await;

    let request = fx
        .assignments
        .request_assignment(&fx.booking_id, &fx.staff_id)
        .await
        .unwrap();

    assert_eq!(request.status, RequestStatus::Pending);
    assert!(!request.token.is_empty());
    assert!(request.responded_at.is_none());
}

#[tokio::test]
async fn repeated_request_reuses_the_same_row() {
    let fx = setup().await;

    let first = fx
        .assignments
        .request_assignment(&fx.booking_id, &fx.staff_id)
        .await
        .unwrap();
    let second = fx
        .assignments
        .request_assignment(&fx.booking_id, &fx.staff_id)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.token, second.token);
}

#[tokio::test]
async fn requests_store_references_as_record_links() {
    let fx = setup().await;

    fx.assignments
        .request_assignment(&fx.booking_id, &fx.staff_id)
        .await
        .unwrap();

    // 引用字段必须落库为 record，否则 pair 查重和到岗名单的
    // WHERE booking = $booking 永远不命中
    let flags: Vec<bool> = fx
        ._db
        .db
        .query("SELECT VALUE type::is::record(booking) AND type::is::record(staff) FROM staff_request")
        .await
        .unwrap()
        .take(0)
        .unwrap();
    assert_eq!(flags, vec![true]);
}

#[tokio::test]
async fn direct_assignment_is_immediately_accepted() {
    let fx = setup().await;

    let request = fx
        .assignments
        .assign_direct(&fx.booking_id, &fx.staff_id)
        .await
        .unwrap();
    assert_eq!(request.status, RequestStatus::Accepted);
    assert!(request.responded_at.is_some());

    let roster = fx.assignments.list_accepted(&fx.booking_id).await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].name, "Meena");
}

#[tokio::test]
async fn token_resolves_to_joined_view() {
    let fx = setup().await;

    let request = fx
        .assignments
        .request_assignment(&fx.booking_id, &fx.staff_id)
        .await
        .unwrap();

    let resolved = fx.assignments.resolve_by_token(&request.token).await.unwrap();
    assert_eq!(resolved.booking.client_name, "Ravi Kumar");
    assert_eq!(resolved.staff.name, "Meena");
    assert_eq!(resolved.request.status, RequestStatus::Pending);
}

#[tokio::test]
async fn unknown_token_is_not_found() {
    let fx = setup().await;
    let err = fx
        .assignments
        .resolve_by_token("no-such-token")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn accept_then_repeat_is_idempotent_but_flip_conflicts() {
    let fx = setup().await;
    let request = fx
        .assignments
        .request_assignment(&fx.booking_id, &fx.staff_id)
        .await
        .unwrap();

    let accepted = fx
        .assignments
        .respond_by_token(&request.token, RequestStatus::Accepted)
        .await
        .unwrap();
    assert_eq!(accepted.status, RequestStatus::Accepted);
    assert!(accepted.responded_at.is_some());

    // 重复同一决定 → 幂等
    let again = fx
        .assignments
        .respond_by_token(&request.token, RequestStatus::Accepted)
        .await
        .unwrap();
    assert_eq!(again.status, RequestStatus::Accepted);

    // 换决定 → 冲突
    let err = fx
        .assignments
        .respond_by_token(&request.token, RequestStatus::Rejected)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn pending_is_not_a_valid_decision() {
    let fx = setup().await;
    let request = fx
        .assignments
        .request_assignment(&fx.booking_id, &fx.staff_id)
        .await
        .unwrap();

    let err = fx
        .assignments
        .respond_by_token(&request.token, RequestStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn rejected_staff_never_reach_the_roster() {
    let fx = setup().await;
    let request = fx
        .assignments
        .request_assignment(&fx.booking_id, &fx.staff_id)
        .await
        .unwrap();

    fx.assignments
        .respond_by_token(&request.token, RequestStatus::Rejected)
        .await
        .unwrap();

    // 被问过的人仍出现在请求列表，但到岗名单为空
    let asked = fx.assignments.list_requests(&fx.booking_id).await.unwrap();
    assert_eq!(asked.len(), 1);
    assert_eq!(asked[0].status, RequestStatus::Rejected);

    let roster = fx.assignments.list_accepted(&fx.booking_id).await.unwrap();
    assert!(roster.is_empty());
}

#[tokio::test]
async fn unassign_starts_a_fresh_cycle() {
    let fx = setup().await;
    let first = fx
        .assignments
        .assign_direct(&fx.booking_id, &fx.staff_id)
        .await
        .unwrap();

    assert!(fx
        .assignments
        .unassign(&fx.booking_id, &fx.staff_id)
        .await
        .unwrap());
    assert!(fx.assignments.list_accepted(&fx.booking_id).await.unwrap().is_empty());

    // 重新请求 → 全新 pending 行，新 token
    let second = fx
        .assignments
        .request_assignment(&fx.booking_id, &fx.staff_id)
        .await
        .unwrap();
    assert_eq!(second.status, RequestStatus::Pending);
    assert_ne!(first.token, second.token);
}

#[tokio::test]
async fn unassign_missing_pair_returns_false() {
    let fx = setup().await;
    assert!(!fx
        .assignments
        .unassign(&fx.booking_id, &fx.staff_id)
        .await
        .unwrap());
}

#[tokio::test]
async fn request_for_unknown_staff_or_booking_fails() {
    let fx = setup().await;

    let err = fx
        .assignments
        .request_assignment(&fx.booking_id, "staff:doesnotexist")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = fx
        .assignments
        .request_assignment("booking:doesnotexist", &fx.staff_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn multiple_staff_roster_only_lists_accepted() {
    let fx = setup().await;
    let second_staff = create_staff(&fx._db, "Suresh", StaffRole::Server).await;
    let second_id = second_staff.id.unwrap().to_string();

    fx.assignments
        .assign_direct(&fx.booking_id, &fx.staff_id)
        .await
        .unwrap();
    fx.assignments
        .request_assignment(&fx.booking_id, &second_id)
        .await
        .unwrap();

    let asked = fx.assignments.list_requests(&fx.booking_id).await.unwrap();
    assert_eq!(asked.len(), 2);

    let roster = fx.assignments.list_accepted(&fx.booking_id).await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].name, "Meena");
}
