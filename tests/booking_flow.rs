//! 预订生命周期集成测试（内存数据库）

use catering_server::booking::BookingService;
use catering_server::db::DbService;
use catering_server::db::models::{
    ApprovalStatus, Booking, BookingCreate, BookingItem, BookingItemInput, BookingUpdate, DietType,
    FoodItem, PaymentPhase, PaymentStatus,
};
use catering_server::db::repository::FoodItemRepository;
use catering_server::utils::AppError;

async fn setup() -> (BookingService, DbService) {
    let db = DbService::open_in_memory().await.unwrap();
    (BookingService::new(db.db.clone()), db)
}

fn sample_input() -> BookingCreate {
    BookingCreate {
        client_name: Some("Asha Verma".into()),
        event_date: Some("2026-11-20".into()),
        event_type: Some("Wedding".into()),
        guest_count: Some(50),
        price_per_plate: Some(500),
        contact_email: Some("asha@example.com".into()),
        contact_phone: Some("9876500000".into()),
        ..Default::default()
    }
}

fn booking_id(booking: &Booking) -> String {
    booking.id.as_ref().unwrap().to_string()
}

#[tokio::test]
async fn create_computes_amounts() {
    let (service, _db) = setup().await;

    let booking = service.create(sample_input()).await.unwrap();
    assert_eq!(booking.total_amount, 25_000);
    assert_eq!(booking.advance_amount, 12_500);
    assert_eq!(booking.advance_payment.status, PaymentStatus::Pending);
    assert_eq!(booking.final_payment.approval_status, ApprovalStatus::Pending);
}

#[tokio::test]
async fn create_keeps_caller_pinned_amounts() {
    let (service, _db) = setup().await;

    let mut input = sample_input();
    input.total_amount = Some(30_000);
    input.advance_amount = Some(10_000);

    let booking = service.create(input).await.unwrap();
    assert_eq!(booking.total_amount, 30_000);
    assert_eq!(booking.advance_amount, 10_000);
}

#[tokio::test]
async fn create_reports_all_missing_fields_at_once() {
    let (service, _db) = setup().await;

    let input = BookingCreate {
        guest_count: Some(10),
        ..Default::default()
    };

    let err = service.create(input).await.unwrap_err();
    match err {
        AppError::Validation(msg) => {
            assert!(msg.contains("clientName"));
            assert!(msg.contains("eventDate"));
            assert!(msg.contains("contactEmail"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn customer_payment_needs_admin_approval_to_settle() {
    let (service, _db) = setup().await;
    let booking = service.create(sample_input()).await.unwrap();
    let id = booking_id(&booking);

    let after = service
        .record_customer_payment(&id, PaymentPhase::Advance, "img-data".into())
        .await
        .unwrap();

    assert_eq!(after.advance_payment.status, PaymentStatus::Paid);
    assert_eq!(after.advance_payment.approval_status, ApprovalStatus::Pending);
    assert!(!after.advance_payment.is_settled());

    let approved = service
        .approve_payment(&id, PaymentPhase::Advance)
        .await
        .unwrap();
    assert!(approved.advance_payment.is_settled());
}

#[tokio::test]
async fn approve_is_idempotent() {
    let (service, _db) = setup().await;
    let booking = service.create(sample_input()).await.unwrap();
    let id = booking_id(&booking);

    service
        .record_customer_payment(&id, PaymentPhase::Advance, "img".into())
        .await
        .unwrap();
    let first = service
        .approve_payment(&id, PaymentPhase::Advance)
        .await
        .unwrap();
    let second = service
        .approve_payment(&id, PaymentPhase::Advance)
        .await
        .unwrap();

    assert_eq!(first.advance_payment, second.advance_payment);
}

#[tokio::test]
async fn final_phase_is_closed_until_advance_approved() {
    let (service, _db) = setup().await;
    let booking = service.create(sample_input()).await.unwrap();
    let id = booking_id(&booking);

    let err = service
        .record_customer_payment(&id, PaymentPhase::Final, "img".into())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    // advance 结清后 final 开放
    service
        .record_customer_payment(&id, PaymentPhase::Advance, "img".into())
        .await
        .unwrap();
    service
        .approve_payment(&id, PaymentPhase::Advance)
        .await
        .unwrap();

    let after = service
        .record_customer_payment(&id, PaymentPhase::Final, "img2".into())
        .await
        .unwrap();
    assert_eq!(after.final_payment.status, PaymentStatus::Paid);
}

#[tokio::test]
async fn full_payment_flow_clears_balance() {
    let (service, _db) = setup().await;
    let booking = service.create(sample_input()).await.unwrap();
    let id = booking_id(&booking);
    assert_eq!(booking.balance_remaining(), 25_000);

    service
        .record_customer_payment(&id, PaymentPhase::Advance, "a".into())
        .await
        .unwrap();
    let mid = service
        .approve_payment(&id, PaymentPhase::Advance)
        .await
        .unwrap();
    assert_eq!(mid.balance_remaining(), 12_500);

    service
        .record_customer_payment(&id, PaymentPhase::Final, "f".into())
        .await
        .unwrap();
    let done = service
        .approve_payment(&id, PaymentPhase::Final)
        .await
        .unwrap();

    assert!(done.is_fully_paid());
    assert_eq!(done.balance_remaining(), 0);
}

#[tokio::test]
async fn reupload_after_approval_is_rejected() {
    let (service, _db) = setup().await;
    let booking = service.create(sample_input()).await.unwrap();
    let id = booking_id(&booking);

    service
        .record_customer_payment(&id, PaymentPhase::Advance, "first".into())
        .await
        .unwrap();
    service
        .approve_payment(&id, PaymentPhase::Advance)
        .await
        .unwrap();

    let err = service
        .record_customer_payment(&id, PaymentPhase::Advance, "second".into())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn update_is_shallow_and_never_recomputes() {
    let (service, _db) = setup().await;
    let booking = service.create(sample_input()).await.unwrap();
    let id = booking_id(&booking);

    let partial = BookingUpdate {
        guest_count: Some(80),
        ..Default::default()
    };
    let updated = service.update(&id, partial).await.unwrap();

    assert_eq!(updated.guest_count, 80);
    // 金额保持创建时的值
    assert_eq!(updated.total_amount, 25_000);
    assert_eq!(updated.client_name, "Asha Verma");
}

#[tokio::test]
async fn update_rejects_negative_amounts() {
    let (service, _db) = setup().await;
    let booking = service.create(sample_input()).await.unwrap();
    let id = booking_id(&booking);

    let err = service
        .update(
            &id,
            BookingUpdate {
                total_amount: Some(-1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = service
        .update(
            &id,
            BookingUpdate {
                advance_amount: Some(-500),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // 预订保持原值
    let unchanged = service.get(&id).await.unwrap();
    assert_eq!(unchanged.total_amount, 25_000);
    assert_eq!(unchanged.advance_amount, 12_500);
}

async fn create_food_item(db: &DbService, name: &str) -> FoodItem {
    let repo = FoodItemRepository::new(db.db.clone());
    repo.create(FoodItem {
        id: None,
        name: name.into(),
        description: None,
        category: "Main Course".into(),
        diet_type: DietType::Veg,
        image_url: None,
        dietary_tags: vec![],
        created_at: 0,
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn set_items_replaces_the_whole_selection() {
    let (service, db) = setup().await;
    let booking = service.create(sample_input()).await.unwrap();
    let id = booking_id(&booking);

    let paneer = create_food_item(&db, "Paneer Tikka").await;
    let dal = create_food_item(&db, "Dal Makhani").await;

    let first = service
        .set_items(
            &id,
            vec![
                BookingItemInput {
                    food_item: paneer.id.clone().unwrap(),
                    quantity: 2,
                },
                BookingItemInput {
                    food_item: dal.id.clone().unwrap(),
                    quantity: 1,
                },
            ],
        )
        .await
        .unwrap();
    assert_eq!(first.len(), 2);

    // 重发只含一项的列表 → 整体替换
    let second = service
        .set_items(
            &id,
            vec![BookingItemInput {
                food_item: dal.id.clone().unwrap(),
                quantity: 3,
            }],
        )
        .await
        .unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].quantity, 3);

    // 空列表清空选择
    let cleared = service.set_items(&id, vec![]).await.unwrap();
    assert!(cleared.is_empty());
}

#[tokio::test]
async fn items_store_references_as_record_links() {
    let (service, db) = setup().await;
    let booking = service.create(sample_input()).await.unwrap();
    let id = booking_id(&booking);

    let item = create_food_item(&db, "Paneer Tikka").await;
    let saved = service
        .set_items(
            &id,
            vec![BookingItemInput {
                food_item: item.id.clone().unwrap(),
                quantity: 2,
            }],
        )
        .await
        .unwrap();
    assert_eq!(saved.len(), 1);

    // 引用字段必须落库为 record，字符串形式会让 WHERE booking = $booking 永远不命中
    let flags: Vec<bool> = db
        .db
        .query("SELECT VALUE type::is::record(booking) AND type::is::record(foodItem) FROM booking_item")
        .await
        .unwrap()
        .take(0)
        .unwrap();
    assert_eq!(flags, vec![true]);
}

#[tokio::test]
async fn delete_cascades_to_items() {
    let (service, db) = setup().await;
    let booking = service.create(sample_input()).await.unwrap();
    let id = booking_id(&booking);

    let item = create_food_item(&db, "Biryani").await;
    service
        .set_items(
            &id,
            vec![BookingItemInput {
                food_item: item.id.clone().unwrap(),
                quantity: 5,
            }],
        )
        .await
        .unwrap();

    assert!(service.delete(&id).await.unwrap());
    assert!(matches!(
        service.get(&id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    // 依赖行真的从表里消失，而不只是读不到
    let leftovers: Vec<BookingItem> = db
        .db
        .query("SELECT * FROM booking_item")
        .await
        .unwrap()
        .take(0)
        .unwrap();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn delete_missing_booking_returns_false() {
    let (service, _db) = setup().await;
    assert!(!service.delete("booking:doesnotexist").await.unwrap());
}

#[tokio::test]
async fn rocksdb_backend_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let db = DbService::open(dir.path().to_str().unwrap()).await.unwrap();
    let service = BookingService::new(db.db.clone());

    let booking = service.create(sample_input()).await.unwrap();
    let loaded = service.get(&booking_id(&booking)).await.unwrap();
    assert_eq!(loaded.client_name, "Asha Verma");
    assert_eq!(loaded.total_amount, 25_000);
}
