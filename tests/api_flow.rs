//! HTTP 层集成测试 — 信封格式、认证与字段归一化

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use catering_server::auth::hash_password;
use catering_server::core::{Config, Server, ServerState};
use catering_server::db::DbService;

const TEST_PASSWORD: &str = "integration-test-password";

async fn test_app() -> Router {
    let config = Config {
        data_dir: String::new(),
        http_port: 0,
        admin_password_hash: hash_password(TEST_PASSWORD).unwrap(),
        jwt_secret: "integration-test-secret-0123456789abcdef".into(),
        jwt_expiration_minutes: 60,
        log_dir: None,
        log_level: "warn".into(),
    };
    let db = DbService::open_in_memory().await.unwrap();
    Server::build_router(ServerState::with_db(config, db))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        post_json("/api/admin/login", json!({ "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_uses_the_envelope() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Request::get("/api/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("ok"));
    assert!(body["error"].is_null());
    assert!(body["timestamp"].is_i64());
}

#[tokio::test]
async fn wrong_password_is_rejected_with_the_envelope() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        post_json("/api/admin/login", json!({ "password": "nope" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert!(body["data"].is_null());
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn admin_routes_require_a_token() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Request::get("/api/bookings").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));

    let token = login(&app).await;
    let (status, body) = send(
        &app,
        Request::get("/api/bookings")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body["data"].is_array());
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let app = test_app().await;
    let (status, _) = send(
        &app,
        Request::get("/api/staff")
            .header(header::AUTHORIZATION, "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn booking_create_accepts_legacy_field_names() {
    let app = test_app().await;

    // snake_case 旧字段名在输入边界被归一化
    let (status, body) = send(
        &app,
        post_json(
            "/api/bookings",
            json!({
                "client_name": "Asha Verma",
                "event_date": "2026-11-20",
                "event_type": "Wedding",
                "no_of_guests": 50,
                "plate_price": 500,
                "email": "asha@example.com",
                "mobile": "9876500000"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["clientName"], json!("Asha Verma"));
    assert_eq!(body["data"]["totalAmount"], json!(25_000));
    assert_eq!(body["data"]["advanceAmount"], json!(12_500));
}

#[tokio::test]
async fn invalid_booking_reports_bad_request() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        post_json("/api/bookings", json!({ "clientName": "Only a name" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("eventDate"));
}

#[tokio::test]
async fn final_payment_before_advance_is_unprocessable() {
    let app = test_app().await;

    let (_, created) = send(
        &app,
        post_json(
            "/api/bookings",
            json!({
                "clientName": "Ravi",
                "eventDate": "2026-12-05",
                "eventType": "Reception",
                "guestCount": 10,
                "pricePerPlate": 100,
                "contactEmail": "ravi@example.com",
                "contactPhone": "9876511111"
            }),
        ),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        post_json(
            &format!("/api/bookings/{id}/payments/final"),
            json!({ "screenshot": "data:image/png;base64,AAAA" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn company_info_read_is_public_but_write_is_not() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Request::get("/api/company-info")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["companyName"].is_string());

    let request = Request::patch("/api/company-info")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "tagline": "We cater" }).to_string()))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_mutations_show_up_in_audit_history() {
    let app = test_app().await;
    let token = login(&app).await;

    let request = Request::post("/api/food-items")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(
            json!({
                "name": "Paneer Tikka",
                "category": "Starter",
                "dietType": "Veg"
            })
            .to_string(),
        ))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Request::get("/api/audit-history?entityType=food_item")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], json!("create"));
    assert_eq!(entries[0]["operator"], json!("admin"));
}
