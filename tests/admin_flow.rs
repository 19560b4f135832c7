use std::time::Duration;

use axum::{extract::FromRequestParts, http::Request};
use serde_json::json;
use uuid::Uuid;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

use storebot_admin_api::{
    config::AppConfig,
    middleware::auth::AdminSession,
    dto::{
        auth::LoginRequest,
        orders::{OrderAction, OrderActionRequest},
        products::ProductPatch,
    },
    error::AppError,
    models::BotSettings,
    routes::params::{OrderListQuery, UserListQuery},
    services::{
        auth_service, dashboard_service, order_service, product_service, settings_service,
        user_service,
    },
    session::Session,
    state::AppState,
};

fn test_config(backend_url: String) -> AppConfig {
    AppConfig {
        backend_url,
        host: "127.0.0.1".into(),
        port: 0,
        allowed_origin: None,
        poll_interval_secs: 30,
        poll_pause_after_secs: 90,
        poll_max_backoff_secs: 480,
        session_ttl_secs: 3600,
        session_revalidate_secs: 300,
    }
}

async fn state_with_session(server: &MockServer) -> (AppState, Session) {
    let state = AppState::new(test_config(server.uri()));
    let session = state
        .sessions
        .insert("backend-token".into(), "admin".into())
        .await;
    (state, session)
}

/// State whose sessions are stale for revalidation as soon as any time has
/// passed, plus a session aged past that window.
async fn state_with_stale_session(server: &MockServer) -> (AppState, Session) {
    let mut config = test_config(server.uri());
    config.session_revalidate_secs = 0;
    let state = AppState::new(config);
    let session = state
        .sessions
        .insert("backend-token".into(), "admin".into())
        .await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    (state, session)
}

async fn extract_session(state: &AppState, bearer: &str) -> Result<AdminSession, AppError> {
    let request = Request::builder()
        .uri("/api/dashboard")
        .header("authorization", format!("Bearer {bearer}"))
        .body(())
        .expect("request");
    let (mut parts, _) = request.into_parts();
    AdminSession::from_request_parts(&mut parts, state).await
}

fn order_json(id: &str, user: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user_name": user,
        "user_telegram_id": 111222333,
        "product_type": "telecom",
        "quantity": 1,
        "price": 5.0,
        "currency_display": "$5.00",
        "payment_method": "cash",
        "payment_proof": null,
        "status": status,
        "admin_notes": null,
        "transaction_code": "TX-1",
        "created_at": "2024-05-01T10:00:00Z"
    })
}

fn user_json(id: &str, first: &str, spent: f64, orders: i64) -> serde_json::Value {
    json!({
        "id": id,
        "telegram_id": 111222333,
        "username": first.to_lowercase(),
        "first_name": first,
        "last_name": null,
        "total_orders": orders,
        "total_spent": spent,
        "is_blocked": false,
        "created_at": "2024-01-15T08:30:00Z"
    })
}

#[tokio::test]
async fn login_mints_a_resolvable_session() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "username": "admin", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "backend-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = AppState::new(test_config(server.uri()));
    let resp = auth_service::login(
        &state,
        LoginRequest {
            username: "admin".into(),
            password: "s3cret".into(),
        },
    )
    .await?;

    let token = resp.data.expect("session token");
    let id = Uuid::parse_str(&token.access_token)?;
    let session = state.sessions.resolve(id).await.expect("stored session");
    assert_eq!(session.backend_token, "backend-token");
    assert_eq!(session.username, "admin");
    Ok(())
}

#[tokio::test]
async fn rejected_login_reads_as_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "bad credentials" })),
        )
        .mount(&server)
        .await;

    let state = AppState::new(test_config(server.uri()));
    let err = auth_service::login(
        &state,
        LoginRequest {
            username: "admin".into(),
            password: "wrong".into(),
        },
    )
    .await
    .expect_err("login should fail");

    assert!(matches!(err, AppError::Unauthorized(msg) if msg == "Invalid username or password"));
}

#[tokio::test]
async fn backend_failure_during_login_is_not_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "boom" })))
        .mount(&server)
        .await;

    let state = AppState::new(test_config(server.uri()));
    let err = auth_service::login(
        &state,
        LoginRequest {
            username: "admin".into(),
            password: "s3cret".into(),
        },
    )
    .await
    .expect_err("login should fail");

    assert!(matches!(err, AppError::Upstream { status: 500, .. }));
}

#[tokio::test]
async fn confirming_a_pending_order_sends_one_patch_then_refetches() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/orders/o-1"))
        .and(body_json(json!({
            "status": "confirmed",
            "admin_notes": "تم تأكيد الطلب"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("o-1", "Sara", "confirmed")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            order_json("o-1", "Sara", "confirmed"),
            order_json("o-2", "Omar", "pending"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (state, session) = state_with_session(&server).await;
    let resp = order_service::apply_action(
        &state,
        &session,
        "o-1",
        OrderActionRequest {
            action: OrderAction::Confirm,
            note: None,
        },
    )
    .await?;

    let list = resp.data.expect("order list");
    assert_eq!(list.items.len(), 2);
    assert_eq!(list.items[0].status, "confirmed");
    Ok(())
}

#[tokio::test]
async fn completed_order_offers_no_actions() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/o-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("o-9", "Sara", "completed")))
        .mount(&server)
        .await;

    let (state, session) = state_with_session(&server).await;
    let resp = order_service::get_order(&state, &session, "o-9").await?;

    let detail = resp.data.expect("order detail");
    assert!(detail.actions.is_empty());
    Ok(())
}

#[tokio::test]
async fn overlapping_order_mutations_get_conflict() {
    let server = MockServer::start().await;
    let (state, session) = state_with_session(&server).await;

    let _held = state.guard.begin("order:o-1").expect("first claim");
    let err = order_service::apply_action(
        &state,
        &session,
        "o-1",
        OrderActionRequest {
            action: OrderAction::Cancel,
            note: None,
        },
    )
    .await
    .expect_err("second mutation should be rejected");

    assert!(matches!(err, AppError::Busy(_)));
}

#[tokio::test]
async fn user_search_filters_rows_but_not_the_summary() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_json("u-1", "Sara", 10.5, 3),
            user_json("u-2", "Omar", 4.25, 1),
        ])))
        .mount(&server)
        .await;

    let (state, session) = state_with_session(&server).await;
    let resp = user_service::list_users(
        &state,
        &session,
        UserListQuery {
            search: Some("sara".into()),
        },
    )
    .await?;

    let meta = resp.meta.expect("meta");
    assert_eq!(meta.shown, Some(1));
    assert_eq!(meta.total, Some(2));

    let directory = resp.data.expect("directory");
    assert_eq!(directory.items.len(), 1);
    assert_eq!(directory.summary.total_users, 2);
    assert_eq!(directory.summary.total_orders, 4);
    assert_eq!(directory.summary.total_spent_display, "$14.75");
    Ok(())
}

#[tokio::test]
async fn status_filter_reports_shown_of_total() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            order_json("o-1", "Sara", "confirmed"),
            order_json("o-2", "Omar", "pending"),
            order_json("o-3", "Ali", "confirmed"),
        ])))
        .mount(&server)
        .await;

    let (state, session) = state_with_session(&server).await;
    let resp = order_service::list_orders(
        &state,
        &session,
        OrderListQuery {
            status: Some("confirmed".into()),
            search: None,
        },
    )
    .await?;

    let meta = resp.meta.expect("meta");
    assert_eq!(meta.shown, Some(2));
    assert_eq!(meta.total, Some(3));

    let list = resp.data.expect("order list");
    let ids: Vec<&str> = list.items.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, ["o-1", "o-3"]);
    Ok(())
}

#[tokio::test]
async fn activation_toggle_patches_only_is_active() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/products/p-1"))
        .and(body_json(json!({ "is_active": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "p-1",
            "name": "Units",
            "icon": "📱",
            "type": "telecom",
            "price_usd": 1.5,
            "price_syp": 20000.0,
            "is_active": false
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let (state, session) = state_with_session(&server).await;
    let resp = product_service::update_product(
        &state,
        &session,
        "p-1",
        ProductPatch {
            price_usd: None,
            price_syp: None,
            is_active: Some(false),
        },
    )
    .await?;

    let list = resp.data.expect("product list");
    assert!(!list.items[0].is_active);
    Ok(())
}

#[tokio::test]
async fn inline_edit_patches_exactly_the_three_editable_fields() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/products/p-1"))
        .and(body_json(json!({
            "price_usd": 2.0,
            "price_syp": 26000.0,
            "is_active": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (state, session) = state_with_session(&server).await;
    product_service::update_product(
        &state,
        &session,
        "p-1",
        ProductPatch {
            price_usd: Some(2.0),
            price_syp: Some(26000.0),
            is_active: Some(true),
        },
    )
    .await?;
    Ok(())
}

#[tokio::test]
async fn settings_save_overwrites_the_whole_record() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let payload = json!({
        "bot_token": "123:abc",
        "admin_telegram_id": 987654321,
        "welcome_message": "أهلاً بك",
        "support_phone": null,
        "support_email": null,
        "support_whatsapp": null
    });
    Mock::given(method("PUT"))
        .and(path("/api/settings/"))
        .and(body_json(payload.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/settings/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let (state, session) = state_with_session(&server).await;
    let settings: BotSettings = serde_json::from_value(payload)?;
    let resp = settings_service::save_settings(&state, &session, settings).await?;

    let saved = resp.data.expect("settings");
    assert_eq!(saved.bot_token.as_deref(), Some("123:abc"));
    assert!(saved.support_phone.is_none());
    Ok(())
}

#[tokio::test]
async fn dashboard_serves_the_cached_snapshot_on_repeat_views() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/statistics/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_users": 12,
            "total_orders": 40,
            "pending_orders": 3,
            "total_revenue_usd": 99.5
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            order_json("o-1", "Sara", "pending"),
            order_json("o-2", "Omar", "pending"),
            order_json("o-3", "Ali", "pending"),
            order_json("o-4", "Lina", "pending"),
            order_json("o-5", "Nour", "pending"),
            order_json("o-6", "Ziad", "pending"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (state, session) = state_with_session(&server).await;

    let first = dashboard_service::dashboard_view(&state, &session).await?;
    let view = first.data.expect("dashboard view");
    assert_eq!(view.statistics.total_users, 12);
    assert_eq!(view.recent_orders.len(), 5);

    // second view must not hit the backend again; expect(1) verifies on drop
    let second = dashboard_service::dashboard_view(&state, &session).await?;
    let cached = second.data.expect("dashboard view");
    assert_eq!(cached.refreshed_at, view.refreshed_at);
    Ok(())
}

#[tokio::test]
async fn stale_session_is_evicted_when_backend_rejects_its_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/statistics/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "token expired" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (state, session) = state_with_stale_session(&server).await;
    let err = extract_session(&state, &session.id.to_string())
        .await
        .expect_err("revoked token should reject the request");

    assert!(matches!(err, AppError::Unauthorized(_)));
    assert!(state.sessions.resolve(session.id).await.is_none());
}

#[tokio::test]
async fn stale_session_is_refreshed_by_a_successful_probe() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/statistics/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let (state, session) = state_with_stale_session(&server).await;
    let AdminSession(extracted) = extract_session(&state, &session.id.to_string())
        .await
        .expect("valid token should pass");
    assert_eq!(extracted.backend_token, "backend-token");

    let refreshed = state.sessions.resolve(session.id).await.expect("session kept");
    assert!(refreshed.last_validated > session.last_validated);
}

#[tokio::test]
async fn probe_outage_does_not_block_the_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/statistics/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "boom" })))
        .mount(&server)
        .await;

    let (state, session) = state_with_stale_session(&server).await;
    extract_session(&state, &session.id.to_string())
        .await
        .expect("backend trouble surfaces in the request itself");
    assert!(state.sessions.resolve(session.id).await.is_some());
}

#[tokio::test]
async fn malformed_and_unknown_bearers_are_rejected() {
    let server = MockServer::start().await;
    let state = AppState::new(test_config(server.uri()));

    let err = extract_session(&state, "not-a-uuid")
        .await
        .expect_err("garbage bearer");
    assert!(matches!(err, AppError::Unauthorized(_)));

    let err = extract_session(&state, &Uuid::new_v4().to_string())
        .await
        .expect_err("unknown session id");
    assert!(matches!(err, AppError::Unauthorized(_)));

    let request = Request::builder().uri("/api/dashboard").body(()).expect("request");
    let (mut parts, _) = request.into_parts();
    let err = AdminSession::from_request_parts(&mut parts, &state)
        .await
        .expect_err("missing header");
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn garbled_success_body_reads_as_an_upstream_fault() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let (state, session) = state_with_session(&server).await;
    let err = order_service::list_orders(&state, &session, OrderListQuery::default())
        .await
        .expect_err("unparseable body should fail");

    assert!(
        matches!(&err, AppError::Upstream { status: 200, detail } if detail.contains("invalid backend response")),
        "got {err:?}"
    );
}
