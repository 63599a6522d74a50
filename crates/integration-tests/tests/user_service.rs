//! User service contract tests.

use gateprobe_core::UserId;
use gateprobe_harness::checks::{gateway, users};
use gateprobe_harness::{GatewayClient, HarnessError, Service, fixtures};
use gateprobe_integration_tests::{MockGateway, live_config};
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

fn user_json(id: i32, first_name: &str, email: &str) -> serde_json::Value {
    json!({
        "userId": id,
        "firstName": first_name,
        "lastName": "User",
        "imageUrl": "https://example.com/test.jpg",
        "email": email,
        "phone": "+573001234567"
    })
}

#[tokio::test]
async fn test_create_user_echoes_identifying_fields() {
    let mock = MockGateway::start().await;
    mock.mount_create_echo("/user-service/api/users", 201).await;

    let user = fixtures::sample_user();
    let created = users::create(&mock.client(), &user)
        .await
        .expect("create passes");
    assert_eq!(created.user_id, user.user_id);
    assert_eq!(created.email, user.email);
}

#[tokio::test]
async fn test_create_user_rejects_5xx() {
    let mock = MockGateway::start().await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::path("/user-service/api/users"))
        .respond_with(wiremock::ResponseTemplate::new(500))
        .mount(mock.server())
        .await;

    let err = users::create(&mock.client(), &fixtures::sample_user())
        .await
        .expect_err("500 must not pass");
    assert!(matches!(
        err,
        HarnessError::UnexpectedStatus { status, .. } if status == 500
    ));
}

#[tokio::test]
async fn test_create_user_detects_unechoed_email() {
    let mock = MockGateway::start().await;
    mock.server()
        .register(
            wiremock::Mock::given(wiremock::matchers::method("POST"))
                .and(wiremock::matchers::path("/user-service/api/users"))
                .respond_with(
                    wiremock::ResponseTemplate::new(200)
                        .set_body_json(user_json(100, "Test", "someone.else@example.com")),
                ),
        )
        .await;

    let err = users::create(&mock.client(), &fixtures::sample_user())
        .await
        .expect_err("wrong echo must not pass");
    assert!(matches!(
        err,
        HarnessError::FieldMismatch { field: "email", .. }
    ));
}

#[tokio::test]
async fn test_list_users_returns_collection() {
    let mock = MockGateway::start().await;
    mock.mount_collection(
        "/user-service/api/users",
        json!([
            user_json(1, "Selim", "selim@example.com"),
            user_json(2, "Amine", "amine@example.com"),
        ]),
    )
    .await;

    let listed = users::list_non_empty(&mock.client())
        .await
        .expect("list passes");
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn test_list_users_without_envelope_is_a_failure() {
    let mock = MockGateway::start().await;
    // Raw array instead of the collection envelope
    mock.mount_get_json("/user-service/api/users", 200, json!([])).await;

    let err = users::list(&mock.client()).await.expect_err("no envelope");
    assert!(matches!(err, HarnessError::Decode { .. }));
}

#[tokio::test]
async fn test_empty_user_collection_fails_the_non_empty_check() {
    let mock = MockGateway::start().await;
    mock.mount_collection("/user-service/api/users", json!([])).await;

    let err = users::list_non_empty(&mock.client())
        .await
        .expect_err("empty collection");
    assert!(matches!(err, HarnessError::EmptyCollection { .. }));
}

#[tokio::test]
async fn test_get_user_by_id_echoes_the_id() {
    let mock = MockGateway::start().await;
    mock.mount_get_json(
        "/user-service/api/users/1",
        200,
        user_json(1, "Selim", "selim@example.com"),
    )
    .await;

    let user = users::get_by_id(&mock.client(), UserId::new(1))
        .await
        .expect("get passes");
    assert_eq!(user.user_id, UserId::new(1));
}

#[tokio::test]
async fn test_get_user_with_mismatched_id_is_a_failure() {
    let mock = MockGateway::start().await;
    mock.mount_get_json(
        "/user-service/api/users/1",
        200,
        user_json(99, "Wrong", "wrong@example.com"),
    )
    .await;

    let err = users::get_by_id(&mock.client(), UserId::new(1))
        .await
        .expect_err("id mismatch");
    assert!(matches!(
        err,
        HarnessError::FieldMismatch { field: "userId", .. }
    ));
}

#[tokio::test]
async fn test_update_user_accepts_204() {
    let mock = MockGateway::start().await;
    mock.server()
        .register(
            wiremock::Mock::given(wiremock::matchers::method("PUT"))
                .and(wiremock::matchers::path("/user-service/api/users"))
                .respond_with(wiremock::ResponseTemplate::new(204)),
        )
        .await;

    let status = users::update(&mock.client(), &fixtures::sample_user())
        .await
        .expect("update passes");
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_update_user_rejects_conflict() {
    let mock = MockGateway::start().await;
    mock.server()
        .register(
            wiremock::Mock::given(wiremock::matchers::method("PUT"))
                .and(wiremock::matchers::path("/user-service/api/users"))
                .respond_with(wiremock::ResponseTemplate::new(409)),
        )
        .await;

    let err = users::update(&mock.client(), &fixtures::sample_user())
        .await
        .expect_err("409 must not pass");
    assert!(matches!(err, HarnessError::UnexpectedStatus { .. }));
}

#[tokio::test]
async fn test_user_service_health() {
    let mock = MockGateway::start().await;
    mock.mount_health("/user-service/actuator/health", "UP").await;

    gateway::service_health(&mock.client(), Service::User)
        .await
        .expect("service is healthy");
}

// ============================================================================
// Live deployment tests
// ============================================================================

#[tokio::test]
#[ignore = "requires a deployed gateway (API_GATEWAY_URL)"]
async fn test_live_create_and_fetch_user() {
    let config = live_config();
    let client = GatewayClient::new(&config).expect("client");

    // Unique email per run so re-runs do not trip uniqueness constraints
    let mut user = fixtures::sample_user();
    user.email = format!("gateprobe-{}@example.com", Uuid::new_v4());

    let created = users::create(&client, &user).await.expect("create passes");
    users::get_by_id(&client, created.user_id)
        .await
        .expect("created user is readable");
}

#[tokio::test]
#[ignore = "requires a deployed gateway (API_GATEWAY_URL)"]
async fn test_live_list_users() {
    let config = live_config();
    let client = GatewayClient::new(&config).expect("client");
    users::list_non_empty(&client).await.expect("users exist");
}
