use crate::helpers::spawn_platform;
use claims::assert_matches;
use serde_json::json;
use sovpay_api_suite::constants::ADD_CLIENT_PATH;
use sovpay_api_suite::runner::Verdict;
use sovpay_api_suite::scenarios::{
    AddClient, AddClientWithDuplicateEmail, AddClientWithMissingFields,
    AddClientWithoutAuthorization,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn a_new_client_is_onboarded() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_all(&platform.server).await;
    // Act
    let report = platform.run_one(AddClient).await;
    // Assert
    assert_eq!(report.verdict, Verdict::Pass);
}

#[tokio::test]
async fn onboarding_fails_without_a_client_id_in_the_payload() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_login(&platform.server).await;
    Mock::given(method("POST"))
        .and(path(ADD_CLIENT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Success",
            "payload": {}
        })))
        .mount(&platform.server)
        .await;
    // Act
    let report = platform.run_one(AddClient).await;
    // Assert
    assert_matches!(report.verdict, Verdict::Fail(_));
}

#[tokio::test]
async fn an_incomplete_client_is_rejected() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_all(&platform.server).await;
    // Act
    let report = platform.run_one(AddClientWithMissingFields).await;
    // Assert
    assert_eq!(report.verdict, Verdict::Pass);
}

#[tokio::test]
async fn an_incomplete_client_may_be_rejected_with_a_success_flag() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_login(&platform.server).await;
    Mock::given(method("POST"))
        .and(path(ADD_CLIENT_PATH))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "success": false, "message": "Email is required" })),
        )
        .mount(&platform.server)
        .await;
    // Act
    let report = platform.run_one(AddClientWithMissingFields).await;
    // Assert
    assert_eq!(report.verdict, Verdict::Pass);
}

#[tokio::test]
async fn a_repeated_client_email_is_refused() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_all(&platform.server).await;
    // Act
    let report = platform.run_one(AddClientWithDuplicateEmail).await;
    // Assert
    assert_eq!(report.verdict, Verdict::Pass);
    let requests = platform.server.received_requests().await.unwrap();
    let emails: Vec<String> = requests
        .iter()
        .filter(|r| r.url.path() == ADD_CLIENT_PATH)
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["Email"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(emails.len(), 2);
    assert_eq!(emails[0], emails[1]);
    assert!(emails[0].starts_with("Client_automation-"));
}

#[tokio::test]
async fn two_successful_creations_with_one_email_fail_the_scenario() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_login(&platform.server).await;
    Mock::given(method("POST"))
        .and(path(ADD_CLIENT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Success",
            "payload": { "item2": 1 }
        })))
        .expect(2)
        .mount(&platform.server)
        .await;
    // Act
    let report = platform.run_one(AddClientWithDuplicateEmail).await;
    // Assert
    assert_matches!(report.verdict, Verdict::Fail(_));
}

#[tokio::test]
async fn a_flagged_first_creation_still_reaches_the_duplicate_check() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_login(&platform.server).await;
    Mock::given(method("POST"))
        .and(path(ADD_CLIENT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Email already exists"
        })))
        .expect(2)
        .mount(&platform.server)
        .await;
    // Act
    let report = platform.run_one(AddClientWithDuplicateEmail).await;
    // Assert
    assert_eq!(report.verdict, Verdict::Pass);
}

#[tokio::test]
async fn the_duplicate_check_stops_if_the_first_creation_fails() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_login(&platform.server).await;
    Mock::given(method("POST"))
        .and(path(ADD_CLIENT_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&platform.server)
        .await;
    // Act
    let report = platform.run_one(AddClientWithDuplicateEmail).await;
    // Assert
    assert_matches!(report.verdict, Verdict::Fail(_));
}

#[tokio::test]
async fn an_anonymous_client_creation_answered_with_html_passes() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_endpoints(&platform.server).await;
    // Act
    let report = platform.run_one(AddClientWithoutAuthorization).await;
    // Assert
    assert_eq!(report.verdict, Verdict::Pass);
}

#[tokio::test]
async fn an_anonymous_client_creation_may_be_refused_by_status() {
    // Arrange
    let platform = spawn_platform().await;
    for status in [400, 401, 403] {
        platform.server.reset().await;
        Mock::given(method("POST"))
            .and(path(ADD_CLIENT_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&platform.server)
            .await;
        // Act
        let report = platform.run_one(AddClientWithoutAuthorization).await;
        // Assert
        assert_eq!(report.verdict, Verdict::Pass, "status {}", status);
    }
}

#[tokio::test]
async fn an_anonymous_client_creation_that_succeeds_fails() {
    // Arrange
    let platform = spawn_platform().await;
    Mock::given(method("POST"))
        .and(path(ADD_CLIENT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Success",
            "payload": { "item2": 7 }
        })))
        .mount(&platform.server)
        .await;
    // Act
    let report = platform.run_one(AddClientWithoutAuthorization).await;
    // Assert
    assert_matches!(report.verdict, Verdict::Fail(_));
}
