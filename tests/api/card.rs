use crate::helpers::spawn_platform;
use claims::assert_matches;
use serde_json::json;
use sovpay_api_suite::constants::{CARD_LIMIT_EXCEEDED_MESSAGE, ISSUE_CARD_PATH};
use sovpay_api_suite::runner::Verdict;
use sovpay_api_suite::scenarios::{
    IssueCardBeyondCardLimit, IssueCardForInactiveClient, IssueCardForUnknownClient,
    IssueCardWithDuplicateEmail, IssueCardWithMalformedDateOfBirth, IssueCardWithMissingFields,
    IssueCardWithoutAuthorization,
};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn an_inactive_client_cannot_issue_cards() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_all(&platform.server).await;
    // Act
    let report = platform.run_one(IssueCardForInactiveClient).await;
    // Assert
    assert_eq!(report.verdict, Verdict::Pass);
}

#[tokio::test]
async fn an_inactive_client_rejection_may_come_as_a_status() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_login(&platform.server).await;
    Mock::given(method("POST"))
        .and(path(ISSUE_CARD_PATH))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({})))
        .mount(&platform.server)
        .await;
    // Act
    let report = platform.run_one(IssueCardForInactiveClient).await;
    // Assert
    assert_eq!(report.verdict, Verdict::Pass);
}

#[tokio::test]
async fn an_inactive_client_rejection_with_another_message_fails() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_login(&platform.server).await;
    Mock::given(method("POST"))
        .and(path(ISSUE_CARD_PATH))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Client is suspended" })),
        )
        .mount(&platform.server)
        .await;
    // Act
    let report = platform.run_one(IssueCardForInactiveClient).await;
    // Assert
    assert_matches!(report.verdict, Verdict::Fail(_));
}

#[tokio::test]
async fn the_card_limit_is_enforced() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_all(&platform.server).await;
    // Act
    let report = platform.run_one(IssueCardBeyondCardLimit).await;
    // Assert
    assert_eq!(report.verdict, Verdict::Pass);
}

#[tokio::test]
async fn issuing_a_card_within_the_limit_fails_the_limit_scenario() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_login(&platform.server).await;
    Mock::given(method("POST"))
        .and(path(ISSUE_CARD_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "message": "Card issued" })),
        )
        .mount(&platform.server)
        .await;
    // Act
    let report = platform.run_one(IssueCardBeyondCardLimit).await;
    // Assert
    assert_matches!(report.verdict, Verdict::Fail(_));
}

#[tokio::test]
async fn the_limit_message_must_match_exactly() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_login(&platform.server).await;
    Mock::given(method("POST"))
        .and(path(ISSUE_CARD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": CARD_LIMIT_EXCEEDED_MESSAGE.to_lowercase()
        })))
        .mount(&platform.server)
        .await;
    // Act
    let report = platform.run_one(IssueCardBeyondCardLimit).await;
    // Assert
    assert_matches!(report.verdict, Verdict::Fail(_));
}

#[tokio::test]
async fn an_incomplete_card_request_is_rejected() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_all(&platform.server).await;
    // Act
    let report = platform.run_one(IssueCardWithMissingFields).await;
    // Assert
    assert_eq!(report.verdict, Verdict::Pass);
}

#[tokio::test]
async fn an_incomplete_card_request_may_be_flagged_instead() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_login(&platform.server).await;
    Mock::given(method("POST"))
        .and(path(ISSUE_CARD_PATH))
        .and(body_partial_json(json!({ "FirstName": "Automation", "LastName": "card" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "message": "Email is required" })),
        )
        .expect(1)
        .mount(&platform.server)
        .await;
    // Act
    let report = platform.run_one(IssueCardWithMissingFields).await;
    // Assert
    assert_eq!(report.verdict, Verdict::Pass);
}

#[tokio::test]
async fn anonymous_card_issuance_is_unauthorized() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_endpoints(&platform.server).await;
    // Act
    let report = platform.run_one(IssueCardWithoutAuthorization).await;
    // Assert
    assert_eq!(report.verdict, Verdict::Pass);
}

#[tokio::test]
async fn an_unknown_client_is_reported() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_all(&platform.server).await;
    // Act
    let report = platform.run_one(IssueCardForUnknownClient).await;
    // Assert
    assert_eq!(report.verdict, Verdict::Pass);
}

#[tokio::test]
async fn an_unknown_client_flagged_with_a_matching_message_passes() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_login(&platform.server).await;
    Mock::given(method("POST"))
        .and(path(ISSUE_CARD_PATH))
        .and(body_partial_json(json!({ "ClientId": 999999 })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "message": "CLIENT NOT FOUND" })),
        )
        .expect(1)
        .mount(&platform.server)
        .await;
    // Act
    let report = platform.run_one(IssueCardForUnknownClient).await;
    // Assert
    assert_eq!(report.verdict, Verdict::Pass);
}

#[tokio::test]
async fn an_unknown_client_flagged_with_an_unrelated_message_fails() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_login(&platform.server).await;
    Mock::given(method("POST"))
        .and(path(ISSUE_CARD_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "message": "Try again later" })),
        )
        .mount(&platform.server)
        .await;
    // Act
    let report = platform.run_one(IssueCardForUnknownClient).await;
    // Assert
    assert_matches!(report.verdict, Verdict::Fail(_));
}

#[tokio::test]
async fn a_duplicate_cardholder_email_is_refused() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_all(&platform.server).await;
    // Act
    let report = platform.run_one(IssueCardWithDuplicateEmail).await;
    // Assert
    assert_eq!(report.verdict, Verdict::Pass);
}

#[tokio::test]
async fn a_duplicate_cardholder_email_may_be_a_conflict_status() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_login(&platform.server).await;
    Mock::given(method("POST"))
        .and(path(ISSUE_CARD_PATH))
        .respond_with(ResponseTemplate::new(409))
        .mount(&platform.server)
        .await;
    // Act
    let report = platform.run_one(IssueCardWithDuplicateEmail).await;
    // Assert
    assert_eq!(report.verdict, Verdict::Pass);
}

#[tokio::test]
async fn a_malformed_date_of_birth_is_refused() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_all(&platform.server).await;
    // Act
    let report = platform.run_one(IssueCardWithMalformedDateOfBirth).await;
    // Assert
    assert_eq!(report.verdict, Verdict::Pass);
    let requests = platform.server.received_requests().await.unwrap();
    let card = requests
        .iter()
        .find(|r| r.url.path() == ISSUE_CARD_PATH)
        .expect("No card request was sent.");
    let body: serde_json::Value = serde_json::from_slice(&card.body).unwrap();
    assert_eq!(body["DateOfBirth"], "05-02-2007");
}

#[tokio::test]
async fn a_malformed_date_that_gets_accepted_fails() {
    // Arrange
    let platform = spawn_platform().await;
    platform.fake.mount_login(&platform.server).await;
    Mock::given(method("POST"))
        .and(path(ISSUE_CARD_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "message": "Card issued" })),
        )
        .mount(&platform.server)
        .await;
    // Act
    let report = platform.run_one(IssueCardWithMalformedDateOfBirth).await;
    // Assert
    assert_matches!(report.verdict, Verdict::Fail(_));
}
