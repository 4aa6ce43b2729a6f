use crate::api_client::RequestOverrides;
use crate::constants::{
    CARD_LIMIT_EXCEEDED_MESSAGE, CLIENT_NOT_ACTIVE_MESSAGE, MALFORMED_DATE_OF_BIRTH,
};
use crate::domain::{CardIssuance, cardholder_email};
use crate::outcome::{MessageMatch, OutcomePolicy};
use crate::runner::{Scenario, ScenarioContext, ScenarioError};
use crate::scenarios::log_response;
use regex::{Regex, RegexBuilder};
use serde_json::json;
use std::sync::LazyLock;

static UNKNOWN_CLIENT_MESSAGE: LazyLock<Regex> =
    LazyLock::new(|| message_pattern("client|not found|invalid"));

static DUPLICATE_EMAIL_MESSAGE: LazyLock<Regex> =
    LazyLock::new(|| message_pattern("email|duplicate|already exists"));

static MALFORMED_DATE_MESSAGE: LazyLock<Regex> =
    LazyLock::new(|| message_pattern("date|format|invalid"));

fn message_pattern(pattern: &str) -> Regex {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(regex) => regex,
        Err(err) => panic!("message pattern `{pattern}` is invalid: {err}"),
    }
}

pub struct IssueCardForInactiveClient;

#[async_trait::async_trait]
impl Scenario for IssueCardForInactiveClient {
    fn name(&self) -> &'static str {
        "issue card for inactive client"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let token = ctx.token().await?;
        tracing::info!("Token available before issue card test: {}", token.preview());
        let card = CardIssuance::fixture(ctx.fixtures().inactive_client_id, cardholder_email());
        let response = ctx
            .api_client()
            .post_issue_card(&card, &RequestOverrides::bearer(&token))
            .await?;
        log_response("Issue card", &response);
        OutcomePolicy::business_rule_rejection(
            &[400, 422],
            MessageMatch::exact(CLIENT_NOT_ACTIVE_MESSAGE),
        )
        .check(&response)?;
        Ok(())
    }
}

/// The configured active client is expected to have used up its card quota.
pub struct IssueCardBeyondCardLimit;

#[async_trait::async_trait]
impl Scenario for IssueCardBeyondCardLimit {
    fn name(&self) -> &'static str {
        "issue card beyond card limit"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let token = ctx.token().await?;
        let card = CardIssuance::fixture(ctx.fixtures().active_client_id, cardholder_email());
        let response = ctx
            .api_client()
            .post_issue_card(&card, &RequestOverrides::bearer(&token))
            .await?;
        log_response("Issue card", &response);
        OutcomePolicy::business_rule_rejection(
            &[400, 422],
            MessageMatch::exact(CARD_LIMIT_EXCEEDED_MESSAGE),
        )
        .check(&response)?;
        Ok(())
    }
}

pub struct IssueCardWithMissingFields;

#[async_trait::async_trait]
impl Scenario for IssueCardWithMissingFields {
    fn name(&self) -> &'static str {
        "issue card with missing fields"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let token = ctx.token().await?;
        let incomplete = json!({ "FirstName": "Automation", "LastName": "card" });
        let response = ctx
            .api_client()
            .post_issue_card(&incomplete, &RequestOverrides::bearer(&token))
            .await?;
        log_response("Missing fields card", &response);
        OutcomePolicy::expect_status(&[400, 422])
            .tolerate_body_flag()
            .check(&response)?;
        Ok(())
    }
}

pub struct IssueCardWithoutAuthorization;

#[async_trait::async_trait]
impl Scenario for IssueCardWithoutAuthorization {
    fn name(&self) -> &'static str {
        "issue card without authorization"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let card = CardIssuance::fixture(ctx.fixtures().active_client_id, cardholder_email());
        let response = ctx
            .api_client()
            .post_issue_card(&card, &RequestOverrides::none())
            .await?;
        log_response("Unauthorized card", &response);
        OutcomePolicy::unauthorized(&[401, 403, 400])
            .tolerate_body_flag()
            .accept_unparseable_ok()
            .check(&response)?;
        Ok(())
    }
}

pub struct IssueCardForUnknownClient;

#[async_trait::async_trait]
impl Scenario for IssueCardForUnknownClient {
    fn name(&self) -> &'static str {
        "issue card for unknown client"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let token = ctx.token().await?;
        let card = CardIssuance::fixture(ctx.fixtures().unknown_client_id, cardholder_email());
        let response = ctx
            .api_client()
            .post_issue_card(&card, &RequestOverrides::bearer(&token))
            .await?;
        log_response("Invalid client ID", &response);
        OutcomePolicy::expect_status(&[400, 404, 422])
            .with_flagged_message(MessageMatch::pattern(&UNKNOWN_CLIENT_MESSAGE))
            .check(&response)?;
        Ok(())
    }
}

pub struct IssueCardWithDuplicateEmail;

#[async_trait::async_trait]
impl Scenario for IssueCardWithDuplicateEmail {
    fn name(&self) -> &'static str {
        "issue card with duplicate email"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let token = ctx.token().await?;
        let card = CardIssuance::fixture(
            ctx.fixtures().active_client_id,
            ctx.fixtures().existing_email.clone(),
        );
        let response = ctx
            .api_client()
            .post_issue_card(&card, &RequestOverrides::bearer(&token))
            .await?;
        log_response("Duplicate email card", &response);
        OutcomePolicy::duplicate_conflict(&[400, 409, 422])
            .with_flagged_message(MessageMatch::pattern(&DUPLICATE_EMAIL_MESSAGE))
            .check(&response)?;
        Ok(())
    }
}

pub struct IssueCardWithMalformedDateOfBirth;

#[async_trait::async_trait]
impl Scenario for IssueCardWithMalformedDateOfBirth {
    fn name(&self) -> &'static str {
        "issue card with invalid date format"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let token = ctx.token().await?;
        let card = CardIssuance {
            date_of_birth: MALFORMED_DATE_OF_BIRTH.to_string(),
            ..CardIssuance::fixture(ctx.fixtures().active_client_id, cardholder_email())
        };
        let response = ctx
            .api_client()
            .post_issue_card(&card, &RequestOverrides::bearer(&token))
            .await?;
        log_response("Invalid date format", &response);
        OutcomePolicy::expect_status(&[400, 422])
            .with_flagged_message(MessageMatch::pattern(&MALFORMED_DATE_MESSAGE))
            .check(&response)?;
        Ok(())
    }
}
