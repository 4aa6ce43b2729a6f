use crate::api_client::RequestOverrides;
use crate::domain::{NewClient, client_email};
use crate::outcome::{BodyCheck, OutcomePolicy};
use crate::runner::{Scenario, ScenarioContext, ScenarioError};
use crate::scenarios::log_response;
use serde_json::json;

pub struct AddClient;

#[async_trait::async_trait]
impl Scenario for AddClient {
    fn name(&self) -> &'static str {
        "add client"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let token = ctx.token().await?;
        let client = NewClient::fixture(client_email());
        let response = ctx
            .api_client()
            .post_add_client(&client, &RequestOverrides::bearer(&token))
            .await?;
        log_response("Add client", &response);
        // The new client's id comes back as `payload.item2`
        OutcomePolicy::successful_creation(vec![
            BodyCheck::Equals("/success", json!(true)),
            BodyCheck::Equals("/message", json!("Success")),
            BodyCheck::Present("/payload/item2"),
        ])
        .check(&response)?;
        Ok(())
    }
}

pub struct AddClientWithMissingFields;

#[async_trait::async_trait]
impl Scenario for AddClientWithMissingFields {
    fn name(&self) -> &'static str {
        "add client with missing fields"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let token = ctx.token().await?;
        let response = ctx
            .api_client()
            .post_add_client(
                &json!({ "ClientName": "Client" }),
                &RequestOverrides::bearer(&token),
            )
            .await?;
        log_response("Missing fields", &response);
        OutcomePolicy::expect_status(&[400])
            .with_error_body(BodyCheck::AnyOf(vec![
                BodyCheck::Present("/errors"),
                BodyCheck::Equals("/success", json!(false)),
            ]))
            .check(&response)?;
        Ok(())
    }
}

/// Registers a fresh client, then tries the same e-mail again.
pub struct AddClientWithDuplicateEmail;

#[async_trait::async_trait]
impl Scenario for AddClientWithDuplicateEmail {
    fn name(&self) -> &'static str {
        "add client with duplicate email"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let token = ctx.token().await?;
        let overrides = RequestOverrides::bearer(&token);
        let email = client_email();

        let first = ctx
            .api_client()
            .post_add_client(&NewClient::fixture(email.clone()), &overrides)
            .await?;
        log_response("First client creation", &first);
        OutcomePolicy::successful_creation(vec![])
            .tolerate_body_flag()
            .check(&first)?;

        let second = ctx
            .api_client()
            .post_add_client(&NewClient::fixture(email), &overrides)
            .await?;
        log_response("Duplicate email", &second);
        OutcomePolicy::duplicate_conflict(&[400, 409]).check(&second)?;
        Ok(())
    }
}

pub struct AddClientWithoutAuthorization;

#[async_trait::async_trait]
impl Scenario for AddClientWithoutAuthorization {
    fn name(&self) -> &'static str {
        "add client without authorization"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let response = ctx
            .api_client()
            .post_add_client(&NewClient::fixture(client_email()), &RequestOverrides::none())
            .await?;
        log_response("Unauthorized", &response);
        OutcomePolicy::unauthorized(&[401, 403, 400])
            .tolerate_body_flag()
            .accept_unparseable_ok()
            .check(&response)?;
        Ok(())
    }
}
