use crate::api_client::RequestOverrides;
use crate::constants::SUPER_ADMIN_ROLE;
use crate::domain::{SuperAdmin, super_admin_email};
use crate::outcome::{BodyCheck, MessageMatch, OutcomePolicy};
use crate::runner::{Scenario, ScenarioContext, ScenarioError};
use crate::scenarios::log_response;
use serde_json::json;

pub struct CreateSuperAdmin;

#[async_trait::async_trait]
impl Scenario for CreateSuperAdmin {
    fn name(&self) -> &'static str {
        "create super admin"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let token = ctx.token().await?;
        let admin = SuperAdmin::fixture(ctx.fixtures().super_admin_client_id, super_admin_email());
        let response = ctx
            .api_client()
            .post_create_update_super_admin(&admin, &RequestOverrides::bearer(&token))
            .await?;
        OutcomePolicy::successful_creation(vec![BodyCheck::Matches(
            "/message",
            MessageMatch::contains("Success"),
        )])
        .check(&response)?;
        Ok(())
    }
}

pub struct CreateSuperAdminWithMissingFields;

#[async_trait::async_trait]
impl Scenario for CreateSuperAdminWithMissingFields {
    fn name(&self) -> &'static str {
        "create super admin with missing fields"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let token = ctx.token().await?;
        let incomplete = json!({
            "ClientId": ctx.fixtures().super_admin_client_id,
            "Role": SUPER_ADMIN_ROLE,
        });
        let response = ctx
            .api_client()
            .post_create_update_super_admin(&incomplete, &RequestOverrides::bearer(&token))
            .await?;
        OutcomePolicy::missing_required_fields().check(&response)?;
        Ok(())
    }
}

pub struct CreateSuperAdminWithDuplicateEmail;

#[async_trait::async_trait]
impl Scenario for CreateSuperAdminWithDuplicateEmail {
    fn name(&self) -> &'static str {
        "create super admin with duplicate email"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let token = ctx.token().await?;
        let duplicate = SuperAdmin::fixture(
            ctx.fixtures().super_admin_client_id,
            ctx.fixtures().existing_email.clone(),
        );
        let response = ctx
            .api_client()
            .post_create_update_super_admin(&duplicate, &RequestOverrides::bearer(&token))
            .await?;
        log_response("Duplicate super admin", &response);
        OutcomePolicy::duplicate_conflict(&[400, 409]).check(&response)?;
        Ok(())
    }
}

pub struct CreateSuperAdminWithoutAuthorization;

#[async_trait::async_trait]
impl Scenario for CreateSuperAdminWithoutAuthorization {
    fn name(&self) -> &'static str {
        "create super admin without authorization"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let admin = SuperAdmin::fixture(ctx.fixtures().super_admin_client_id, super_admin_email());
        let response = ctx
            .api_client()
            .post_create_update_super_admin(&admin, &RequestOverrides::none())
            .await?;
        OutcomePolicy::unauthorized(&[401, 403]).check(&response)?;
        Ok(())
    }
}
