use crate::api_client::RequestOverrides;
use crate::constants::{
    API_KEY_HEADER, INVALID_API_KEY, MIN_TOKEN_LENGTH, SUPER_ADMIN_ROLE, UNKNOWN_LOGIN_EMAIL,
    WRONG_PASSWORD,
};
use crate::domain::LoginRequest;
use crate::outcome::{AssertionMismatch, BodyCheck, OutcomeClass, OutcomePolicy};
use crate::runner::{Scenario, ScenarioContext, ScenarioError};
use crate::scenarios::log_response;
use crate::session::extract_token;
use secrecy::ExposeSecret;
use serde_json::json;

pub struct LoginWithInvalidEmail;

#[async_trait::async_trait]
impl Scenario for LoginWithInvalidEmail {
    fn name(&self) -> &'static str {
        "login with invalid email"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let request = LoginRequest {
            email: UNKNOWN_LOGIN_EMAIL,
            password: ctx.credentials().password.expose_secret(),
        };
        let response = ctx
            .api_client()
            .post_login(&request, &RequestOverrides::none())
            .await?;
        OutcomePolicy::invalid_credentials().check(&response)?;
        Ok(())
    }
}

pub struct LoginWithInvalidPassword;

#[async_trait::async_trait]
impl Scenario for LoginWithInvalidPassword {
    fn name(&self) -> &'static str {
        "login with invalid password"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let request = LoginRequest {
            email: &ctx.credentials().email,
            password: WRONG_PASSWORD,
        };
        let response = ctx
            .api_client()
            .post_login(&request, &RequestOverrides::none())
            .await?;
        OutcomePolicy::invalid_credentials().check(&response)?;
        Ok(())
    }
}

pub struct LoginWithMissingCredentials;

#[async_trait::async_trait]
impl Scenario for LoginWithMissingCredentials {
    fn name(&self) -> &'static str {
        "login with missing credentials"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let response = ctx
            .api_client()
            .post_login(&json!({}), &RequestOverrides::none())
            .await?;
        OutcomePolicy::missing_required_fields()
            .with_error_body(BodyCheck::Present("/errors/Email"))
            .with_error_body(BodyCheck::Present("/errors/Password"))
            .with_error_body(BodyCheck::Equals("/status", json!(400)))
            .with_error_body(BodyCheck::Present("/title"))
            .with_error_body(BodyCheck::Present("/traceId"))
            .check(&response)?;
        Ok(())
    }
}

/// Either outcome passes. Acceptance of a bogus key is recorded as an annotation.
pub struct LoginWithInvalidApiKey;

#[async_trait::async_trait]
impl Scenario for LoginWithInvalidApiKey {
    fn name(&self) -> &'static str {
        "login with invalid API key"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let overrides = RequestOverrides::none().with_header(API_KEY_HEADER, INVALID_API_KEY);
        let response = ctx
            .api_client()
            .post_login(&ctx.credentials().login_request(), &overrides)
            .await?;
        tracing::info!(
            status = response.status().as_u16(),
            "Login answered a request carrying an invalid API key"
        );
        let class = OutcomePolicy::any_outcome(vec![BodyCheck::Present("/auth_token")])
            .check(&response)?;
        // Any 200 carrying a token means the key was not enforced
        if !matches!(class, OutcomeClass::StatusError(_)) {
            ctx.annotate("API accepts invalid API keys - security concern");
        }
        Ok(())
    }
}

/// Seeds the run's session token for every later scenario.
pub struct LoginWithValidCredentials;

#[async_trait::async_trait]
impl Scenario for LoginWithValidCredentials {
    fn name(&self) -> &'static str {
        "login with valid credentials"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError> {
        let response = ctx
            .api_client()
            .post_login(&ctx.credentials().login_request(), &RequestOverrides::none())
            .await?;
        OutcomePolicy::successful_creation(vec![
            BodyCheck::LongerThan("/auth_token", MIN_TOKEN_LENGTH),
            BodyCheck::Equals("/user/Email", json!(ctx.credentials().email)),
            BodyCheck::Equals("/role", json!(SUPER_ADMIN_ROLE)),
            BodyCheck::Present("/expires_in"),
        ])
        .check(&response)?;

        let token = extract_token(&response)
            .map_err(|e| AssertionMismatch::new(&response, e.to_string()))?;
        tracing::info!("Token obtained: {}", token.preview());
        ctx.session().set_token(token);
        Ok(())
    }
}
