//! The scenario catalogue, one module per platform endpoint.
mod card;
mod client;
mod login;
mod super_admin;

pub use card::*;
pub use client::*;
pub use login::*;
pub use super_admin::*;

use crate::api_client::ApiResponse;
use crate::runner::Scenario;

/// Every scenario, in the order it runs.
///
/// Login scenarios come first so that the successful one seeds the session
/// token. Later scenarios still log in on their own if it did not.
pub fn catalogue() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(LoginWithInvalidEmail),
        Box::new(LoginWithInvalidPassword),
        Box::new(LoginWithMissingCredentials),
        Box::new(LoginWithInvalidApiKey),
        Box::new(LoginWithValidCredentials),
        Box::new(CreateSuperAdmin),
        Box::new(CreateSuperAdminWithMissingFields),
        Box::new(CreateSuperAdminWithDuplicateEmail),
        Box::new(CreateSuperAdminWithoutAuthorization),
        Box::new(AddClient),
        Box::new(AddClientWithMissingFields),
        Box::new(AddClientWithDuplicateEmail),
        Box::new(AddClientWithoutAuthorization),
        Box::new(IssueCardForInactiveClient),
        Box::new(IssueCardBeyondCardLimit),
        Box::new(IssueCardWithMissingFields),
        Box::new(IssueCardWithoutAuthorization),
        Box::new(IssueCardForUnknownClient),
        Box::new(IssueCardWithDuplicateEmail),
        Box::new(IssueCardWithMalformedDateOfBirth),
    ]
}

fn log_response(what: &str, response: &ApiResponse) {
    tracing::info!(
        status = response.status().as_u16(),
        body = %response.pretty_body(),
        "{} response",
        what
    );
}
