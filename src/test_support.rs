//! Shared builders for unit tests

use crate::api_client::ApiClient;
use crate::configuration::{ApiSettings, FixtureSettings};
use crate::domain::Credentials;
use secrecy::Secret;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_EMAIL: &str = "superadmin@example.com";
pub const TEST_PASSWORD: &str = "correct-horse-battery-staple";

pub fn api_settings(base_url: &str) -> ApiSettings {
    ApiSettings {
        base_url: base_url.to_string(),
        api_key: Secret::new(TEST_API_KEY.into()),
        origin: "https://admin.example.com".into(),
        referer: "https://admin.example.com/".into(),
        user_agent: "scenario-suite-tests".into(),
        accept_language: "en-US".into(),
        timeout_milliseconds: Some(200),
    }
}

pub fn api_client_for(base_url: &str) -> ApiClient {
    api_settings(base_url).client().unwrap()
}

pub fn test_credentials() -> Credentials {
    Credentials {
        email: TEST_EMAIL.into(),
        password: Secret::new(TEST_PASSWORD.into()),
    }
}

pub fn fixture_settings() -> FixtureSettings {
    FixtureSettings {
        existing_email: TEST_EMAIL.into(),
        super_admin_client_id: 1,
        active_client_id: 12,
        inactive_client_id: 1087,
        unknown_client_id: 999999,
    }
}

pub fn valid_login_body(token: &str) -> serde_json::Value {
    serde_json::json!({
        "auth_token": token,
        "user": { "Email": TEST_EMAIL },
        "role": "Super admin",
        "expires_in": 3600
    })
}
