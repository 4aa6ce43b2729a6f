use crate::api_client::{ApiClient, ApiResponse, RequestOverrides, TransportError};
use crate::constants::{MIN_TOKEN_LENGTH, TOKEN_PREVIEW_LENGTH};
use crate::domain::Credentials;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, Secret};

/// Bearer credential returned by a successful login.
///
/// Only constructed through [`SessionToken::parse`], so a token that exists
/// is never empty and always longer than [`MIN_TOKEN_LENGTH`] characters.
#[derive(Clone, Debug)]
pub struct SessionToken(Secret<String>);

impl SessionToken {
    pub fn parse(s: String) -> Result<SessionToken, String> {
        let length = s.chars().count();
        if s.trim().is_empty() {
            Err("A session token cannot be empty.".to_string())
        } else if length <= MIN_TOKEN_LENGTH {
            Err(format!(
                "A session token must be longer than {} characters, got {}.",
                MIN_TOKEN_LENGTH, length
            ))
        } else {
            Ok(Self(Secret::new(s)))
        }
    }

    /// The first few characters, safe to put in a log line.
    pub fn preview(&self) -> String {
        let head: String = self
            .0
            .expose_secret()
            .chars()
            .take(TOKEN_PREVIEW_LENGTH)
            .collect();
        format!("{}...", head)
    }
}

impl ExposeSecret<String> for SessionToken {
    fn expose_secret(&self) -> &String {
        self.0.expose_secret()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AuthFailure {
    #[error("Login was rejected with status {status}.")]
    Rejected { status: u16 },
    #[error("Login did not return a usable token: {0}")]
    UnusableToken(String),
}

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    AuthFailure(#[from] AuthFailure),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Pull the `auth_token` out of a login response.
pub fn extract_token(response: &ApiResponse) -> Result<SessionToken, AuthFailure> {
    let raw = response
        .body()
        .and_then(|body| body.get("auth_token"))
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| {
            AuthFailure::UnusableToken("the response carries no `auth_token`.".to_string())
        })?;
    SessionToken::parse(raw.to_string()).map_err(AuthFailure::UnusableToken)
}

/// Run-scoped authentication state.
///
/// Scenarios borrow it mutably one at a time, which keeps the
/// "login before authorized calls" ordering without any locking.
#[derive(Debug, Default)]
pub struct SessionState {
    token: Option<SessionToken>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    pub fn set_token(&mut self, token: SessionToken) {
        self.token = Some(token);
    }

    /// Return the cached token, logging in first if there is none yet.
    #[tracing::instrument(name = "Ensuring a session token", skip_all)]
    pub async fn ensure_token(
        &mut self,
        api_client: &ApiClient,
        credentials: &Credentials,
    ) -> Result<SessionToken, SessionError> {
        if let Some(token) = &self.token {
            tracing::debug!("Token available: {}", token.preview());
            return Ok(token.clone());
        }

        tracing::info!("Token not available, attempting to login...");
        let response = api_client
            .post_login(&credentials.login_request(), &RequestOverrides::none())
            .await?;
        if response.status() != StatusCode::OK {
            tracing::warn!(
                status = response.status().as_u16(),
                "Login failed while obtaining a session token"
            );
            return Err(AuthFailure::Rejected {
                status: response.status().as_u16(),
            }
            .into());
        }

        let token = extract_token(&response)?;
        tracing::info!("Token obtained: {}", token.preview());
        self.set_token(token.clone());
        Ok(token)
    }
}
