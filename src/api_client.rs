use crate::configuration::ApiSettings;
use crate::constants::{
    ADD_CLIENT_PATH, API_KEY_HEADER, CREATE_UPDATE_SUPER_ADMIN_PATH, ISSUE_CARD_PATH, LOGIN_PATH,
};
use crate::session::SessionToken;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue,
    ORIGIN, REFERER, USER_AGENT,
};
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{Span, field::display};

/// The four platform operations the suite exercises.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    CreateUpdateSuperAdmin,
    AddClient,
    IssueCard,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Login => LOGIN_PATH,
            Endpoint::CreateUpdateSuperAdmin => CREATE_UPDATE_SUPER_ADMIN_PATH,
            Endpoint::AddClient => ADD_CLIENT_PATH,
            Endpoint::IssueCard => ISSUE_CARD_PATH,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("Failed to send a request to {url}.")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to read the response body from {url}.")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("The response from {url} is not valid JSON: {reason}")]
    NotJson { url: String, reason: String },
    #[error("`{0}` cannot be used as a request header.")]
    InvalidHeader(String),
    #[error("Failed to build the HTTP client.")]
    Client(#[source] reqwest::Error),
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, TransportError> {
    HeaderValue::from_str(value).map_err(|_| TransportError::InvalidHeader(name.to_string()))
}

/// Header template shared by every request of a run.
///
/// Per-request changes are applied to a copy through [`RequestFixture::layered`],
/// so the template itself never changes after construction.
#[derive(Clone, Debug)]
pub struct RequestFixture {
    headers: HeaderMap,
}

impl RequestFixture {
    pub fn new(settings: &ApiSettings) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(
            ACCEPT_LANGUAGE,
            header_value(ACCEPT_LANGUAGE.as_str(), &settings.accept_language)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ORIGIN, header_value(ORIGIN.as_str(), &settings.origin)?);
        headers.insert(REFERER, header_value(REFERER.as_str(), &settings.referer)?);
        headers.insert(
            USER_AGENT,
            header_value(USER_AGENT.as_str(), &settings.user_agent)?,
        );

        let mut api_key = header_value(API_KEY_HEADER, settings.api_key.expose_secret())?;
        api_key.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);

        Ok(Self { headers })
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A copy of the template with `overrides` applied on top.
    pub fn layered(&self, overrides: &RequestOverrides) -> Result<HeaderMap, TransportError> {
        let mut headers = self.headers.clone();
        for (name, value) in &overrides.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| TransportError::InvalidHeader(name.to_string()))?;
            headers.insert(header_name, header_value(name, value)?);
        }
        if let Some(token) = &overrides.bearer {
            let mut authorization = header_value(
                AUTHORIZATION.as_str(),
                &format!("Bearer {}", token.expose_secret()),
            )?;
            authorization.set_sensitive(true);
            headers.insert(AUTHORIZATION, authorization);
        }
        Ok(headers)
    }
}

/// Per-request additions on top of the [`RequestFixture`].
#[derive(Clone, Debug, Default)]
pub struct RequestOverrides {
    bearer: Option<SessionToken>,
    headers: Vec<(&'static str, String)>,
}

impl RequestOverrides {
    /// Send the template headers unchanged.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn bearer(token: &SessionToken) -> Self {
        Self::default().with_bearer(token)
    }

    pub fn with_bearer(mut self, token: &SessionToken) -> Self {
        self.bearer = Some(token.clone());
        self
    }

    /// Replace (or add) a header. Names must be lowercase.
    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }
}

/// Status and body of one platform call.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    url: String,
    status: StatusCode,
    text: String,
    body: Result<Value, String>,
}

impl ApiResponse {
    pub fn new(url: impl Into<String>, status: StatusCode, text: impl Into<String>) -> Self {
        let text = text.into();
        let body = serde_json::from_str::<Value>(&text).map_err(|e| e.to_string());
        Self {
            url: url.into(),
            status,
            text,
            body,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The parsed body, if the platform answered with JSON.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref().ok()
    }

    pub fn json(&self) -> Result<&Value, TransportError> {
        self.body.as_ref().map_err(|reason| TransportError::NotJson {
            url: self.url.clone(),
            reason: reason.clone(),
        })
    }

    /// Pretty-printed JSON, or the raw text when the body is not JSON.
    pub fn pretty_body(&self) -> String {
        self.body()
            .and_then(|body| serde_json::to_string_pretty(body).ok())
            .unwrap_or_else(|| self.text.clone())
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http_client: Client,
    fixture: RequestFixture,
}

impl ApiClient {
    pub fn new(
        base_url: String,
        fixture: RequestFixture,
        timeout: Option<std::time::Duration>,
    ) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(TransportError::Client)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            fixture,
        })
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    pub fn fixture(&self) -> &RequestFixture {
        &self.fixture
    }

    #[tracing::instrument(
        name = "Calling platform endpoint",
        skip(self, body, overrides),
        fields(url = tracing::field::Empty, status = tracing::field::Empty)
    )]
    pub async fn post<Body>(
        &self,
        endpoint: Endpoint,
        body: &Body,
        overrides: &RequestOverrides,
    ) -> Result<ApiResponse, TransportError>
    where
        Body: serde::Serialize + ?Sized,
    {
        let url = self.url(endpoint);
        Span::current().record("url", display(&url));
        let headers = self.fixture.layered(overrides)?;

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|source| {
                tracing::error!("Failed to reach the platform: {:?}", source);
                TransportError::Request {
                    url: url.clone(),
                    source,
                }
            })?;
        let status = response.status();
        Span::current().record("status", status.as_u16());

        let text = response
            .text()
            .await
            .map_err(|source| TransportError::Body {
                url: url.clone(),
                source,
            })?;
        tracing::debug!(body = %text, "Received platform response");

        Ok(ApiResponse::new(url, status, text))
    }

    pub async fn post_login<Body>(
        &self,
        body: &Body,
        overrides: &RequestOverrides,
    ) -> Result<ApiResponse, TransportError>
    where
        Body: serde::Serialize + ?Sized,
    {
        self.post(Endpoint::Login, body, overrides).await
    }

    pub async fn post_create_update_super_admin<Body>(
        &self,
        body: &Body,
        overrides: &RequestOverrides,
    ) -> Result<ApiResponse, TransportError>
    where
        Body: serde::Serialize + ?Sized,
    {
        self.post(Endpoint::CreateUpdateSuperAdmin, body, overrides)
            .await
    }

    pub async fn post_add_client<Body>(
        &self,
        body: &Body,
        overrides: &RequestOverrides,
    ) -> Result<ApiResponse, TransportError>
    where
        Body: serde::Serialize + ?Sized,
    {
        self.post(Endpoint::AddClient, body, overrides).await
    }

    pub async fn post_issue_card<Body>(
        &self,
        body: &Body,
        overrides: &RequestOverrides,
    ) -> Result<ApiResponse, TransportError>
    where
        Body: serde::Serialize + ?Sized,
    {
        self.post(Endpoint::IssueCard, body, overrides).await
    }
}
