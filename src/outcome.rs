//! Tolerant response classification.
//!
//! The platform signals a failed request either through the status code or
//! through `success: false` on a 200 response. [`classify`] looks at the
//! status first and only then at the body flag. An [`OutcomePolicy`] then
//! decides which of the resulting classes a scenario accepts, and which body
//! shape each accepted branch must carry.

use crate::api_client::ApiResponse;
use regex::Regex;
use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeClass {
    /// 200 without a `success: false` flag.
    Success,
    /// 200 whose JSON body carries `success: false`.
    BodyFlaggedError,
    /// Any status other than 200.
    StatusError(StatusCode),
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeClass::Success => write!(f, "success"),
            OutcomeClass::BodyFlaggedError => write!(f, "body-flagged error"),
            OutcomeClass::StatusError(status) => write!(f, "status error {}", status.as_u16()),
        }
    }
}

pub fn classify(response: &ApiResponse) -> OutcomeClass {
    if response.status() != StatusCode::OK {
        return OutcomeClass::StatusError(response.status());
    }
    match response.body().and_then(|body| body.get("success")) {
        Some(Value::Bool(false)) => OutcomeClass::BodyFlaggedError,
        _ => OutcomeClass::Success,
    }
}

#[derive(Clone, Debug)]
pub enum MessageMatch {
    Exact(String),
    Contains(String),
    Pattern(Regex),
}

impl MessageMatch {
    pub fn exact(text: impl Into<String>) -> Self {
        Self::Exact(text.into())
    }

    pub fn contains(text: impl Into<String>) -> Self {
        Self::Contains(text.into())
    }

    pub fn pattern(regex: &Regex) -> Self {
        Self::Pattern(regex.clone())
    }

    pub fn matches(&self, text: &str) -> bool {
        match self {
            MessageMatch::Exact(expected) => text == expected,
            MessageMatch::Contains(fragment) => text.contains(fragment.as_str()),
            MessageMatch::Pattern(regex) => regex.is_match(text),
        }
    }
}

impl fmt::Display for MessageMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageMatch::Exact(expected) => write!(f, "equal to {:?}", expected),
            MessageMatch::Contains(fragment) => write!(f, "containing {:?}", fragment),
            MessageMatch::Pattern(regex) => write!(f, "matching /{}/", regex.as_str()),
        }
    }
}

/// A shape requirement on a JSON body, addressed by JSON pointer.
#[derive(Clone, Debug)]
pub enum BodyCheck {
    Present(&'static str),
    Equals(&'static str, Value),
    Matches(&'static str, MessageMatch),
    /// Only checked when the field holds a non-empty string.
    MatchesIfPresent(&'static str, MessageMatch),
    /// A string field strictly longer than the given number of characters.
    LongerThan(&'static str, usize),
    AnyOf(Vec<BodyCheck>),
}

impl BodyCheck {
    pub fn verify(&self, body: &Value) -> Result<(), String> {
        match self {
            BodyCheck::Present(pointer) => body
                .pointer(pointer)
                .map(|_| ())
                .ok_or_else(|| format!("`{}` is missing", pointer)),
            BodyCheck::Equals(pointer, expected) => match body.pointer(pointer) {
                Some(actual) if actual == expected => Ok(()),
                Some(actual) => Err(format!(
                    "`{}` is {} instead of {}",
                    pointer, actual, expected
                )),
                None => Err(format!("`{}` is missing", pointer)),
            },
            BodyCheck::Matches(pointer, matcher) => match body.pointer(pointer) {
                Some(Value::String(text)) if matcher.matches(text) => Ok(()),
                Some(actual) => Err(format!(
                    "`{}` is {}, expected a message {}",
                    pointer, actual, matcher
                )),
                None => Err(format!("`{}` is missing", pointer)),
            },
            BodyCheck::MatchesIfPresent(pointer, matcher) => match body.pointer(pointer) {
                None | Some(Value::Null) => Ok(()),
                Some(Value::String(text)) if text.is_empty() || matcher.matches(text) => Ok(()),
                Some(actual) => Err(format!(
                    "`{}` is {}, expected a message {}",
                    pointer, actual, matcher
                )),
            },
            BodyCheck::LongerThan(pointer, length) => match body.pointer(pointer) {
                Some(Value::String(text)) if text.chars().count() > *length => Ok(()),
                Some(actual) => Err(format!(
                    "`{}` is {}, expected a string longer than {} characters",
                    pointer, actual, length
                )),
                None => Err(format!("`{}` is missing", pointer)),
            },
            BodyCheck::AnyOf(alternatives) => {
                let mut reasons = Vec::with_capacity(alternatives.len());
                for alternative in alternatives {
                    match alternative.verify(body) {
                        Ok(()) => return Ok(()),
                        Err(reason) => reasons.push(reason),
                    }
                }
                Err(format!("none of the alternatives hold: {}", reasons.join("; ")))
            }
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("{reason} (observed status {status})")]
pub struct AssertionMismatch {
    pub status: u16,
    pub reason: String,
    /// Response body as received, for diagnostics.
    pub body: String,
}

impl AssertionMismatch {
    pub fn new(response: &ApiResponse, reason: impl Into<String>) -> Self {
        Self {
            status: response.status().as_u16(),
            reason: reason.into(),
            body: response.pretty_body(),
        }
    }
}

/// Error statuses a policy accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusSet {
    AnyOf(Vec<StatusCode>),
    /// Anything but 200.
    AnyError,
}

impl StatusSet {
    pub fn any_of(statuses: &[u16]) -> Self {
        Self::AnyOf(
            statuses
                .iter()
                .filter_map(|status| StatusCode::from_u16(*status).ok())
                .collect(),
        )
    }

    pub fn accepts(&self, status: StatusCode) -> bool {
        match self {
            StatusSet::AnyOf(statuses) => statuses.contains(&status),
            StatusSet::AnyError => status != StatusCode::OK,
        }
    }
}

impl fmt::Display for StatusSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusSet::AnyOf(statuses) => {
                let codes: Vec<String> = statuses
                    .iter()
                    .map(|status| status.as_u16().to_string())
                    .collect();
                write!(f, "{{{}}}", codes.join(", "))
            }
            StatusSet::AnyError => write!(f, "any status other than 200"),
        }
    }
}

/// The outcome class a scenario accepts as passing.
#[derive(Clone, Debug)]
pub struct OutcomePolicy {
    accepted_statuses: StatusSet,
    error_body: Vec<BodyCheck>,
    /// `None` rejects 200 + `success: false`.
    body_flag: Option<Vec<BodyCheck>>,
    /// `None` rejects a plain 200.
    success: Option<Vec<BodyCheck>>,
    accept_unparseable_ok: bool,
}

impl OutcomePolicy {
    /// Accept only the given error statuses, with no body requirements.
    pub fn expect_status(statuses: &[u16]) -> Self {
        Self {
            accepted_statuses: StatusSet::any_of(statuses),
            error_body: Vec::new(),
            body_flag: None,
            success: None,
            accept_unparseable_ok: false,
        }
    }

    /// 400 with either `errors` or a `message` mentioning "Invalid".
    pub fn invalid_credentials() -> Self {
        Self::expect_status(&[400]).with_error_body(BodyCheck::AnyOf(vec![
            BodyCheck::Present("/errors"),
            BodyCheck::Matches("/message", MessageMatch::contains("Invalid")),
        ]))
    }

    /// 400 with an `errors` object.
    pub fn missing_required_fields() -> Self {
        Self::expect_status(&[400]).with_error_body(BodyCheck::Present("/errors"))
    }

    pub fn unauthorized(statuses: &[u16]) -> Self {
        Self::expect_status(statuses)
    }

    /// A plain 200 whose body satisfies every check.
    pub fn successful_creation(checks: Vec<BodyCheck>) -> Self {
        Self {
            accepted_statuses: StatusSet::AnyOf(Vec::new()),
            error_body: Vec::new(),
            body_flag: None,
            success: Some(checks),
            accept_unparseable_ok: false,
        }
    }

    pub fn duplicate_conflict(statuses: &[u16]) -> Self {
        Self::expect_status(statuses).tolerate_body_flag()
    }

    /// Rejected with a specific `message`, on either channel.
    pub fn business_rule_rejection(statuses: &[u16], message: MessageMatch) -> Self {
        Self::expect_status(statuses)
            .with_flagged_message(message.clone())
            .with_error_body(BodyCheck::MatchesIfPresent("/message", message))
    }

    /// Accept every status except 200, and a 200 that passes `success_checks`
    /// whether or not it carries `success: false`.
    pub fn any_outcome(success_checks: Vec<BodyCheck>) -> Self {
        Self {
            accepted_statuses: StatusSet::AnyError,
            error_body: Vec::new(),
            body_flag: Some(success_checks.clone()),
            success: Some(success_checks),
            accept_unparseable_ok: false,
        }
    }

    pub fn with_error_body(mut self, check: BodyCheck) -> Self {
        self.error_body.push(check);
        self
    }

    /// Also accept 200 + `success: false`.
    pub fn tolerate_body_flag(mut self) -> Self {
        self.body_flag.get_or_insert_with(Vec::new);
        self
    }

    /// Accept 200 + `success: false` only when `message` matches.
    pub fn with_flagged_message(mut self, message: MessageMatch) -> Self {
        self.body_flag
            .get_or_insert_with(Vec::new)
            .push(BodyCheck::Matches("/message", message));
        self
    }

    /// Accept a 200 whose body cannot be parsed as JSON.
    pub fn accept_unparseable_ok(mut self) -> Self {
        self.accept_unparseable_ok = true;
        self
    }

    pub fn check(&self, response: &ApiResponse) -> Result<OutcomeClass, AssertionMismatch> {
        let class = classify(response);
        match class {
            OutcomeClass::StatusError(status) => {
                if !self.accepted_statuses.accepts(status) {
                    return Err(AssertionMismatch::new(
                        response,
                        format!(
                            "status {} is outside the accepted set {}",
                            status.as_u16(),
                            self.accepted_statuses
                        ),
                    ));
                }
                self.verify_all(&self.error_body, response)?;
            }
            OutcomeClass::BodyFlaggedError => match &self.body_flag {
                Some(checks) => self.verify_all(checks, response)?,
                None => {
                    return Err(AssertionMismatch::new(
                        response,
                        "the platform answered 200 with `success: false`",
                    ));
                }
            },
            OutcomeClass::Success => {
                if response.body().is_none() && self.accept_unparseable_ok {
                    tracing::info!(
                        body = %response.text(),
                        "Accepting a 200 response that is not JSON"
                    );
                    return Ok(class);
                }
                match &self.success {
                    Some(checks) => self.verify_all(checks, response)?,
                    None => {
                        return Err(AssertionMismatch::new(
                            response,
                            "expected the request to be rejected, but it succeeded",
                        ));
                    }
                }
            }
        }
        Ok(class)
    }

    fn verify_all(
        &self,
        checks: &[BodyCheck],
        response: &ApiResponse,
    ) -> Result<(), AssertionMismatch> {
        if checks.is_empty() {
            return Ok(());
        }
        let body = response
            .body()
            .ok_or_else(|| AssertionMismatch::new(response, "the response body is not JSON"))?;
        for check in checks {
            check
                .verify(body)
                .map_err(|reason| AssertionMismatch::new(response, reason))?;
        }
        Ok(())
    }
}
