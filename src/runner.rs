use crate::api_client::{ApiClient, TransportError};
use crate::configuration::FixtureSettings;
use crate::domain::Credentials;
use crate::outcome::AssertionMismatch;
use crate::session::{AuthFailure, SessionError, SessionState, SessionToken};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

/// One named request/response expectation against the platform.
#[async_trait::async_trait]
pub trait Scenario: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioError>;
}

#[derive(thiserror::Error, Debug)]
pub enum ScenarioError {
    #[error("Could not obtain a session token: {0}")]
    Skipped(#[source] AuthFailure),
    #[error(transparent)]
    Assertion(#[from] AssertionMismatch),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<SessionError> for ScenarioError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::AuthFailure(failure) => ScenarioError::Skipped(failure),
            SessionError::Transport(e) => ScenarioError::Transport(e),
        }
    }
}

/// What a scenario gets to work with while it runs.
pub struct ScenarioContext<'a> {
    api_client: &'a ApiClient,
    session: &'a mut SessionState,
    credentials: &'a Credentials,
    fixtures: &'a FixtureSettings,
    annotations: Vec<String>,
}

impl<'a> ScenarioContext<'a> {
    pub fn new(
        api_client: &'a ApiClient,
        session: &'a mut SessionState,
        credentials: &'a Credentials,
        fixtures: &'a FixtureSettings,
    ) -> Self {
        Self {
            api_client,
            session,
            credentials,
            fixtures,
            annotations: Vec::new(),
        }
    }

    pub fn api_client(&self) -> &ApiClient {
        self.api_client
    }

    pub fn session(&mut self) -> &mut SessionState {
        self.session
    }

    pub fn credentials(&self) -> &Credentials {
        self.credentials
    }

    pub fn fixtures(&self) -> &FixtureSettings {
        self.fixtures
    }

    /// The run's session token, logging in first if needed.
    ///
    /// A failed login turns into [`ScenarioError::Skipped`].
    pub async fn token(&mut self) -> Result<SessionToken, ScenarioError> {
        let token = self
            .session
            .ensure_token(self.api_client, self.credentials)
            .await?;
        Ok(token)
    }

    /// Attach a non-fatal observation to the scenario's report.
    pub fn annotate(&mut self, note: impl Into<String>) {
        let note = note.into();
        tracing::warn!(annotation = %note, "Scenario annotation");
        self.annotations.push(note);
    }

    fn into_annotations(self) -> Vec<String> {
        self.annotations
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(String),
    Skip(String),
}

impl Verdict {
    fn label(&self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail(_) => "FAIL",
            Verdict::Skip(_) => "SKIP",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub verdict: Verdict,
    pub annotations: Vec<String>,
    pub elapsed: Duration,
}

#[derive(Clone, Debug)]
pub struct RunReport {
    pub run_id: Uuid,
    pub scenarios: Vec<ScenarioReport>,
}

impl RunReport {
    fn count(&self, predicate: impl Fn(&Verdict) -> bool) -> usize {
        self.scenarios
            .iter()
            .filter(|report| predicate(&report.verdict))
            .count()
    }

    pub fn passed(&self) -> usize {
        self.count(|verdict| matches!(verdict, Verdict::Pass))
    }

    pub fn failed(&self) -> usize {
        self.count(|verdict| matches!(verdict, Verdict::Fail(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|verdict| matches!(verdict, Verdict::Skip(_)))
    }

    /// Skips do not count as failures.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn verdict_of(&self, name: &str) -> Option<&Verdict> {
        self.scenarios
            .iter()
            .find(|report| report.name == name)
            .map(|report| &report.verdict)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run {}", self.run_id)?;
        for report in &self.scenarios {
            write!(
                f,
                "{}  {} ({} ms)",
                report.verdict.label(),
                report.name,
                report.elapsed.as_millis()
            )?;
            match &report.verdict {
                Verdict::Pass => writeln!(f)?,
                Verdict::Fail(reason) | Verdict::Skip(reason) => writeln!(f, ": {}", reason)?,
            }
            for note in &report.annotations {
                writeln!(f, "      note: {}", note)?;
            }
        }
        write!(
            f,
            "{} scenarios: {} passed, {} failed, {} skipped",
            self.scenarios.len(),
            self.passed(),
            self.failed(),
            self.skipped()
        )
    }
}

/// Runs a fixed list of scenarios, one after the other, sharing one session.
pub struct SuiteRunner {
    api_client: ApiClient,
    credentials: Credentials,
    fixtures: FixtureSettings,
    scenarios: Vec<Box<dyn Scenario>>,
}

impl SuiteRunner {
    pub fn new(
        api_client: ApiClient,
        credentials: Credentials,
        fixtures: FixtureSettings,
        scenarios: Vec<Box<dyn Scenario>>,
    ) -> Self {
        Self {
            api_client,
            credentials,
            fixtures,
            scenarios,
        }
    }

    pub fn scenario_names(&self) -> Vec<&'static str> {
        self.scenarios.iter().map(|scenario| scenario.name()).collect()
    }

    /// Execute every scenario exactly once, in declaration order.
    ///
    /// Each call starts from an empty session.
    pub async fn run(&self) -> RunReport {
        let run_id = Uuid::new_v4();
        let mut session = SessionState::new();
        let mut reports = Vec::with_capacity(self.scenarios.len());
        tracing::info!(%run_id, scenarios = self.scenarios.len(), "Starting scenario run");

        for scenario in &self.scenarios {
            let span = tracing::info_span!(
                "Running scenario",
                %run_id,
                scenario = scenario.name()
            );
            let report = self
                .execute(scenario.as_ref(), &mut session)
                .instrument(span)
                .await;
            reports.push(report);
        }

        let report = RunReport {
            run_id,
            scenarios: reports,
        };
        tracing::info!(
            %run_id,
            passed = report.passed(),
            failed = report.failed(),
            skipped = report.skipped(),
            "Scenario run finished"
        );
        report
    }

    async fn execute(&self, scenario: &dyn Scenario, session: &mut SessionState) -> ScenarioReport {
        let mut ctx = ScenarioContext::new(
            &self.api_client,
            session,
            &self.credentials,
            &self.fixtures,
        );
        let started = Instant::now();
        let outcome = scenario.run(&mut ctx).await;
        let elapsed = started.elapsed();

        let verdict = match outcome {
            Ok(()) => {
                tracing::info!("Scenario passed");
                Verdict::Pass
            }
            Err(ScenarioError::Skipped(e)) => {
                tracing::info!(reason = %e, "Scenario skipped");
                Verdict::Skip(e.to_string())
            }
            Err(ScenarioError::Assertion(e)) => {
                tracing::error!(
                    error.message = %e,
                    response.body = %e.body,
                    "Scenario failed"
                );
                Verdict::Fail(e.to_string())
            }
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Scenario failed"
                );
                Verdict::Fail(e.to_string())
            }
        };

        ScenarioReport {
            name: scenario.name(),
            verdict,
            annotations: ctx.into_annotations(),
            elapsed,
        }
    }
}
