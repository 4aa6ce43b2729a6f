use crate::mock_platform::FakePlatform;
use sovpay_api_suite::configuration::{Settings, get_configuration};
use sovpay_api_suite::runner::{RunReport, Scenario, ScenarioReport, SuiteRunner};
use sovpay_api_suite::startup::Suite;
use sovpay_api_suite::telemetry::{get_subscriber, init_subscriber};
use std::sync::{LazyLock, Mutex};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use wiremock::MockServer;

// This holds the guard for the entire lifetime of the test process
static LOG_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

// Ensure that the `tracing` stack is only initialised once using `LazyLock`
static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    let loglevel = std::env::var("LOGLEVEL").unwrap_or(default_filter_level);

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, loglevel, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, loglevel, test_writer());
        init_subscriber(subscriber);
    }
});

pub fn test_writer() -> NonBlocking {
    let test_name = std::env::args()
        .skip_while(|arg| arg != "--exact")
        .nth(1)
        .map(|arg| arg.replace("::", "-"))
        .unwrap_or("unlabeled_test".into())
        .replace(' ', "_");

    let _ = std::fs::create_dir_all("tests/logs/nextest");
    let _ = std::fs::create_dir_all("tests/logs/cargo_test");

    let filename = if test_name != "unlabeled_test" {
        format!("tests/logs/nextest/{}.log", test_name)
    } else {
        "tests/logs/cargo_test/cargo_test.log".to_string()
    };

    let file_appender = tracing_appender::rolling::never(".", filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Store the guard to prevent it from being dropped
    *LOG_GUARD.lock().unwrap() = Some(guard);

    non_blocking
}

pub struct TestPlatform {
    pub server: MockServer,
    pub settings: Settings,
    pub fake: FakePlatform,
}

impl TestPlatform {
    /// A runner over `scenarios` only, pointed at the fake platform.
    pub fn runner(&self, scenarios: Vec<Box<dyn Scenario>>) -> SuiteRunner {
        SuiteRunner::new(
            self.settings
                .api
                .client()
                .expect("Failed to build the API client."),
            self.settings.credentials.credentials(),
            self.settings.fixtures.clone(),
            scenarios,
        )
    }

    pub async fn run(&self, scenarios: Vec<Box<dyn Scenario>>) -> RunReport {
        self.runner(scenarios).run().await
    }

    pub async fn run_one(&self, scenario: impl Scenario + 'static) -> ScenarioReport {
        let mut report = self.run(vec![Box::new(scenario)]).await;
        report.scenarios.remove(0)
    }

    /// The full catalogue, built the same way the binary builds it.
    pub fn suite(&self) -> Suite {
        Suite::build(self.settings.clone()).expect("Failed to build the suite.")
    }
}

pub async fn spawn_platform() -> TestPlatform {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    LazyLock::force(&TRACING);

    let server = MockServer::start().await;

    let settings = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.api.base_url = server.uri();
        // Keep slow-response tests short
        c.api.timeout_milliseconds = Some(500);
        c
    };
    let fake = FakePlatform::new(&settings);

    TestPlatform {
        server,
        settings,
        fake,
    }
}
