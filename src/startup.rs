use crate::api_client::TransportError;
use crate::configuration::Settings;
use crate::runner::{RunReport, SuiteRunner};
use crate::scenarios::catalogue;

/// The scenario catalogue wired to a configured platform host.
pub struct Suite {
    base_url: String,
    runner: SuiteRunner,
}

impl Suite {
    pub fn build(configuration: Settings) -> Result<Self, TransportError> {
        let api_client = configuration.api.client()?;
        tracing::debug!("running suite with api_client: {:?}", &api_client);
        let runner = SuiteRunner::new(
            api_client,
            configuration.credentials.credentials(),
            configuration.fixtures,
            catalogue(),
        );
        Ok(Self {
            base_url: configuration.api.base_url,
            runner,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn runner(&self) -> &SuiteRunner {
        &self.runner
    }

    pub async fn run_to_completion(&self) -> RunReport {
        tracing::info!(base_url = %self.base_url, "Running the API scenario suite");
        self.runner.run().await
    }
}
