use anyhow::Context;
use sovpay_api_suite::configuration::get_configuration;
use sovpay_api_suite::startup::Suite;
use sovpay_api_suite::telemetry::{get_subscriber, init_subscriber};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("sovpay_api_suite".into(), "info".into(), std::io::stderr);
    init_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let suite = Suite::build(configuration).context("Failed to build the scenario suite.")?;
    let report = suite.run_to_completion().await;

    println!("{}", report);
    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
