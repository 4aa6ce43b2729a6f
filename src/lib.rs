pub mod api_client;
pub mod configuration;
pub mod constants;
pub mod domain;
pub mod outcome;
pub mod runner;
pub mod scenarios;
pub mod session;
pub mod startup;
pub mod telemetry;

#[cfg(test)]
mod test_support;
