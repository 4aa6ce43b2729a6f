//! Fresh e-mail addresses for creation scenarios.
//!
//! The remote platform rejects a second registration with the same e-mail,
//! so every creation needs an address no earlier run has used.

use crate::constants::GENERATED_EMAIL_DOMAIN;
use rand::Rng;

fn generate(prefix: &str, spread: u32) -> String {
    let salt = rand::thread_rng().gen_range(0..spread);
    format!(
        "{}-{}-{}@{}",
        prefix,
        salt,
        chrono::Utc::now().timestamp_millis(),
        GENERATED_EMAIL_DOMAIN
    )
}

pub fn super_admin_email() -> String {
    generate("Automation", 10_000)
}

pub fn client_email() -> String {
    generate("Client_automation", 1_000)
}

pub fn cardholder_email() -> String {
    generate("Automationcard", 1_000)
}
