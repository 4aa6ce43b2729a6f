mod card;
mod client;
mod credentials;
mod generated_email;
mod permission;
mod super_admin;

pub use card::CardIssuance;
pub use client::NewClient;
pub use credentials::{Credentials, LoginRequest};
pub use generated_email::{cardholder_email, client_email, super_admin_email};
pub use permission::Permission;
pub use super_admin::SuperAdmin;
