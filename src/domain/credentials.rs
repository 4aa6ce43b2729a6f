use secrecy::{ExposeSecret, Secret};

/// The fixed credential pair the suite logs in with.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub email: String,
    pub password: Secret<String>,
}

// Borrowed view used as the login request body.
// No `Debug`: it holds the exposed password.
#[derive(serde::Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl Credentials {
    pub fn login_request(&self) -> LoginRequest<'_> {
        LoginRequest {
            email: &self.email,
            password: self.password.expose_secret(),
        }
    }
}
