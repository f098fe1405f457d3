//! Authenticated session with the remote API

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AdOpsError, Result};

/// Username and password supplied by the operator
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let password: String = password.into();
        Self { username: username.into(), password: SecretString::new(password.into_boxed_str()) }
    }

    /// Reject blank input before any request is sent.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(AdOpsError::Validation("username must not be empty".to_string()));
        }
        if self.password.expose_secret().is_empty() {
            return Err(AdOpsError::Validation("password must not be empty".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Bearer token obtained from authentication
///
/// Read-only once created. `Debug` never prints the token.
pub struct Session {
    username: String,
    token: SecretString,
}

impl Session {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        let token: String = token.into();
        Self { username: username.into(), token: SecretString::new(token.into_boxed_str()) }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Raw token for the `Authorization` header.
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_secrets() {
        let session = Session::new("ops", "tok-123");
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("tok-123"));
        assert_eq!(session.token(), "tok-123");

        let creds = Credentials::new("ops", "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[test]
    fn blank_credentials_fail_validation() {
        assert!(matches!(Credentials::new(" ", "pw").validate(), Err(AdOpsError::Validation(_))));
        assert!(matches!(Credentials::new("ops", "").validate(), Err(AdOpsError::Validation(_))));
        assert!(Credentials::new("ops", "pw").validate().is_ok());
    }
}
