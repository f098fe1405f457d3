//! Port interface for obtaining a session

use adops_domain::{Credentials, Result, Session};
use async_trait::async_trait;

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Exchange credentials for a bearer token.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session>;
}
