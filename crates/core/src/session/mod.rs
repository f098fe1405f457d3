//! Login use case

pub mod ports;

use std::sync::Arc;

use adops_domain::{Credentials, Result, Session};
use tracing::{info, instrument, warn};

use self::ports::Authenticator;

pub struct SessionService {
    authenticator: Arc<dyn Authenticator>,
}

impl SessionService {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }

    /// Validate credentials locally, then authenticate remotely.
    ///
    /// Blank credentials fail with `Validation` and send nothing.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        credentials.validate()?;

        match self.authenticator.authenticate(credentials).await {
            Ok(session) => {
                info!("Authenticated");
                Ok(session)
            }
            Err(err) => {
                warn!(error_kind = err.label(), error = %err, "Authentication failed");
                Err(err)
            }
        }
    }
}
