//! Conversions from external infrastructure errors into domain errors.

use std::io::Error as IoError;

use adops_domain::AdOpsError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AdOpsError);

impl From<InfraError> for AdOpsError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<AdOpsError> for InfraError {
    fn from(value: AdOpsError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoAdOpsError {
    fn into_adops(self) -> AdOpsError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → AdOpsError */
/* -------------------------------------------------------------------------- */

impl IntoAdOpsError for HttpError {
    fn into_adops(self) -> AdOpsError {
        if self.is_timeout() {
            return AdOpsError::Transport("HTTP request timed out".into());
        }

        if self.is_connect() {
            return AdOpsError::Transport("HTTP connection failure".into());
        }

        if self.is_builder() {
            return AdOpsError::Internal(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return AdOpsError::MalformedResponse(format!("failed to decode body: {self}"));
        }

        if let Some(status) = self.status() {
            return AdOpsError::Transport(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            ));
        }

        AdOpsError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_adops())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → AdOpsError */
/* -------------------------------------------------------------------------- */

impl IntoAdOpsError for JsonError {
    fn into_adops(self) -> AdOpsError {
        AdOpsError::MalformedResponse(format!("unexpected JSON shape: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_adops())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → AdOpsError */
/* -------------------------------------------------------------------------- */

impl IntoAdOpsError for IoError {
    fn into_adops(self) -> AdOpsError {
        AdOpsError::Storage(format!("{} ({:?})", self, self.kind()))
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_adops())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → AdOpsError */
/* -------------------------------------------------------------------------- */

impl IntoAdOpsError for UrlError {
    fn into_adops(self) -> AdOpsError {
        AdOpsError::Config(format!("invalid URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_adops())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;

    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn io_errors_map_to_storage() {
        let err = IoError::new(ErrorKind::PermissionDenied, "read-only");
        let mapped: AdOpsError = InfraError::from(err).into();
        match mapped {
            AdOpsError::Storage(msg) => assert!(msg.contains("read-only")),
            other => panic!("expected storage error, got {:?}", other),
        }
    }

    #[test]
    fn json_errors_map_to_malformed_response() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let mapped: AdOpsError = InfraError::from(err).into();
        assert!(matches!(mapped, AdOpsError::MalformedResponse(_)));
    }

    #[test]
    fn url_errors_map_to_config() {
        let err = url::Url::parse("not a url").unwrap_err();
        let mapped: AdOpsError = InfraError::from(err).into();
        assert!(matches!(mapped, AdOpsError::Config(_)));
    }

    #[tokio::test]
    async fn http_status_errors_are_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::SERVICE_UNAVAILABLE))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: AdOpsError = InfraError::from(error).into();
        match mapped {
            AdOpsError::Transport(msg) => assert!(msg.contains("503")),
            other => panic!("expected transport error, got {:?}", other),
        }
        assert!(AdOpsError::from(InfraError(AdOpsError::Transport(String::new()))).is_retryable());
    }
}
