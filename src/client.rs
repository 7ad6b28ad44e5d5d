use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::ser::Serialize;
use std::env;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::observability;
use crate::types::{
    SendMessageRequest, SendMessageResponse, SendOtpRequest, SendOtpResponse,
    SessionCreateResponse, SessionStatusResponse, VerifyOtpRequest, VerifyOtpResponse,
};

/// Base URL of the hosted agent service.
pub const DEFAULT_API_URL: &str = "https://api.careline.example/api/";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The subset of the agent service the chat coordinator depends on.
///
/// [`AgentClient`] is the production implementation; tests substitute an
/// in-memory mock to exercise the coordinator without a network.
#[async_trait::async_trait]
pub trait AgentApi: Send + Sync {
    /// Requests a fresh session handle from the agent service.
    async fn create_session(&self) -> Result<SessionCreateResponse>;

    /// Forwards one user message and returns the assistant's reply.
    async fn send_message(&self, request: SendMessageRequest) -> Result<SendMessageResponse>;

    /// Probes whether the backend still knows a session handle.
    async fn session_status(&self, session_id: &str) -> Result<SessionStatusResponse>;
}

/// HTTP client for the loan-assistant agent service.
#[derive(Debug, Clone)]
pub struct AgentClient {
    token: Option<String>,
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
}

impl AgentClient {
    /// Create a new client.
    ///
    /// The bearer token can be provided directly or read from the
    /// CARELINE_TOKEN environment variable; without one the client can still
    /// drive the OTP login flow, which is how tokens are obtained in the
    /// first place.
    pub fn new(token: Option<String>) -> Result<Self> {
        let token = token.or_else(|| env::var("CARELINE_TOKEN").ok());

        let timeout = DEFAULT_TIMEOUT;
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            token,
            client,
            base_url: DEFAULT_API_URL.to_string(),
            timeout,
        })
    }

    /// Create a new client with custom settings.
    pub fn with_options(
        token: Option<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let token = token.or_else(|| env::var("CARELINE_TOKEN").ok());
        let base_url = match base_url {
            Some(raw) => {
                // Validate early; a bad base URL would otherwise surface as a
                // confusing connection error on the first request.
                url::Url::parse(&raw)?;
                if raw.ends_with('/') {
                    raw
                } else {
                    format!("{raw}/")
                }
            }
            None => DEFAULT_API_URL.to_string(),
        };

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            token,
            client,
            base_url,
            timeout,
        })
    }

    /// Replaces the bearer credential used for authenticated calls.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Returns true if the client holds a bearer credential.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| Error::authentication("bearer token contains invalid characters"))?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    fn authenticated_headers(&self) -> Result<HeaderMap> {
        if self.token.is_none() {
            return Err(Error::authentication(
                "no bearer token; complete the OTP login flow first",
            ));
        }
        self.default_headers()
    }

    /// Process API response errors and convert to our Error type.
    async fn process_error_response(response: Response) -> Error {
        let status = response.status();
        let status_code = status.as_u16();

        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|val| val.to_str().ok())
            .map(String::from);

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        // The backend reports failures as {"status": "error", "message": ...}
        // for chat endpoints and {"error": ...} for login endpoints.
        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
            error: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let parsed = serde_json::from_str::<ErrorBody>(&error_body).ok();
        let error_message = parsed
            .and_then(|body| body.message.or(body.error))
            .unwrap_or_else(|| error_body.clone());

        match status_code {
            400 => Error::bad_request(error_message, None),
            401 => Error::authentication(error_message),
            403 => Error::permission(error_message),
            404 => Error::not_found(error_message, None, None),
            408 => Error::timeout(error_message, None),
            429 => Error::rate_limit(error_message, retry_after),
            500 => Error::internal_server(error_message, request_id),
            502..=504 => Error::service_unavailable(error_message, retry_after),
            _ => Error::api(status_code, error_message, request_id),
        }
    }

    fn map_transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        headers: HeaderMap,
        body: &B,
    ) -> Result<T> {
        observability::CLIENT_REQUESTS.click();
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                observability::CLIENT_REQUEST_ERRORS.click();
                self.map_transport_error(e)
            })?;

        if !response.status().is_success() {
            observability::CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        response.json::<T>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, headers: HeaderMap) -> Result<T> {
        observability::CLIENT_REQUESTS.click();
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| {
                observability::CLIENT_REQUEST_ERRORS.click();
                self.map_transport_error(e)
            })?;

        if !response.status().is_success() {
            observability::CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        response.json::<T>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// Sends a one-time code to a phone number.
    ///
    /// Unauthenticated; this is the entry point of the login flow.
    pub async fn send_otp(&self, phone_number: &str) -> Result<SendOtpResponse> {
        if phone_number.trim().is_empty() {
            return Err(Error::validation(
                "phone number is required",
                Some("phone_number".to_string()),
            ));
        }
        let request = SendOtpRequest::new(phone_number.trim());
        self.post_json("login/send-otp/", self.default_headers()?, &request)
            .await
    }

    /// Exchanges a one-time code for a bearer credential.
    pub async fn verify_otp(&self, phone_number: &str, otp: &str) -> Result<VerifyOtpResponse> {
        if phone_number.trim().is_empty() {
            return Err(Error::validation(
                "phone number is required",
                Some("phone_number".to_string()),
            ));
        }
        if otp.trim().is_empty() {
            return Err(Error::validation(
                "one-time code is required",
                Some("otp".to_string()),
            ));
        }
        let request = VerifyOtpRequest::new(phone_number.trim(), otp.trim());
        self.post_json("login/verify-otp/", self.default_headers()?, &request)
            .await
    }
}

#[async_trait::async_trait]
impl AgentApi for AgentClient {
    async fn create_session(&self) -> Result<SessionCreateResponse> {
        observability::SESSIONS_CREATED.click();
        self.post_json("session/", self.authenticated_headers()?, &serde_json::json!({}))
            .await
    }

    async fn send_message(&self, request: SendMessageRequest) -> Result<SendMessageResponse> {
        observability::MESSAGES_SENT.click();
        self.post_json("message/", self.authenticated_headers()?, &request)
            .await
    }

    async fn session_status(&self, session_id: &str) -> Result<SessionStatusResponse> {
        let path = format!("session/{session_id}/");
        self.get_json(&path, self.authenticated_headers()?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = AgentClient::new(Some("test-token".to_string())).unwrap();
        assert!(client.has_token());
        assert_eq!(client.base_url(), DEFAULT_API_URL);
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);

        let client = AgentClient::with_options(
            Some("test-token".to_string()),
            Some("https://staging.careline.example/api".to_string()),
            Some(Duration::from_secs(10)),
        )
        .unwrap();
        assert_eq!(client.base_url(), "https://staging.careline.example/api/");
        assert_eq!(client.timeout, Duration::from_secs(10));
    }

    #[test]
    fn with_options_rejects_bad_url() {
        let result = AgentClient::with_options(None, Some("not a url".to_string()), None);
        assert!(result.is_err());
    }

    #[test]
    fn token_can_be_cleared() {
        let mut client = AgentClient::new(Some("t".to_string())).unwrap();
        assert!(client.has_token());
        client.set_token(None);
        assert!(!client.has_token());
    }

    #[tokio::test]
    async fn authenticated_calls_require_token() {
        let client = AgentClient::with_options(
            None,
            Some("http://127.0.0.1:1/api/".to_string()),
            Some(Duration::from_millis(50)),
        )
        .unwrap();
        // set_token(None) guards against CARELINE_TOKEN leaking in from the
        // test environment.
        let mut client = client;
        client.set_token(None);
        let err = client.create_session().await.unwrap_err();
        assert!(err.is_authentication());
    }

    #[tokio::test]
    async fn send_otp_validates_input() {
        let client = AgentClient::new(None).unwrap();
        let err = client.send_otp("   ").await.unwrap_err();
        assert!(err.is_validation());

        let err = client.verify_otp("9876543210", "").await.unwrap_err();
        assert!(err.is_validation());
    }
}
