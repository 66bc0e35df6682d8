//! Client configuration and the shared request pipeline.
//!
//! # Design
//! `Client` holds only configuration: base URL, user agent and a transport
//! handle. It carries no mutable state between calls, so one instance can be
//! cloned and shared freely. Every resource service runs the same pipeline:
//! build → transport → classify → (optionally) decode.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::accounts::AccountService;
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Response};
use crate::request::build_request;
use crate::response::{classify, decode};
use crate::transport::{Transport, UreqTransport};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_USER_AGENT: &str = "form3";

/// Synchronous client for the organisation accounts API.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    user_agent: String,
    transport: Arc<dyn Transport>,
}

impl Client {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            transport: Arc::new(UreqTransport::new()),
        }
    }

    /// Replace the base URL. It is parsed when a request is built, so an
    /// invalid value surfaces as `ClientError::InvalidUrl` on the first call.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn accounts(&self) -> AccountService<'_> {
        AccountService::new(self)
    }

    /// Build a request for `path_and_query` with this client's settings.
    pub fn request<B>(
        &self,
        method: HttpMethod,
        path_and_query: &str,
        body: Option<&B>,
    ) -> Result<HttpRequest, ClientError>
    where
        B: Serialize + ?Sized,
    {
        build_request(method, &self.base_url, path_and_query, &self.user_agent, body)
    }

    /// Run `request` through the transport. Transport failures are returned
    /// unchanged inside `ClientError::Transport`.
    pub fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        let span = tracing::debug_span!("request", method = %request.method, url = %request.url);
        let _enter = span.enter();

        let response = self.transport.execute(request).map_err(ClientError::Transport)?;
        tracing::debug!(status = response.status, bytes = response.body.len(), "response received");
        Ok(response)
    }

    /// Execute, classify and decode the body into `T`.
    pub fn send<T: DeserializeOwned>(&self, request: &HttpRequest) -> Result<(T, Response), ClientError> {
        let response = self.execute(request)?;
        parse(request, response)
    }

    /// Execute and classify, ignoring the body of a successful response.
    pub fn send_empty(&self, request: &HttpRequest) -> Result<Response, ClientError> {
        let response = self.execute(request)?;
        parse_empty(request, response)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

/// Classify `response` and decode its body into `T`.
pub(crate) fn parse<T: DeserializeOwned>(
    request: &HttpRequest,
    response: HttpResponse,
) -> Result<(T, Response), ClientError> {
    let meta = classify(request, &response)?;
    let value = decode(&meta, &response)?;
    Ok((value, meta))
}

pub(crate) fn parse_empty(request: &HttpRequest, response: HttpResponse) -> Result<Response, ClientError> {
    Ok(classify(request, &response)?)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::BoxError;

    /// Replays one canned response and records every request it sees.
    pub(crate) struct StubTransport {
        status: u16,
        body: String,
        pub(crate) seen: Arc<Mutex<Vec<HttpRequest>>>,
    }

    impl StubTransport {
        pub(crate) fn new(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl Transport for StubTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(HttpResponse {
                status: self.status,
                headers: vec![("content-type".to_string(), "application/json".to_string())],
                body: self.body.clone().into_bytes(),
            })
        }
    }

    #[test]
    fn defaults_match_local_api() {
        let client = Client::new();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.user_agent(), "form3");
    }

    #[test]
    fn mutators_override_defaults() {
        let client = Client::new()
            .with_base_url("http://accountapi:8080")
            .with_user_agent("tests/1.0");
        let req = client.request::<()>(HttpMethod::Get, "/health", None).unwrap();
        assert_eq!(req.url, "http://accountapi:8080/health");
        assert_eq!(req.header("User-Agent"), Some("tests/1.0"));
    }

    #[test]
    fn send_decodes_success_body() {
        let client = Client::new().with_transport(StubTransport::new(200, r#"{"ok":true}"#));
        let req = client.request::<()>(HttpMethod::Get, "/x", None).unwrap();
        let (value, meta): (serde_json::Value, _) = client.send(&req).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(meta.status, 200);
        assert_eq!(meta.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn send_classifies_before_decoding() {
        let client = Client::new().with_transport(StubTransport::new(500, r#"{"error_message":"boom"}"#));
        let req = client.request::<()>(HttpMethod::Get, "/x", None).unwrap();
        let err = client.send::<serde_json::Value>(&req).unwrap_err();
        let api = err.as_api().unwrap();
        assert_eq!(api.message, "boom");
        assert_eq!(api.to_string(), "GET http://localhost:8080/x: 500 boom");
    }

    #[test]
    fn send_empty_ignores_body() {
        let client = Client::new().with_transport(StubTransport::new(204, ""));
        let req = client.request::<()>(HttpMethod::Delete, "/x", None).unwrap();
        let meta = client.send_empty(&req).unwrap();
        assert_eq!(meta.status, 204);
    }

    #[test]
    fn transport_errors_pass_through() {
        let client = Client::new().with_transport(|_: &HttpRequest| -> Result<HttpResponse, BoxError> {
            Err("connection reset".into())
        });
        let req = client.request::<()>(HttpMethod::Get, "/x", None).unwrap();
        let err = client.send_empty(&req).unwrap_err();
        match err {
            ClientError::Transport(inner) => assert_eq!(inner.to_string(), "connection reset"),
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    #[test]
    fn invalid_base_url_fails_at_build_time() {
        let client = Client::new().with_base_url("::nope::");
        let err = client.request::<()>(HttpMethod::Get, "/x", None).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
