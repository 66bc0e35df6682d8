//! Pluggable HTTP execution.
//!
//! The core never opens sockets itself: a `Transport` performs the round-trip
//! for an `HttpRequest` and returns the response with its body fully read.
//! `UreqTransport` is the default, blocking implementation.

use std::time::Duration;

use crate::error::BoxError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes an `HttpRequest` and returns the buffered response.
///
/// Implementations must return 4xx/5xx responses as `Ok` data; only failures
/// that prevent receiving a response (connection refused, timeout, TLS, ...)
/// belong in `Err`. Must be safe to share between threads if the client is.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, BoxError> + Send + Sync,
{
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        self(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::from_config(None)
    }

    /// Fail any call that takes longer than `timeout` end to end.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::from_config(Some(timeout))
    }

    pub fn from_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }

    fn from_config(timeout: Option<Duration>) -> Self {
        // Status codes are data for the classifier, not transport errors.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        let url = request.url.as_str();
        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Delete => {
                let mut builder = self.agent.delete(url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_vec()?;

        Ok(HttpResponse { status, headers, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_transports() {
        let transport = |req: &HttpRequest| -> Result<HttpResponse, BoxError> {
            Ok(HttpResponse {
                status: 204,
                headers: Vec::new(),
                body: req.url.as_bytes().to_vec(),
            })
        };
        let req = HttpRequest {
            method: HttpMethod::Delete,
            url: "http://localhost:8080/x".to_string(),
            headers: Vec::new(),
            body: None,
        };
        let resp = transport.execute(&req).unwrap();
        assert_eq!(resp.status, 204);
        assert_eq!(resp.body, b"http://localhost:8080/x");
    }

    #[test]
    fn connection_refused_is_an_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let req = HttpRequest {
            method: HttpMethod::Get,
            url: format!("http://{addr}/"),
            headers: Vec::new(),
            body: None,
        };
        assert!(UreqTransport::with_timeout(Duration::from_secs(5)).execute(&req).is_err());
    }
}
