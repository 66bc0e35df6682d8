//! HTTP wire types described as plain data.
//!
//! # Design
//! The core builds `HttpRequest` values and classifies `HttpResponse` values
//! without owning any socket. A `Transport` (see `crate::transport`) performs
//! the actual round-trip and hands back a fully buffered `HttpResponse`, so the
//! response body is read exactly once, by the transport, before any
//! classification or decoding happens.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-formed HTTP request: method, absolute URL, headers and an optional
/// JSON body.
///
/// Created per call by the request builder and discarded after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A raw HTTP response as returned by a transport, body fully buffered.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Metadata of a completed exchange, returned alongside decoded payloads.
///
/// Carries enough context (method, URL, status) to log or display a call
/// without looking anything else up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub method: HttpMethod,
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl Response {
    pub fn from_exchange(request: &HttpRequest, response: &HttpResponse) -> Self {
        Self {
            method: request.method,
            url: request.url.clone(),
            status: response.status,
            headers: response.headers.clone(),
        }
    }

    /// Status is within 200..=299.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
