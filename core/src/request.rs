//! Request builder: turns a method, a relative path and an optional payload
//! into a fully-formed `HttpRequest`.

use serde::Serialize;
use url::Url;

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest};

pub const MEDIA_TYPE_JSON: &str = "application/json";

/// Build a request for `path_and_query` resolved against `base_url`.
///
/// The join follows RFC 3986 reference resolution, so an absolute path such as
/// `/v1/organisation/accounts` replaces the base's path while keeping its
/// scheme and authority. `Content-Type` is only set when a body is present.
pub fn build_request<B>(
    method: HttpMethod,
    base_url: &str,
    path_and_query: &str,
    user_agent: &str,
    body: Option<&B>,
) -> Result<HttpRequest, ClientError>
where
    B: Serialize + ?Sized,
{
    let url = Url::parse(base_url)?.join(path_and_query)?;

    let mut headers = vec![
        ("Accept".to_string(), MEDIA_TYPE_JSON.to_string()),
        ("User-Agent".to_string(), user_agent.to_string()),
    ];

    let body = match body {
        Some(payload) => {
            let encoded = serde_json::to_string(payload).map_err(ClientError::Serialization)?;
            headers.push(("Content-Type".to_string(), MEDIA_TYPE_JSON.to_string()));
            Some(encoded)
        }
        None => None,
    };

    Ok(HttpRequest {
        method,
        url: url.to_string(),
        headers,
        body,
    })
}
