//! Response classification and decoding.
//!
//! `classify` always runs first; `decode` is only reached for 2xx responses
//! whose caller asked for a payload. Both work on the buffered body the
//! transport already read, so the network body is never read twice.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ApiError, ClientError};
use crate::http::{HttpRequest, HttpResponse, Response};

/// Shape of an API error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error_message: String,
}

/// Decide success or failure from the status code alone.
///
/// On failure the message is the body's `error_message` when the body is JSON
/// of that shape, the body text otherwise, and empty for an empty body.
pub fn classify(request: &HttpRequest, response: &HttpResponse) -> Result<Response, ApiError> {
    let meta = Response::from_exchange(request, response);
    if meta.is_success() {
        return Ok(meta);
    }

    let message = error_message(&response.body);
    tracing::warn!(
        method = %meta.method,
        url = %meta.url,
        status = meta.status,
        message = %message,
        "API request failed"
    );
    Err(ApiError {
        response: meta,
        message,
    })
}

fn error_message(body: &[u8]) -> String {
    if body.is_empty() {
        return String::new();
    }
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => parsed.error_message,
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

/// Deserialize a successful response body into `T`.
pub fn decode<T: DeserializeOwned>(meta: &Response, response: &HttpResponse) -> Result<T, ClientError> {
    serde_json::from_slice(&response.body).map_err(|source| ClientError::Decode {
        response: meta.clone(),
        body: String::from_utf8_lossy(&response.body).into_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    fn request() -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: "http://localhost:8080/v1/organisation/accounts".to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn every_2xx_status_is_success_regardless_of_body() {
        for status in 200..=299 {
            let meta = classify(&request(), &response(status, "{not json")).unwrap();
            assert_eq!(meta.status, status);
        }
    }

    #[test]
    fn statuses_outside_2xx_are_errors() {
        for status in [100, 199, 300, 304, 400, 404, 409, 422, 500, 503] {
            let err = classify(&request(), &response(status, "")).unwrap_err();
            assert_eq!(err.status(), status);
            assert_eq!(err.message, "");
        }
    }

    #[test]
    fn structured_error_message_is_extracted() {
        let body = r#"{"error_message": "id in body must be of type uuid: \"invalid uuid\""}"#;
        let err = classify(&request(), &response(422, body)).unwrap_err();
        assert_eq!(err.message, r#"id in body must be of type uuid: "invalid uuid""#);
        assert_eq!(err.response.method, HttpMethod::Post);
        assert_eq!(err.response.url, "http://localhost:8080/v1/organisation/accounts");
    }

    #[test]
    fn unstructured_body_becomes_message_verbatim() {
        let err = classify(&request(), &response(500, "upstream exploded")).unwrap_err();
        assert_eq!(err.message, "upstream exploded");
    }

    #[test]
    fn json_without_error_message_field_is_kept_as_text() {
        let err = classify(&request(), &response(400, r#"{"code":7}"#)).unwrap_err();
        assert_eq!(err.message, r#"{"code":7}"#);
    }

    #[test]
    fn decode_reports_body_and_status_on_mismatch() {
        let resp = response(200, "not json");
        let meta = classify(&request(), &resp).unwrap();
        let err = decode::<serde_json::Value>(&meta, &resp).unwrap_err();
        match err {
            ClientError::Decode { response, body, .. } => {
                assert_eq!(response.status, 200);
                assert_eq!(body, "not json");
            }
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn decode_fills_target_shape() {
        let resp = response(200, r#"{"error_message":"fine"}"#);
        let meta = classify(&request(), &resp).unwrap();
        let parsed: ErrorBody = decode(&meta, &resp).unwrap();
        assert_eq!(parsed.error_message, "fine");
    }
}
