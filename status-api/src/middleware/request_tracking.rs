//! Request ID generation and propagation, sensitive header masking
//!
//! Request IDs use the TypeID format with a `req` prefix over a UUIDv7, so
//! they sort by time: `req_01h455vb4pex5vsknk084sn02q`. An ID supplied by
//! the client in the configured header is kept as is.

use http::{header::HeaderName, HeaderValue, Request};
use mti::prelude::*;
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};

use crate::config::RequestTrackingConfig;

/// Headers masked in request logs
pub const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "set-cookie", "x-api-key"];

const REQUEST_ID_PREFIX: &str = "req";

/// Generates a fresh TypeID for every request lacking one
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeTypedRequestId;

impl MakeRequestId for MakeTypedRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = REQUEST_ID_PREFIX.create_type_id::<V7>();
        let header_value = HeaderValue::from_str(id.as_str()).ok()?;
        Some(RequestId::new(header_value))
    }
}

/// Configured request ID header, `x-request-id` when the name is invalid
fn request_id_header(config: &RequestTrackingConfig) -> HeaderName {
    HeaderName::try_from(config.request_id_header.as_str()).unwrap_or_else(|_| {
        tracing::warn!(
            header = %config.request_id_header,
            "Invalid request ID header name, using x-request-id"
        );
        HeaderName::from_static("x-request-id")
    })
}

pub fn request_id_layer(config: &RequestTrackingConfig) -> SetRequestIdLayer<MakeTypedRequestId> {
    SetRequestIdLayer::new(request_id_header(config), MakeTypedRequestId)
}

/// Copies the request ID onto the response
pub fn request_id_propagation_layer(config: &RequestTrackingConfig) -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(request_id_header(config))
}

pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    SetSensitiveRequestHeadersLayer::new(
        SENSITIVE_HEADERS.iter().copied().map(HeaderName::from_static),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_typed() {
        let request = Request::builder().uri("/").body(()).unwrap();
        let id = MakeTypedRequestId.make_request_id(&request).unwrap();
        let value = id.header_value().to_str().unwrap();
        assert!(value.starts_with("req_"));
        // prefix (3) + underscore (1) + suffix (26)
        assert_eq!(value.len(), 30);
    }

    #[test]
    fn test_invalid_header_name_falls_back() {
        let config = RequestTrackingConfig {
            request_id_header: "not a header".into(),
            ..RequestTrackingConfig::default()
        };
        assert_eq!(request_id_header(&config), "x-request-id");

        let custom = RequestTrackingConfig {
            request_id_header: "x-correlation-id".into(),
            ..RequestTrackingConfig::default()
        };
        assert_eq!(request_id_header(&custom), "x-correlation-id");
    }

    #[test]
    fn test_authorization_is_sensitive() {
        assert!(SENSITIVE_HEADERS.contains(&http::header::AUTHORIZATION.as_str()));
    }
}
