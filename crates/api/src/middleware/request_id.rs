//! Request correlation IDs.
//!
//! Every response carries an `x-request-id` header. A well-formed ID supplied
//! by an upstream proxy is reused; anything else is replaced by a fresh UUID
//! v4. The ID is recorded on the request's tracing span, tagged on the Sentry
//! scope and stored in the request extensions as [`RequestId`].

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream ID that is accepted as-is.
const MAX_REQUEST_ID_LEN: usize = 128;

/// The correlation ID of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Reuse `candidate` if it is a usable ID, otherwise generate one.
    fn from_upstream(candidate: Option<&HeaderValue>) -> Self {
        candidate
            .and_then(|value| value.to_str().ok())
            .filter(|value| is_acceptable(value))
            .map_or_else(|| Self(Uuid::new_v4().to_string()), |value| Self(value.to_owned()))
    }

    /// The ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

/// Middleware that ensures every request has a request ID.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_upstream(request.headers().get(REQUEST_ID_HEADER));

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", request_id.as_str());
    });

    request.extensions_mut().insert(request_id.clone());
    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
