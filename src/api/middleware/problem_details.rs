use axum::{extract::Request, middleware::Next, response::Response};

use super::request_tracing::get_request_id;
use crate::api::errors::{problem_response, ProblemDetails};

/// Stamp problem responses with the request's correlation id and URI.
///
/// Must run inside [`super::request_tracing_middleware`] so the request
/// id it reads is the one echoed on the response.
pub async fn problem_details_middleware(request: Request, next: Next) -> Response {
    let correlation_id = get_request_id(request.headers());
    let instance = request.uri().path().to_string();

    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<ProblemDetails>() {
        Some(problem) => {
            let (mut parts, _) = response.into_parts();
            let mut stamped = problem_response(ProblemDetails {
                correlation_id,
                instance,
                ..problem
            });
            // Keep headers set by inner layers, every value of each, except
            // the stale length and whatever the envelope already sets
            parts.headers.remove(axum::http::header::CONTENT_LENGTH);
            for name in parts.headers.keys() {
                if stamped.headers().contains_key(name) {
                    continue;
                }
                for value in parts.headers.get_all(name) {
                    stamped.headers_mut().append(name.clone(), value.clone());
                }
            }
            stamped
        }
        None => response,
    }
}
