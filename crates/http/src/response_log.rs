//! Failure logging for every HTTP response.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::ErrorMessage;

/// Log method, path, status, and message of every response with status >= 400.
///
/// The message is taken from the [`ErrorMessage`] extension set by
/// [`crate::error::AppError`], falling back to the status reason phrase.
pub async fn log_failures(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let response = next.run(request).await;
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        let reason = response
            .extensions()
            .get::<ErrorMessage>()
            .map(|message| message.0.as_str())
            .or_else(|| status.canonical_reason())
            .unwrap_or_default();

        if status.is_server_error() {
            tracing::error!(%method, %path, status = status.as_u16(), %reason, "request failed");
        } else {
            tracing::warn!(%method, %path, status = status.as_u16(), %reason, "request rejected");
        }
    }

    response
}
