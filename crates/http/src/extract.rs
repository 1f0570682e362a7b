//! Request extractors that report failures as [`AppError`].

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body whose rejections surface as `400 Bad Request`.
///
/// The body is decoded whatever the `Content-Type` header says, so clients
/// that omit it (or send `curl -d`'s form default) are still served. Only a
/// payload that does not decode into `T` is rejected.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| invalid_body(rejection.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|err| invalid_body(err.to_string()))
    }
}

fn invalid_body(reason: String) -> AppError {
    AppError::bad_request_with(
        vec![serde_json::json!({ "body": reason })],
        "invalid request body",
    )
}
