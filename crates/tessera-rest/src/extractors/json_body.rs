//! JSON extractor that reports malformed bodies in the API envelope.

use crate::responses::ApiResponse;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use tessera_core::ErrorResponse;

/// Error code returned when the request body cannot be decoded.
pub const INVALID_JSON: &str = "INVALID_JSON";

/// JSON body extractor.
///
/// Behaves like [`Json`] but rejects with the standard
/// `{ success, error }` envelope. Field-level validation is left to the
/// service layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T> std::ops::Deref for JsonBody<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection for [`JsonBody`].
#[derive(Debug)]
pub struct JsonBodyRejection(pub JsonRejection);

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        let error_response = ErrorResponse {
            code: INVALID_JSON.to_string(),
            message: format!("Invalid JSON: {}", self.0.body_text()),
        };
        (self.0.status(), Json(ApiResponse::<()>::error(error_response))).into_response()
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(JsonBodyRejection)?;

        Ok(Self(value))
    }
}
