use axum::Json;
use axum::extract::{FromRequest, Request};

use super::ApiError;

/// JSON extractor whose rejection keeps the uniform error body.
/// A missing required field therefore surfaces as a validation error,
/// never as a framework-shaped response, and a partial update payload
/// is rejected here instead of silently keeping old values.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::validation(rejection.body_text())),
        }
    }
}
