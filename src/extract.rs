use crate::error::AppError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

/// JSON body extractor that ignores Content-Type. Unparseable bodies and
/// fields of the wrong type are a 400, oversized bodies a 413.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            debug!("Failed to read request body: {}", e);
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge
            } else {
                AppError::UnreadableBody
            }
        })?;

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            debug!("Rejected request body: {}", e);
            match e.classify() {
                Category::Data => AppError::WrongFieldType(e.to_string()),
                Category::Io | Category::Syntax | Category::Eof => AppError::InvalidJson,
            }
        })
    }
}
