use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Envelope every collector endpoint answers with.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub status: ApiStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Error,
}

impl<T> ApiEnvelope<T> {
    /// A response is only usable when the status says success and data is
    /// actually present.
    pub fn into_data(self) -> Result<T, ApiError> {
        match (self.status, self.data) {
            (ApiStatus::Success, Some(data)) => Ok(data),
            (ApiStatus::Success, None) => {
                Err(ApiError::Rejected("success response carried no data".to_string()))
            }
            (ApiStatus::Error, _) => Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "request failed".to_string()),
            )),
        }
    }
}

/// Decode a response body against the envelope, folding HTTP-level errors
/// into the taxonomy: a non-2xx status with an unreadable body is a
/// rejection, a 2xx with an unreadable body is malformed.
pub fn decode_body<T: DeserializeOwned>(
    status: reqwest::StatusCode,
    body: &[u8],
) -> Result<T, ApiError> {
    match serde_json::from_slice::<ApiEnvelope<T>>(body) {
        Ok(envelope) => envelope.into_data(),
        Err(_) if !status.is_success() => {
            Err(ApiError::Rejected(format!("http {}", status.as_u16())))
        }
        Err(e) => Err(ApiError::Malformed(e)),
    }
}
