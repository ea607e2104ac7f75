use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{RestError, Result};

/// Status codes treated as a successful exchange.
pub const SUCCESS_STATUSES: [StatusCode; 8] = [
    StatusCode::OK,
    StatusCode::CREATED,
    StatusCode::ACCEPTED,
    StatusCode::NON_AUTHORITATIVE_INFORMATION,
    StatusCode::NO_CONTENT,
    StatusCode::RESET_CONTENT,
    StatusCode::PARTIAL_CONTENT,
    StatusCode::MULTI_STATUS,
];

/// Result of a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response<T> {
    pub status_code: u16,
    pub data: T,
}

pub fn is_success_status(status: StatusCode) -> bool {
    SUCCESS_STATUSES.contains(&status)
}

/// Classify a completed exchange and decode its body.
///
/// An empty body decodes as JSON `null`. Success statuses yield
/// [`Response`]; any other status yields [`RestError::Rejected`] carrying the
/// parsed error body. A body that is not valid JSON yields
/// [`RestError::Decode`] in both cases.
pub fn resolve<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<Response<T>> {
    let status_code = status.as_u16();
    let text = if body.is_empty() { "null" } else { body };

    if is_success_status(status) {
        let data = serde_json::from_str::<T>(text).map_err(|source| RestError::Decode {
            status: status_code,
            source,
        })?;
        Ok(Response { status_code, data })
    } else {
        let body =
            serde_json::from_str::<serde_json::Value>(text).map_err(|source| RestError::Decode {
                status: status_code,
                source,
            })?;
        Err(RestError::Rejected {
            status: status_code,
            body,
        })
    }
}
