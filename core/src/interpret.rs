//! Response interpreter.
//!
//! Classification is a single transition per response:
//! 1. the host followed a redirect → `Redirect` to the final URL;
//! 2. 2xx → `JsonResult` with the body's `url`;
//! 3. anything else → `ErrorMessage` with the body text, lower-cased.
//!
//! A 2xx body without a usable `url` becomes an `ErrorMessage` carrying the
//! caller's generic text; the detail only goes to the log.

use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::types::{ResponseOutcome, UploadResult};

pub fn classify(response: &HttpResponse, malformed_message: &str) -> ResponseOutcome {
    if response.redirected {
        return ResponseOutcome::Redirect(response.url.clone());
    }

    if response.is_success() {
        return match parse_result(&response.body) {
            Ok(location) => ResponseOutcome::JsonResult(location),
            Err(err) => {
                tracing::warn!(status = response.status, error = %err, "unusable success body");
                ResponseOutcome::ErrorMessage(malformed_message.to_string())
            }
        };
    }

    ResponseOutcome::ErrorMessage(error_text(response))
}

/// Extract the result location from a success body.
pub fn parse_result(body: &str) -> Result<String, ApiError> {
    let result: UploadResult =
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
    if result.url.trim().is_empty() {
        return Err(ApiError::MissingLocation);
    }
    Ok(result.url)
}

fn error_text(response: &HttpResponse) -> String {
    let text = response.body.trim();
    if text.is_empty() {
        return format!("request failed with status {}", response.status);
    }
    text.to_lowercase()
}
