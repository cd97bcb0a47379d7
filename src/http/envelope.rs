//! Interpretation of a finished HTTP exchange.
//!
//! The wallet API wraps every response in an envelope: a JSON object that
//! may carry `success`, `error` and `message` keys next to the endpoint's own
//! data. [`classify`] turns a [`TransportOutcome`] into either the decoded
//! payload or the first matching [`WalletApiError`], checking in this order:
//!
//! 1. transport error
//! 2. status other than `200`
//! 3. body that is not valid JSON
//! 4. `success` flag present and falsy (objects only)
//!
//! Valid JSON that is not an object, such as a bare list, is returned as-is.
//!
//! A transport error wins even when a status code was already received,
//! and a non-`200` status wins even when the body holds a JSON failure
//! envelope.

use serde_json::Value;

use super::error::{UNKNOWN_API_ERROR, WalletApiError};
use super::types::{ApiPayload, RawResponse};

/// Everything the networking layer produced for one call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOutcome {
    pub status: Option<u16>,
    pub body: Option<String>,
    pub error: Option<String>,
}

impl TransportOutcome {
    pub fn to_raw_response(&self) -> RawResponse {
        RawResponse {
            http_code: self.status.unwrap_or(0),
            body: self.body.clone(),
            error: self.error.clone(),
        }
    }
}

pub fn classify(outcome: &TransportOutcome) -> Result<ApiPayload, WalletApiError> {
    if let Some(error) = outcome.error.as_deref().filter(|e| !e.is_empty()) {
        return Err(WalletApiError::Transport {
            message: error.to_string(),
            response: outcome.to_raw_response(),
        });
    }

    let status = outcome.status.unwrap_or(0);
    if status != 200 {
        return Err(WalletApiError::HttpStatus {
            status,
            response: outcome.to_raw_response(),
        });
    }

    let body = outcome.body.as_deref().unwrap_or_default();
    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(e) => {
            return Err(WalletApiError::Decode {
                message: e.to_string(),
                response: outcome.to_raw_response(),
            });
        },
    };

    let failure_flagged = value
        .as_object()
        .is_some_and(|map| map.get("success").is_some_and(is_falsy));
    if failure_flagged {
        let mut message = value
            .get("error")
            .and_then(value_text)
            .unwrap_or_else(|| UNKNOWN_API_ERROR.to_string());
        if let Some(detail) = value.get("message").and_then(value_text) {
            message.push_str(": ");
            message.push_str(&detail);
        }
        return Err(WalletApiError::Application {
            message,
            response: outcome.to_raw_response(),
        });
    }

    Ok(ApiPayload::new(value))
}

/// `null` counts as "not set", so it is never falsy here.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
