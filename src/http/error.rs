//! Error types for wallet API calls.
//!
//! This module defines the [`WalletApiError`] enum which encompasses every
//! way a call against the wallet API can fail. Each variant carries the
//! [`RawResponse`] recorded for the call, so callers can inspect what the
//! server actually sent back without a second accessor call.

use thiserror::Error;

use super::types::RawResponse;

/// Fallback text used when the server flags a failure without an `error` field.
pub const UNKNOWN_API_ERROR: &str = "Unknown API error";

/// The stage of the response pipeline at which a call failed.
///
/// Stages are checked in declaration order; the first one that matches wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The parameters could not be encoded, so nothing was sent.
    InvalidRequest,
    /// DNS, connect, TLS or timeout failure surfaced by the networking layer.
    Transport,
    /// The server answered with a status other than `200`.
    HttpStatus,
    /// The body of a `200` response was not valid JSON.
    Decode,
    /// The payload explicitly flagged `success: false`.
    Application,
}

/// Errors that can occur during a wallet API call.
///
/// The `Display` output of each variant is the human-readable message that
/// is also stored as the client's last error.
///
/// # Example
///
/// ```rust,no_run
/// use pify_wallet_client::http::{FailureKind, WalletApiError};
///
/// fn report(err: &WalletApiError) {
///     match err.kind() {
///         FailureKind::Transport => eprintln!("network problem: {}", err),
///         FailureKind::HttpStatus => eprintln!("server said no: {}", err),
///         _ => eprintln!("{}", err),
///     }
///     eprintln!("raw body: {:?}", err.raw_response().body);
/// }
/// ```
#[derive(Debug, Clone, Error)]
pub enum WalletApiError {
    /// The request body could not be encoded (e.g. a NaN amount).
    ///
    /// No request was sent, so the recorded response is empty.
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String, response: RawResponse },

    /// The request never produced a complete response.
    ///
    /// This covers connection refused, DNS resolution failures, TLS
    /// handshake or certificate verification failures, timeouts, and a base
    /// URL that cannot be parsed. It takes precedence over any status code
    /// that may have been received before the failure.
    #[error("Transport error: {message}")]
    Transport {
        /// Error text reported by the networking layer.
        message: String,
        response: RawResponse,
    },

    /// The server returned a status code other than `200`.
    ///
    /// The body is not inspected, even when it holds a JSON failure envelope.
    #[error("HTTP Error: {status}")]
    HttpStatus { status: u16, response: RawResponse },

    /// A `200` response whose body is not valid JSON.
    #[error("JSON decode error: {message}")]
    Decode {
        /// The parser's own description of the problem.
        message: String,
        response: RawResponse,
    },

    /// The server flagged the call as failed with `"success": false`.
    ///
    /// `message` is the payload's `error` field (or [`UNKNOWN_API_ERROR`]),
    /// followed by `": <message>"` when the payload also has a `message` field.
    #[error("{message}")]
    Application { message: String, response: RawResponse },
}

impl WalletApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            WalletApiError::InvalidRequest { .. } => FailureKind::InvalidRequest,
            WalletApiError::Transport { .. } => FailureKind::Transport,
            WalletApiError::HttpStatus { .. } => FailureKind::HttpStatus,
            WalletApiError::Decode { .. } => FailureKind::Decode,
            WalletApiError::Application { .. } => FailureKind::Application,
        }
    }

    /// The raw outcome recorded for the failed call.
    pub fn raw_response(&self) -> &RawResponse {
        match self {
            WalletApiError::InvalidRequest { response, .. }
            | WalletApiError::Transport { response, .. }
            | WalletApiError::HttpStatus { response, .. }
            | WalletApiError::Decode { response, .. }
            | WalletApiError::Application { response, .. } => response,
        }
    }

    /// The human-readable failure message, identical to the `Display` output.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawResponse {
        RawResponse {
            http_code: 500,
            body: Some("oops".to_string()),
            error: None,
        }
    }

    #[test]
    fn messages_name_the_failure_stage() {
        let err = WalletApiError::HttpStatus {
            status: 500,
            response: raw(),
        };
        assert_eq!(err.message(), "HTTP Error: 500");
        assert_eq!(err.kind(), FailureKind::HttpStatus);

        let err = WalletApiError::Transport {
            message: "connection refused".to_string(),
            response: RawResponse::default(),
        };
        assert_eq!(err.to_string(), "Transport error: connection refused");

        let err = WalletApiError::Application {
            message: "Insufficient funds: balance 3.00".to_string(),
            response: raw(),
        };
        assert_eq!(err.to_string(), "Insufficient funds: balance 3.00");
    }

    #[test]
    fn invalid_request_has_an_empty_response() {
        let err = WalletApiError::InvalidRequest {
            message: "amount must be a finite number, got NaN".to_string(),
            response: RawResponse::default(),
        };
        assert_eq!(err.kind(), FailureKind::InvalidRequest);
        assert_eq!(err.to_string(), "Invalid request: amount must be a finite number, got NaN");
        assert_eq!(err.raw_response().http_code, 0);
    }

    #[test]
    fn raw_response_is_reachable_from_every_variant() {
        let err = WalletApiError::Decode {
            message: "expected value at line 1 column 1".to_string(),
            response: raw(),
        };
        assert_eq!(err.raw_response().body.as_deref(), Some("oops"));
        assert_eq!(err.kind(), FailureKind::Decode);
    }
}
