//! HTTP client module for the Pify wallet API.
//!
//! This module provides a complete client for the wallet API: balance
//! lookup, transaction history, internal and external transfers, transfer
//! validation, statistics, and wallet metadata.
//!
//! # Architecture
//!
//! - [`WalletApiClient`] - one method per API endpoint
//! - `HttpClient` (crate-private) - the request executor every method goes through
//! - [`classify`] - the ordered interpretation of a finished exchange
//! - [`WalletApiError`] - the failure stages, each carrying the [`RawResponse`]
//! - Request and response types ([`HistoryQuery`], [`Amount`], [`Period`], [`ApiPayload`])
//!
//! # Example
//!
//! ```rust,no_run
//! use pify_wallet_client::http::{HistoryQuery, WalletApiClient};
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let mut client = WalletApiClient::new("my-api-token")?;
//! client.set_timeout(10);
//!
//! let history = client
//!     .get_history(&HistoryQuery::new().wallet_id(3).page(2).filter("type", "transfer"))
//!     .await?;
//! println!("{:?}", history.get("items"));
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Failures are reported in detection order:
//!
//! - Invalid requests (a body that cannot be encoded, such as a NaN amount; nothing is sent)
//! - Transport failures (connection refused, DNS, TLS, timeouts)
//! - HTTP status failures (any status other than `200`)
//! - Decode failures (body is not valid JSON)
//! - Application failures (payload flags `"success": false`)
//!
//! Redirects are not followed; a `3xx` answer is an HTTP status failure.

mod envelope;
mod error;
mod http_client;
mod types;
mod wallet_api_client;

pub use envelope::{TransportOutcome, classify};
pub use error::{FailureKind, UNKNOWN_API_ERROR, WalletApiError};
pub use http_client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, USER_AGENT};
pub use types::{
    Amount, AmountParseError, ApiPayload, CheckTransferRequest, ExternalTransferRequest, HistoryQuery, Period,
    RawResponse, TransferRequest, WalletId,
};
pub use wallet_api_client::WalletApiClient;
