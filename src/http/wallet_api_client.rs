//! High-level client for the Pify wallet API.
//!
//! This module provides the [`WalletApiClient`] struct, the primary interface
//! for reading balances and history and for moving funds between wallets.
//!
//! # Overview
//!
//! Every method shapes its typed arguments into the endpoint's parameters and
//! hands them to the internal request executor, which enforces one response
//! contract for all endpoints:
//!
//! - a `200` response holding valid JSON without a falsy `success` flag is
//!   returned unchanged as an [`ApiPayload`]
//! - anything else is a [`WalletApiError`] naming the stage that failed
//!
//! No call is ever retried.
//!
//! # Example
//!
//! ```rust,no_run
//! use pify_wallet_client::http::{Amount, WalletApiClient};
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let client = WalletApiClient::new("my-api-token")?;
//!
//! let amount: Amount = "10.5".parse()?;
//! match client.transfer(1, "w2", amount, Some("rent")).await {
//!     Ok(payload) => println!("sent: {:?}", payload.get("transaction_id")),
//!     Err(e) => eprintln!("transfer failed: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::ClientConfig;
use crate::log::{mask_amount, mask_string};

use super::error::WalletApiError;
use super::http_client::{ApiRequest, HttpClient};
use super::types::{
    Amount, ApiPayload, CheckTransferRequest, ExternalTransferRequest, HistoryQuery, Period, RawResponse,
    TransferRequest, WalletId,
};

/// Client for the Pify wallet HTTP API.
///
/// Holds the base URL (default `https://pify.cc`), the bearer token, and the
/// request timeout (default 30 seconds). The token cannot be changed after
/// construction; the base URL and timeout can be changed between calls.
///
/// Calls take `&self` and record their raw outcome, which can be read back
/// with [`last_error`](Self::last_error) and
/// [`last_response`](Self::last_response). When calls are issued
/// concurrently on one client, those accessors reflect whichever call
/// finished last; use the returned `Result` instead.
pub struct WalletApiClient {
    http_client: HttpClient,
}

impl WalletApiClient {
    /// Creates a client against the default base URL with a 30 second timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized (e.g. TLS
    /// backend initialization failure).
    pub fn new(api_token: impl Into<String>) -> Result<Self, anyhow::Error> {
        let http_client = HttpClient::new(api_token.into())?;
        Ok(Self { http_client })
    }

    /// Creates a client from loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, anyhow::Error> {
        let http_client = HttpClient::with_config(
            &config.base_url,
            config.api_token.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self { http_client })
    }

    /// Sets the base URL. Trailing slashes are removed so paths never double up.
    pub fn set_base_url(&mut self, url: &str) -> &mut Self {
        self.http_client.set_base_url(url);
        self
    }

    /// Sets the timeout, in seconds, applied to every subsequent call.
    /// `0` means no limit.
    pub fn set_timeout(&mut self, timeout_secs: u64) -> &mut Self {
        self.http_client.set_timeout(Duration::from_secs(timeout_secs));
        self
    }

    pub fn base_url(&self) -> &str {
        self.http_client.base_url()
    }

    pub fn timeout(&self) -> Duration {
        self.http_client.timeout()
    }

    /// The failure message of the most recent call, or `None` if it succeeded
    /// or no call has been made.
    pub async fn last_error(&self) -> Option<String> {
        self.http_client.last_error().await
    }

    /// Status code, raw body and transport error text of the most recent call.
    pub async fn last_response(&self) -> Option<RawResponse> {
        self.http_client.last_response().await
    }

    /// Round-trip time of the most recent call.
    pub async fn get_last_request_latency(&self) -> Option<Duration> {
        self.http_client.get_latency().await
    }

    /// Balances of all wallets belonging to the token's owner.
    pub async fn get_balance(&self) -> Result<ApiPayload, WalletApiError> {
        debug!("API: Requesting balances");
        self.get("/api/balance", Vec::new()).await
    }

    /// Operation history, optionally narrowed to one wallet, paged and filtered.
    pub async fn get_history(&self, query: &HistoryQuery) -> Result<ApiPayload, WalletApiError> {
        debug!(
            page = query.page.unwrap_or(1),
            filters = query.filters.len();
            "API: Requesting history"
        );
        self.get("/api/history", query.to_query_pairs()).await
    }

    /// Transfers funds to another wallet, identified by wallet ID or address.
    ///
    /// `comment` is sent as an empty string when `None`.
    pub async fn transfer(
        &self,
        from_wallet_id: WalletId,
        to_identifier: &str,
        amount: impl Into<Amount>,
        comment: Option<&str>,
    ) -> Result<ApiPayload, WalletApiError> {
        let request = TransferRequest {
            from_wallet_id,
            to_identifier: to_identifier.to_string(),
            amount: amount.into(),
            comment: comment.unwrap_or_default().to_string(),
        };
        let to = mask_string(&request.to_identifier);
        let amount = mask_amount(request.amount);
        info!(
            target: "audit",
            from_wallet_id = from_wallet_id,
            to = &*to,
            amount = &*amount;
            "API: Submitting transfer"
        );

        let result = self.post("/api/transfer", &request).await;
        log_transfer_result("transfer", &result);
        result
    }

    /// Transfers funds to an address outside the service.
    ///
    /// `comment` is sent as an empty string when `None`.
    pub async fn transfer_external(
        &self,
        from_wallet_id: WalletId,
        to_address: &str,
        amount: impl Into<Amount>,
        comment: Option<&str>,
    ) -> Result<ApiPayload, WalletApiError> {
        let request = ExternalTransferRequest {
            from_wallet_id,
            to_address: to_address.to_string(),
            amount: amount.into(),
            comment: comment.unwrap_or_default().to_string(),
        };
        let to = mask_string(&request.to_address);
        let amount = mask_amount(request.amount);
        info!(
            target: "audit",
            from_wallet_id = from_wallet_id,
            to = &*to,
            amount = &*amount;
            "API: Submitting external transfer"
        );

        let result = self.post("/api/transfer-external", &request).await;
        log_transfer_result("transfer_external", &result);
        result
    }

    /// Asks the server whether a transfer of `amount` from the wallet would be accepted.
    pub async fn check_transfer(
        &self,
        from_wallet_id: WalletId,
        amount: impl Into<Amount>,
    ) -> Result<ApiPayload, WalletApiError> {
        let request = CheckTransferRequest {
            from_wallet_id,
            amount: amount.into(),
        };
        debug!(from_wallet_id = from_wallet_id; "API: Checking transfer");
        self.post("/api/check-transfer", &request).await
    }

    /// Operation statistics over `period`. [`Period::default`] is a month.
    pub async fn get_statistics(&self, period: Period) -> Result<ApiPayload, WalletApiError> {
        debug!(period = period.as_str(); "API: Requesting statistics");
        self.get("/api/statistics", vec![("period".to_string(), period.to_string())])
            .await
    }

    pub async fn get_wallet_info(&self, wallet_id: WalletId) -> Result<ApiPayload, WalletApiError> {
        debug!(wallet_id = wallet_id; "API: Requesting wallet info");
        self.get("/api/wallet-info", vec![("wallet_id".to_string(), wallet_id.to_string())])
            .await
    }

    async fn get(&self, path: &str, query: Vec<(String, String)>) -> Result<ApiPayload, WalletApiError> {
        self.http_client.send_request(path, ApiRequest::Get { query }).await
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiPayload, WalletApiError> {
        let body = match serde_json::to_value(body) {
            Ok(body) => body,
            Err(e) => {
                let err = WalletApiError::InvalidRequest {
                    message: e.to_string(),
                    response: RawResponse::default(),
                };
                warn!(path = path, error:% = err; "API: Request not sent");
                self.http_client.record_rejected(&err).await;
                return Err(err);
            },
        };
        self.http_client.send_request(path, ApiRequest::Post { body }).await
    }
}

fn log_transfer_result(operation: &str, result: &Result<ApiPayload, WalletApiError>) {
    match result {
        Ok(_) => info!(target: "audit", operation = operation; "API: Transfer accepted"),
        Err(e) => {
            let reason = e.to_string();
            warn!(
                target: "audit",
                operation = operation,
                reason = &*reason;
                "API: Transfer rejected"
            )
        },
    }
}
