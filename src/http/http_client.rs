// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::time::{Duration, Instant};

use log::{debug, warn};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tokio::sync::RwLock;
use url::Url;

use super::envelope::{TransportOutcome, classify};
use super::error::WalletApiError;
use super::types::{ApiPayload, RawResponse};

pub const DEFAULT_BASE_URL: &str = "https://pify.cc";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = "Pify-WalletApiClient/1.0";

/// A request to one endpoint. The verb decides where the parameters go.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ApiRequest {
    /// Parameters are appended as a URL-encoded query string when non-empty.
    Get { query: Vec<(String, String)> },
    /// Parameters are sent as a JSON body.
    Post { body: Value },
}

impl ApiRequest {
    fn method_name(&self) -> &'static str {
        match self {
            ApiRequest::Get { .. } => "GET",
            ApiRequest::Post { .. } => "POST",
        }
    }
}

#[derive(Debug, Clone)]
struct LastOutcome {
    response: RawResponse,
    error: Option<String>,
    latency: Duration,
}

pub(crate) struct HttpClient {
    base_url: String,
    api_token: String,
    timeout: Duration,
    client: reqwest::Client,
    last_outcome: RwLock<Option<LastOutcome>>,
}

impl HttpClient {
    pub fn new(api_token: String) -> Result<Self, anyhow::Error> {
        Self::with_config(
            DEFAULT_BASE_URL,
            api_token,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn with_config(base_url: &str, api_token: String, timeout: Duration) -> Result<Self, anyhow::Error> {
        // Idle connections are dropped as soon as a call completes. Redirects
        // are reported as HTTP failures, never followed.
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(0)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            base_url: normalize_base_url(base_url),
            api_token,
            timeout,
            client,
            last_outcome: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: &str) {
        self.base_url = normalize_base_url(base_url);
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// A zero duration disables the timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Executes one call and records its raw outcome before classifying it.
    pub async fn send_request(&self, path: &str, request: ApiRequest) -> Result<ApiPayload, WalletApiError> {
        let start = Instant::now();
        let method = request.method_name();

        let outcome = self.perform(path, request).await;
        let latency = start.elapsed();
        let result = classify(&outcome);

        *self.last_outcome.write().await = Some(LastOutcome {
            response: outcome.to_raw_response(),
            error: result.as_ref().err().map(|e| e.to_string()),
            latency,
        });

        match &result {
            Ok(_) => debug!(
                method = method,
                path = path,
                elapsed_ms = latency.as_millis() as u64;
                "HTTP: Request succeeded"
            ),
            Err(e) => warn!(
                method = method,
                path = path,
                kind:? = e.kind(),
                http_code = e.raw_response().http_code,
                error:% = e;
                "HTTP: Request failed"
            ),
        }

        result
    }

    async fn perform(&self, path: &str, request: ApiRequest) -> TransportOutcome {
        let mut url = match Url::parse(&format!("{}{}", self.base_url, path)) {
            Ok(url) => url,
            Err(e) => {
                return TransportOutcome {
                    error: Some(format!("invalid URL '{}{}': {}", self.base_url, path, e)),
                    ..Default::default()
                };
            },
        };

        let req = match request {
            ApiRequest::Get { query } => {
                if !query.is_empty() {
                    url.query_pairs_mut()
                        .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
                }
                debug!(url:% = url; "HTTP: GET");
                self.client.get(url)
            },
            ApiRequest::Post { body } => {
                debug!(url:% = url; "HTTP: POST");
                self.client.post(url).body(body.to_string())
            },
        };

        let mut req = req
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, "application/json");
        if !self.timeout.is_zero() {
            req = req.timeout(self.timeout);
        }

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                return TransportOutcome {
                    error: Some(error_chain(&e)),
                    ..Default::default()
                };
            },
        };

        let status = resp.status().as_u16();
        match resp.text().await {
            Ok(body) => TransportOutcome {
                status: Some(status),
                body: Some(body),
                error: None,
            },
            Err(e) => TransportOutcome {
                status: Some(status),
                body: None,
                error: Some(error_chain(&e)),
            },
        }
    }

    /// Records a call that was refused before anything was sent.
    pub async fn record_rejected(&self, error: &WalletApiError) {
        *self.last_outcome.write().await = Some(LastOutcome {
            response: error.raw_response().clone(),
            error: Some(error.to_string()),
            latency: Duration::ZERO,
        });
    }

    pub async fn last_error(&self) -> Option<String> {
        self.last_outcome.read().await.as_ref().and_then(|o| o.error.clone())
    }

    pub async fn last_response(&self) -> Option<RawResponse> {
        self.last_outcome.read().await.as_ref().map(|o| o.response.clone())
    }

    pub async fn get_latency(&self) -> Option<Duration> {
        self.last_outcome.read().await.as_ref().map(|o| o.latency)
    }
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// reqwest's top-level message omits the cause ("connection refused", "timed out").
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
