// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer, ser};
use serde_json::{Map, Value};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Numeric identifier of a wallet owned by the authenticated user.
pub type WalletId = u64;

/// What the transport layer reported for the most recent call.
///
/// `http_code` is `0` when no response was received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    pub http_code: u16,
    pub body: Option<String>,
    pub error: Option<String>,
}

/// A decoded response body, passed through exactly as the server sent it.
///
/// This is usually a JSON object, but any valid JSON document is kept as-is
/// (some endpoints answer with a bare list).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiPayload(Value);

impl ApiPayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Top-level field lookup. Always `None` when the payload is not an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The envelope's `success` flag, if the server sent a boolean one.
    pub fn success(&self) -> Option<bool> {
        self.0.get("success").and_then(Value::as_bool)
    }

    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Reads the payload into a caller-defined type.
    ///
    /// Use `#[serde(flatten)]` on a `Map` field to keep fields the type does
    /// not name.
    pub fn parse_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.0.clone())
    }
}

impl From<Value> for ApiPayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<Map<String, Value>> for ApiPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(Value::Object(map))
    }
}

impl PartialEq<Value> for ApiPayload {
    fn eq(&self, other: &Value) -> bool {
        self.0 == *other
    }
}

/// A transfer amount, always sent to the server as a JSON floating-point number.
///
/// Serializing a non-finite amount (NaN or infinity) fails instead of
/// producing `null`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.is_finite() {
            return Err(ser::Error::custom(format!(
                "amount must be a finite number, got {}",
                self.0
            )));
        }
        serializer.serialize_f64(self.0)
    }
}

macro_rules! amount_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Amount {
                fn from(value: $t) -> Self {
                    Amount(value as f64)
                }
            }
        )*
    };
}

amount_from!(f64, f32, i32, i64, u32, u64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid amount '{0}': expected a finite number")]
pub struct AmountParseError(pub String);

impl FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Amount(value)),
            _ => Err(AmountParseError(s.to_string())),
        }
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reporting window for [`get_statistics`](super::WalletApiClient::get_statistics).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(format!("Unknown period '{}': expected day, week, month or year", other)),
        }
    }
}

/// Parameters for the history endpoint. Unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryQuery {
    pub wallet_id: Option<WalletId>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub filters: Vec<(String, String)>,
}

impl HistoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wallet_id(mut self, wallet_id: WalletId) -> Self {
        self.wallet_id = Some(wallet_id);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Query pairs in field order; filters become `filters[<key>]`.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(wallet_id) = self.wallet_id {
            pairs.push(("wallet_id".to_string(), wallet_id.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("page_size".to_string(), page_size.to_string()));
        }
        for (key, value) in &self.filters {
            pairs.push((format!("filters[{}]", key), value.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferRequest {
    pub from_wallet_id: WalletId,
    pub to_identifier: String,
    pub amount: Amount,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalTransferRequest {
    pub from_wallet_id: WalletId,
    pub to_address: String,
    pub amount: Amount,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckTransferRequest {
    pub from_wallet_id: WalletId,
    pub amount: Amount,
}
