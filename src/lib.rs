pub mod cli;
pub mod config;
pub mod http;
pub mod log;

pub use crate::config::{ClientConfig, load_configuration};
pub use crate::http::{Amount, ApiPayload, FailureKind, HistoryQuery, Period, RawResponse, WalletApiClient, WalletApiError};
