use clap::{Parser, Subcommand};

use crate::http::{Amount, HistoryQuery, Period, WalletId};

#[derive(Parser)]
#[command(name = "pify-wallet")]
#[command(about = "Pify wallet API client", long_about = None)]
pub struct Cli {
    #[arg(
        short,
        long,
        global = true,
        help = "Path to the configuration file",
        default_value = "data/config.toml"
    )]
    pub config: String,
    #[arg(short = 'u', long, global = true, help = "Override the base URL of the wallet API")]
    pub base_url: Option<String>,
    #[arg(short, long, global = true, help = "Override the request timeout in seconds")]
    pub timeout: Option<u64>,
    #[arg(long, global = true, help = "Override the API token (prefer PIFY_API_TOKEN)")]
    pub token: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the balance of every wallet
    Balance,
    /// Show operation history
    History {
        #[arg(short, long, help = "Only show operations of this wallet")]
        wallet_id: Option<WalletId>,
        #[arg(short, long, help = "Page number")]
        page: Option<u32>,
        #[arg(long, help = "Number of operations per page")]
        page_size: Option<u32>,
        #[arg(
            short,
            long,
            value_parser = parse_filter,
            help = "Filter as key=value (e.g., type=transfer). Can be specified multiple times."
        )]
        filter: Vec<(String, String)>,
    },
    /// Transfer funds to another wallet
    Transfer {
        #[arg(short, long, help = "ID of the wallet to send from")]
        from: WalletId,
        #[arg(long, help = "Wallet ID or address of the recipient")]
        to: String,
        #[arg(short, long, help = "Amount to transfer")]
        amount: Amount,
        #[arg(long, help = "Optional comment attached to the transfer")]
        comment: Option<String>,
    },
    /// Transfer funds to an external address
    TransferExternal {
        #[arg(short, long, help = "ID of the wallet to send from")]
        from: WalletId,
        #[arg(long, help = "External address of the recipient")]
        to: String,
        #[arg(short, long, help = "Amount to transfer")]
        amount: Amount,
        #[arg(long, help = "Optional comment attached to the transfer")]
        comment: Option<String>,
    },
    /// Check whether a transfer would be accepted
    CheckTransfer {
        #[arg(short, long, help = "ID of the wallet to send from")]
        from: WalletId,
        #[arg(short, long, help = "Amount to transfer")]
        amount: Amount,
    },
    /// Show operation statistics
    Statistics {
        #[arg(short, long, help = "Period: day, week, month or year", default_value_t = Period::Month)]
        period: Period,
    },
    /// Show details of one wallet
    WalletInfo {
        #[arg(short, long, help = "ID of the wallet")]
        wallet_id: WalletId,
    },
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("Invalid filter '{}': expected key=value", s)),
    }
}

/// Builds the history query from the `history` subcommand's arguments.
pub fn history_query(
    wallet_id: Option<WalletId>,
    page: Option<u32>,
    page_size: Option<u32>,
    filters: Vec<(String, String)>,
) -> HistoryQuery {
    HistoryQuery {
        wallet_id,
        page,
        page_size,
        filters,
    }
}
