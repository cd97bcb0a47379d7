use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use log::{debug, error};

use pify_wallet_client::cli::{Cli, Commands, history_query};
use pify_wallet_client::config::load_configuration;
use pify_wallet_client::http::{ApiPayload, WalletApiClient, WalletApiError};
use pify_wallet_client::log::init_logging;

#[tokio::main]
async fn main() -> Result<ExitCode, anyhow::Error> {
    init_logging();
    let cli = Cli::parse();

    let mut config = load_configuration(Path::new(&cli.config))?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(token) = cli.token {
        config.api_token = token;
    }
    if config.api_token.is_empty() {
        bail!("No API token configured: set PIFY_API_TOKEN, pass --token, or add api_token to {}", cli.config);
    }

    let client = WalletApiClient::from_config(&config).context("Could not create wallet API client")?;
    debug!(base_url = client.base_url(); "Wallet API client ready");

    let result = match cli.command {
        Commands::Balance => client.get_balance().await,
        Commands::History {
            wallet_id,
            page,
            page_size,
            filter,
        } => {
            client
                .get_history(&history_query(wallet_id, page, page_size, filter))
                .await
        },
        Commands::Transfer {
            from,
            to,
            amount,
            comment,
        } => client.transfer(from, &to, amount, comment.as_deref()).await,
        Commands::TransferExternal {
            from,
            to,
            amount,
            comment,
        } => {
            client
                .transfer_external(from, &to, amount, comment.as_deref())
                .await
        },
        Commands::CheckTransfer { from, amount } => client.check_transfer(from, amount).await,
        Commands::Statistics { period } => client.get_statistics(period).await,
        Commands::WalletInfo { wallet_id } => client.get_wallet_info(wallet_id).await,
    };

    report(result)
}

fn report(result: Result<ApiPayload, WalletApiError>) -> Result<ExitCode, anyhow::Error> {
    match result {
        Ok(payload) => {
            let rendered = serde_json::to_string_pretty(&payload).context("Could not render response")?;
            println!("{}", rendered);
            Ok(ExitCode::SUCCESS)
        },
        Err(e) => {
            let raw = e.raw_response();
            error!(
                kind:? = e.kind(),
                http_code = raw.http_code;
                "Request failed"
            );
            eprintln!("Error: {}", e);
            Ok(ExitCode::FAILURE)
        },
    }
}
