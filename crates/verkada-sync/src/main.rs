//! Verkada Sync - one-shot driver for the Verkada Access Control connector

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod provision;
mod sync;


use crate::config::{Overrides, Settings};
use verkada_client::{HttpClient, VerkadaClient};
use verkada_connector::VerkadaConnector;
use verkada_core::Connector;

#[derive(Debug, Parser)]
#[command(name = "verkada-sync", version, about = "Sync Verkada Access Control users and groups")]
struct Cli {
    /// Verkada API key (or BATON_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Verkada API host
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[arg(long, global = true)]
    request_timeout_secs: Option<u64>,

    /// Access-record lookups in flight while resolving group members
    #[arg(long, global = true)]
    membership_concurrency: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check the API key against Verkada
    Validate,
    /// Run one full sync pass and print the snapshot as JSON
    Sync,
    /// Add a user to an access group
    Grant {
        #[arg(long)]
        group: String,
        #[arg(long)]
        user: String,
    },
    /// Remove a user from an access group
    Revoke {
        #[arg(long)]
        group: String,
        #[arg(long)]
        user: String,
    },
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            request_timeout_secs: self.request_timeout_secs,
            membership_concurrency: self.membership_concurrency,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.overrides()).context("Failed to load configuration")?;
    settings.validate()?;

    info!("Starting verkada-sync v{}", env!("CARGO_PKG_VERSION"));

    let connector = build_connector(&settings)?;
    let cancel = CancellationToken::new();
    spawn_ctrl_c_handler(cancel.clone());

    match cli.command {
        Command::Validate => {
            connector.validate(&cancel).await?;
            println!("API credentials are valid");
        }
        Command::Sync => {
            let snapshot = sync::run_sync(&connector, &cancel).await?;
            let output =
                serde_json::to_string_pretty(&snapshot).context("Failed to encode snapshot")?;
            println!("{}", output);
        }
        Command::Grant { group, user } => {
            let grant = provision::grant_membership(&connector, &cancel, &group, &user).await?;
            println!("granted {}", grant.id);
        }
        Command::Revoke { group, user } => {
            let grant = provision::revoke_membership(&connector, &cancel, &group, &user).await?;
            println!("revoked {}", grant.id);
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,verkada_client=debug,verkada_connector=debug,verkada_sync=debug")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn build_connector(settings: &Settings) -> Result<VerkadaConnector> {
    let http = HttpClient::new(settings.request_timeout_secs)
        .context("Failed to create HTTP client")?;
    let client = VerkadaClient::new(http, settings.api_key.clone())?
        .with_base_url(settings.base_url.clone());

    info!(base_url = client.base_url(), "Verkada client configured");

    Ok(VerkadaConnector::with_membership_concurrency(
        Arc::new(client),
        settings.membership_concurrency,
    ))
}

fn spawn_ctrl_c_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling");
            cancel.cancel();
        }
    });
}
