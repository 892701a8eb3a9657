//! zonebot entry point
//!
//! Reads configuration, checks the Cloudflare token and long-polls Telegram
//! until Ctrl-C.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zonebot::config::{Cli, Config};
use zonebot::controller::MenuController;
use zonebot::transport::telegram::TelegramTransport;
use zonebot_provider::{CloudflareProvider, DnsProvider};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("zonebot: {e}");
            return ExitCode::FAILURE;
        }
    };

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    if config.admins.is_empty() {
        tracing::warn!("No admin ids configured; every chat will be refused");
    }

    let provider =
        CloudflareProvider::with_base_url(config.cf_api_token.clone(), &config.cf_api_base)
            .context("failed to create Cloudflare client")?;
    match provider.verify_token().await {
        Ok(true) => tracing::info!("Cloudflare API token verified"),
        Ok(false) => tracing::warn!("Cloudflare API token is not active"),
        Err(e) => tracing::warn!("Could not verify Cloudflare API token: {e}"),
    }

    let transport = TelegramTransport::new(
        &config.bot_token,
        &config.telegram_api_base,
        config.poll_timeout,
    )
    .context("failed to create Telegram client")?;

    let controller = MenuController::new(Arc::new(provider), config.controller_settings());

    tracing::info!(
        "Starting zonebot ({} admin(s), {} zones / {} records per page)",
        config.admins.len(),
        config.zones_per_page,
        config.records_per_page
    );
    zonebot::app::run(&transport, &controller, shutdown_signal()).await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl-C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
