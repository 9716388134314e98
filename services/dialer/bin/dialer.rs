//! Main Entrypoint for the Ringout Dialer
//!
//! This binary is responsible for:
//! 1. Parsing the command line and loading configuration from the environment.
//! 2. Initializing logging.
//! 3. Building the Twilio client and the file-backed session store.
//! 4. Running the requested command and reporting its outcome.

use anyhow::Context;
use clap::Parser;
use ringout_core::{
    config_manager::{ConfigManager, FileConfigManager},
    telephony::TelephonyClient,
};
use ringout_dialer::{
    cli::{Cli, Command},
    commands::{end_call, start_call},
    config::Config,
};
use ringout_twilio::TwilioClient;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
    info!(twilio = ?config.twilio, sessions_dir = %config.sessions_dir.display(), "Configuration loaded.");

    // --- 3. Initialize Shared Services ---
    let mut twilio = TwilioClient::new(&config.twilio);
    if let Some(api_base) = &config.twilio_api_base {
        twilio = twilio.with_api_base(api_base);
    }
    if let Some(lookups_base) = &config.twilio_lookups_base {
        twilio = twilio.with_lookups_base(lookups_base);
    }
    let telephony: Arc<dyn TelephonyClient> = Arc::new(twilio);
    let store: Arc<dyn ConfigManager> = Arc::new(FileConfigManager::new(&config.sessions_dir));

    // --- 4. Run Command ---
    match cli.command {
        Command::Start(args) => {
            let started = start_call(&config, args, telephony, store).await?;
            println!(
                "conversation_id={} twilio_sid={}",
                started.conversation_id, started.twilio_sid
            );
        }
        Command::End(args) => {
            let completed = end_call(&args.conversation_id, telephony, store).await?;
            println!("completed={}", completed);
            if !completed {
                anyhow::bail!("Provider did not report call '{}' as completed", args.conversation_id);
            }
        }
    }

    Ok(())
}
