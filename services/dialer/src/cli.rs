//! Command-line interface for the dialer binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dialer", version, about = "Place and end outbound voice agent calls")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the destination, place the call and store its session config.
    Start(StartArgs),
    /// Hang up a call placed earlier, looked up by conversation id.
    End(EndArgs),
}

#[derive(Args, Debug, Clone)]
pub struct StartArgs {
    /// Number to call.
    #[arg(long)]
    pub to: String,
    /// Caller id; falls back to FROM_PHONE.
    #[arg(long)]
    pub from: Option<String>,
    /// DTMF digits to send once the call connects.
    #[arg(long)]
    pub digits: Option<String>,
    /// Skip the mobile line-type check.
    #[arg(long)]
    pub allow_landline: bool,
    #[arg(long)]
    pub conversation_id: Option<String>,
    /// JSON file holding the agent config.
    #[arg(long, conflicts_with_all = ["prompt", "initial_message"])]
    pub agent_config: Option<PathBuf>,
    /// Prompt preamble for the default chat agent.
    #[arg(long)]
    pub prompt: Option<String>,
    #[arg(long)]
    pub initial_message: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct EndArgs {
    #[arg(long)]
    pub conversation_id: String,
}
