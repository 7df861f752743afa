//! CLI argument parsing

use clap::{Parser, Subcommand};
use corelink_dfu::Target;
use std::path::PathBuf;

/// Parse a flash target name
fn parse_target(s: &str) -> Result<Target, String> {
    s.parse()
}

#[derive(Parser)]
#[command(name = "corelink")]
#[command(author, version, about = "Core device flashing and access-token tool", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Programmer options shared across device commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct DfuArgs {
    /// Run the programmer under sudo
    #[arg(long)]
    pub sudo: bool,

    /// Give up on the transfer after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe for a device in update mode
    Probe,

    /// Write a local file into a flash region
    Write {
        /// File to transfer
        file: PathBuf,

        /// Flash target [firmware, server-key, private-key, factory-reset]
        #[arg(short, long, default_value = "firmware", value_parser = parse_target)]
        target: Target,

        /// Exit update mode when the transfer completes
        #[arg(long)]
        leave: bool,

        #[command(flatten)]
        dfu: DfuArgs,
    },

    /// Read a flash region into a local file
    Read {
        /// Destination file
        output: PathBuf,

        /// Flash target [firmware, server-key, private-key, factory-reset]
        #[arg(short, long, default_value = "firmware", value_parser = parse_target)]
        target: Target,

        /// Exit update mode when the transfer completes
        #[arg(long)]
        leave: bool,

        #[command(flatten)]
        dfu: DfuArgs,
    },

    /// Manage cloud access tokens (requires username/password)
    #[command(subcommand)]
    Token(TokenCommands),
}

/// Access-token subcommands
#[derive(Subcommand)]
pub enum TokenCommands {
    /// List all access tokens for your account
    List,

    /// Revoke an access token (not yet implemented)
    Revoke {
        /// Token to revoke
        token: String,
    },

    /// Create a new access token (not yet implemented)
    New,
}
