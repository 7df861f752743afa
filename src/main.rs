//! corelink - Core device flashing and access-token CLI
//!
//! The device side drives the external `dfu-util` programmer: it probes
//! for a board in update mode and reads or writes the fixed flash
//! regions (application firmware, cloud keys, factory-reset image). The
//! cloud side talks to the account API for access-token management.

mod cli;
mod cloud;
mod commands;
mod config;

use clap::Parser;
use cli::{Cli, Commands, TokenCommands};
use cloud::ApiClient;
use config::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Probe => commands::probe::run_probe(&commands::prober(&config)),
        Commands::Write {
            file,
            target,
            leave,
            dfu,
        } => commands::write::run_write(&config, &dfu, target, &file, leave),
        Commands::Read {
            output,
            target,
            leave,
            dfu,
        } => commands::read::run_read(&config, &dfu, target, &output, leave),
        Commands::Token(subcmd) => match subcmd {
            TokenCommands::List => {
                let api = ApiClient::new(config.api_url.clone());
                commands::token::run_list(&api, &config)
            }
            TokenCommands::Revoke { token } => commands::token::run_revoke(&token),
            TokenCommands::New => commands::token::run_new(),
        },
    }
}
