//! CLI command implementations
//!
//! Device commands share one flow: probe for a board in update mode,
//! then drive the programmer against the region the user picked. The
//! probed identifier is passed straight into the flasher; nothing is
//! remembered between commands.

use std::time::Duration;

use corelink_dfu::{FlashOptions, Prober};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::DfuArgs;
use crate::config::Config;

pub mod probe;
pub mod read;
pub mod token;
pub mod write;

/// Build a prober from the configuration
pub fn prober(config: &Config) -> Prober {
    match &config.dfu_util {
        Some(program) => Prober::new(program),
        None => Prober::default(),
    }
}

/// Combine configured defaults with per-invocation flags
fn flash_options(config: &Config, args: &DfuArgs) -> FlashOptions {
    let mut options = FlashOptions::default();
    if let Some(program) = &config.dfu_util {
        options.program = program.clone();
    }
    options.sudo = args.sudo || config.sudo_dfu;
    options.timeout = args
        .timeout
        .or(config.transfer_timeout_secs)
        .map(Duration::from_secs);
    options
}

/// Steady-tick spinner shown while the programmer runs
fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags_override_config() {
        let config = Config {
            sudo_dfu: false,
            transfer_timeout_secs: Some(300),
            dfu_util: Some("/usr/local/bin/dfu-util".to_string()),
            ..Config::default()
        };
        let args = DfuArgs {
            sudo: true,
            timeout: Some(60),
        };

        let options = flash_options(&config, &args);
        assert!(options.sudo);
        assert_eq!(options.timeout, Some(Duration::from_secs(60)));
        assert_eq!(options.program, "/usr/local/bin/dfu-util");
    }

    #[test]
    fn test_config_supplies_defaults() {
        let config = Config {
            sudo_dfu: true,
            transfer_timeout_secs: Some(300),
            ..Config::default()
        };
        let args = DfuArgs::default();

        let options = flash_options(&config, &args);
        assert!(options.sudo);
        assert_eq!(options.timeout, Some(Duration::from_secs(300)));
        assert_eq!(options.program, "dfu-util");
    }
}
