//! Read command implementation

use std::path::Path;

use corelink_dfu::{Flasher, Target};

use super::{flash_options, prober, spinner};
use crate::cli::DfuArgs;
use crate::config::Config;

/// Run the read command
pub fn run_read(
    config: &Config,
    args: &DfuArgs,
    target: Target,
    output: &Path,
    leave: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let region = target.region();

    let device = prober(config).find_compatible_device()?;
    println!("Found device {device} in update mode");

    let flasher = Flasher::with_options(device, flash_options(config, args));

    let pb = spinner(format!("Reading {} into {}...", region.name, output.display()));
    let result = flasher.read(region, output, leave);
    match &result {
        Ok(()) => {
            pb.finish_with_message(format!("Read {} into {}", region.name, output.display()))
        }
        Err(_) => pb.abandon_with_message("Transfer failed"),
    }
    result?;

    Ok(())
}
