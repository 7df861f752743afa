//! Write command implementation

use std::path::Path;

use corelink_dfu::{Flasher, Target};

use super::{flash_options, prober, spinner};
use crate::cli::DfuArgs;
use crate::config::Config;

/// Run the write command
pub fn run_write(
    config: &Config,
    args: &DfuArgs,
    target: Target,
    file: &Path,
    leave: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let region = target.region();

    let device = prober(config).find_compatible_device()?;
    println!("Found device {device} in update mode");

    let flasher = Flasher::with_options(device, flash_options(config, args));

    let pb = spinner(format!("Writing {} to {}...", file.display(), region.name));
    let result = flasher.write(region, file, leave);
    match &result {
        Ok(()) => pb.finish_with_message(format!("Wrote {} to {}", file.display(), region.name)),
        Err(_) => pb.abandon_with_message("Transfer failed"),
    }
    result?;

    if leave {
        println!("Device is leaving update mode");
    }
    Ok(())
}
