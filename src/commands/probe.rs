//! Probe command implementation

use corelink_dfu::Prober;

/// Run the probe command
pub fn run_probe(prober: &Prober) -> Result<(), Box<dyn std::error::Error>> {
    let device = prober.find_compatible_device()?;
    println!("Found device {device} in update mode");
    Ok(())
}
