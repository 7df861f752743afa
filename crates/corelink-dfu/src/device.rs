//! Device identity and update-mode probing

use std::fmt;
use std::process::Command;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::process;

/// USB vendor/product pair identifying a device in update mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceId {
    /// USB vendor ID
    pub vendor: u16,
    /// USB product ID
    pub product: u16,
}

impl DeviceId {
    /// Create an identifier from raw vendor and product IDs
    pub const fn new(vendor: u16, product: u16) -> Self {
        Self { vendor, product }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vendor, self.product)
    }
}

impl FromStr for DeviceId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        let (vendor, product) = s
            .split_once(':')
            .ok_or_else(|| format!("expected vvvv:pppp, got {s:?}"))?;
        let vendor =
            u16::from_str_radix(vendor, 16).map_err(|e| format!("invalid vendor ID: {e}"))?;
        let product =
            u16::from_str_radix(product, 16).map_err(|e| format!("invalid product ID: {e}"))?;
        Ok(Self::new(vendor, product))
    }
}

/// The Core bootloader as it enumerates in update mode
pub const CORE_DFU: DeviceId = DeviceId::new(0x1d50, 0x607f);

/// Identifiers the prober treats as flashable by default
pub const KNOWN_DEVICES: &[DeviceId] = &[CORE_DFU];

/// How long device enumeration may take before the probe gives up
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(6);

/// Locates a compatible device by scanning the programmer's list output
pub struct Prober {
    program: String,
    devices: Vec<DeviceId>,
    timeout: Duration,
}

impl Default for Prober {
    fn default() -> Self {
        Self::new("dfu-util")
    }
}

impl Prober {
    /// Create a prober that invokes the given programmer executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            devices: KNOWN_DEVICES.to_vec(),
            timeout: PROBE_TIMEOUT,
        }
    }

    /// Replace the set of identifiers considered compatible
    pub fn with_devices(mut self, devices: Vec<DeviceId>) -> Self {
        self.devices = devices;
        self
    }

    /// Override the enumeration window
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enumerate attached devices and return the first known identifier.
    ///
    /// Runs the programmer in list mode and scans its output. The caller
    /// passes the returned identifier on to [`crate::Flasher::new`]; the
    /// prober keeps no state between calls.
    pub fn find_compatible_device(&self) -> Result<DeviceId> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-l");

        let captured = process::run(cmd, Some(self.timeout)).map_err(|e| match e {
            Error::Timeout { .. } => Error::ProbeTimeout { after: self.timeout },
            other => other,
        })?;

        match scan_output(&captured.stdout, &self.devices) {
            Some(id) => {
                log::info!("found device {id} in update mode");
                Ok(id)
            }
            None => Err(Error::NoDeviceFound {
                output: captured.stdout,
            }),
        }
    }
}

/// Find the first known identifier appearing anywhere in the list output
fn scan_output(output: &str, known: &[DeviceId]) -> Option<DeviceId> {
    known
        .iter()
        .copied()
        .find(|id| output.contains(&id.to_string()))
}
