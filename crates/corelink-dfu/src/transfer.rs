//! Read and write transfers through the external programmer

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use crate::align;
use crate::device::DeviceId;
use crate::error::{Error, Result};
use crate::process;
use crate::region::MemoryRegion;

/// Transfer direction relative to the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Read,
    Write,
}

/// Execution options for programmer invocations
#[derive(Debug, Clone)]
pub struct FlashOptions {
    /// Programmer executable name or path
    pub program: String,
    /// Prefix invocations with `sudo`
    pub sudo: bool,
    /// Bound on a single transfer; `None` waits for the process to exit
    pub timeout: Option<Duration>,
}

impl Default for FlashOptions {
    fn default() -> Self {
        Self {
            program: "dfu-util".into(),
            sudo: false,
            timeout: None,
        }
    }
}

/// Drives DFU transfers against one probed device.
///
/// A transfer is atomic from the caller's perspective: it either runs to
/// a zero exit status or fails with the captured diagnostics. Nothing is
/// retried here; the operator decides whether to run the command again.
pub struct Flasher {
    device: DeviceId,
    options: FlashOptions,
}

impl Flasher {
    /// Create a flasher for a probed device with default options
    pub fn new(device: DeviceId) -> Self {
        Self::with_options(device, FlashOptions::default())
    }

    /// Create a flasher with explicit execution options
    pub fn with_options(device: DeviceId, options: FlashOptions) -> Self {
        Self { device, options }
    }

    /// Write a local file into a flash region.
    ///
    /// The source file is padded to an even length first; the transfer
    /// protocol rejects odd-sized images. With `leave` set the device
    /// exits update mode once the transfer completes.
    pub fn write(&self, region: &MemoryRegion, source: &Path, leave: bool) -> Result<()> {
        align::ensure_even_length(source)?;
        self.transfer(transfer_args(
            self.device,
            region,
            Direction::Write,
            source,
            leave,
        ))
    }

    /// Read a flash region into a local file.
    ///
    /// Regions with a catalog read length produce a bounded read; the
    /// others read to the end of the region.
    pub fn read(&self, region: &MemoryRegion, dest: &Path, leave: bool) -> Result<()> {
        self.transfer(transfer_args(
            self.device,
            region,
            Direction::Read,
            dest,
            leave,
        ))
    }

    fn transfer(&self, args: Vec<OsString>) -> Result<()> {
        let mut cmd = if self.options.sudo {
            let mut cmd = Command::new("sudo");
            cmd.arg(&self.options.program);
            cmd
        } else {
            Command::new(&self.options.program)
        };
        cmd.args(&args);

        log::debug!("running {} {:?}", self.options.program, args);
        let captured = process::run(cmd, self.options.timeout)?;

        if captured.status.success() {
            log::trace!("programmer output:\n{}", captured.stdout);
            Ok(())
        } else {
            Err(Error::Transfer {
                program: self.options.program.clone(),
                status: captured.status,
                stdout: captured.stdout,
                stderr: captured.stderr,
            })
        }
    }
}

/// Compose the argument vector for one transfer.
///
/// An explicit vector, rather than a formatted shell line, keeps paths
/// containing whitespace or shell metacharacters intact.
fn transfer_args(
    device: DeviceId,
    region: &MemoryRegion,
    direction: Direction,
    path: &Path,
    leave: bool,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-d".into(),
        device.to_string().into(),
        "-a".into(),
        region.interface.to_string().into(),
        "-i".into(),
        "0".into(),
        "-s".into(),
        address_spec(region, direction, leave).into(),
    ];
    args.push(
        match direction {
            Direction::Write => "-D",
            Direction::Read => "-U",
        }
        .into(),
    );
    args.push(path.as_os_str().to_os_string());
    args
}

/// Build the `-s` operand: address, then `:length` for bounded reads,
/// then `:leave` last
fn address_spec(region: &MemoryRegion, direction: Direction, leave: bool) -> String {
    let mut spec = String::from(region.address);
    if direction == Direction::Read {
        if let Some(length) = region.read_length {
            spec.push_str(&format!(":{length}"));
        }
    }
    if leave {
        spec.push_str(":leave");
    }
    spec
}
