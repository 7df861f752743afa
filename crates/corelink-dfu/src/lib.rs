//! corelink-dfu - DFU transfer orchestration for Core devices
//!
//! This crate wraps the external `dfu-util` programmer rather than
//! speaking USB itself: it locates a compatible device in update mode,
//! resolves logical flash targets to fixed memory regions, enforces the
//! even-length precondition on write images, and executes transfers as
//! child processes with captured diagnostics.
//!
//! At most one probe or transfer is in flight at a time; the programmer
//! process serializes device access, so no locking is needed here.
//!
//! # Example
//!
//! ```ignore
//! use corelink_dfu::{Flasher, Prober, Target};
//!
//! let device = Prober::default().find_compatible_device()?;
//! let flasher = Flasher::new(device);
//! flasher.write(Target::Firmware.region(), "image.bin".as_ref(), true)?;
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod align;
pub mod device;
pub mod error;
pub mod process;
pub mod region;
pub mod transfer;

pub use device::{DeviceId, Prober, KNOWN_DEVICES, PROBE_TIMEOUT};
pub use error::{Error, Result};
pub use region::{MemoryRegion, Target};
pub use transfer::{FlashOptions, Flasher};
