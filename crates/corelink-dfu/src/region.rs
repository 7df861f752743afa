//! Flash memory region catalog
//!
//! Update mode exposes two memory interfaces: alt setting 0 is the
//! application flash, alt setting 1 is the external store holding keys
//! and the factory-reset image. The catalog below is fixed for the Core
//! hardware; an unknown target is unrepresentable by construction.

use std::fmt;
use std::str::FromStr;

/// Logical flash targets addressable over DFU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Application firmware in main flash
    Firmware,
    /// Public key of the cloud server
    ServerKey,
    /// The device's private key
    PrivateKey,
    /// Image restored by a factory reset
    FactoryReset,
}

/// A fixed window of device memory reachable through a DFU alt setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRegion {
    /// Human-readable region name
    pub name: &'static str,
    /// Memory interface (alt setting) index
    pub interface: u8,
    /// Flash base address, in the form the programmer expects
    pub address: &'static str,
    /// Byte count for bounded reads; writes take their length from the file
    pub read_length: Option<u32>,
}

const FIRMWARE: MemoryRegion = MemoryRegion {
    name: "firmware",
    interface: 0,
    address: "0x08005000",
    read_length: None,
};

const SERVER_KEY: MemoryRegion = MemoryRegion {
    name: "server key",
    interface: 1,
    address: "0x00001000",
    read_length: Some(2048),
};

const PRIVATE_KEY: MemoryRegion = MemoryRegion {
    name: "private key",
    interface: 1,
    address: "0x00002000",
    read_length: Some(1024),
};

const FACTORY_RESET: MemoryRegion = MemoryRegion {
    name: "factory reset",
    interface: 1,
    address: "0x00020000",
    read_length: None,
};

impl Target {
    /// Every target, in catalog order
    pub const ALL: &'static [Target] = &[
        Target::Firmware,
        Target::ServerKey,
        Target::PrivateKey,
        Target::FactoryReset,
    ];

    /// Resolve this target to its fixed memory region
    pub const fn region(self) -> &'static MemoryRegion {
        match self {
            Target::Firmware => &FIRMWARE,
            Target::ServerKey => &SERVER_KEY,
            Target::PrivateKey => &PRIVATE_KEY,
            Target::FactoryReset => &FACTORY_RESET,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Target::Firmware => "firmware",
            Target::ServerKey => "server-key",
            Target::PrivateKey => "private-key",
            Target::FactoryReset => "factory-reset",
        };
        f.write_str(name)
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "firmware" => Ok(Target::Firmware),
            "server-key" => Ok(Target::ServerKey),
            "private-key" => Ok(Target::PrivateKey),
            "factory-reset" => Ok(Target::FactoryReset),
            _ => Err(format!(
                "unknown target {s:?} (expected firmware, server-key, private-key or factory-reset)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_fixed() {
        let firmware = Target::Firmware.region();
        assert_eq!(firmware.interface, 0);
        assert_eq!(firmware.address, "0x08005000");
        assert_eq!(firmware.read_length, None);

        let server_key = Target::ServerKey.region();
        assert_eq!(server_key.interface, 1);
        assert_eq!(server_key.address, "0x00001000");
        assert_eq!(server_key.read_length, Some(2048));

        let private_key = Target::PrivateKey.region();
        assert_eq!(private_key.interface, 1);
        assert_eq!(private_key.address, "0x00002000");
        assert_eq!(private_key.read_length, Some(1024));

        let factory_reset = Target::FactoryReset.region();
        assert_eq!(factory_reset.interface, 1);
        assert_eq!(factory_reset.address, "0x00020000");
        assert_eq!(factory_reset.read_length, None);
    }

    #[test]
    fn test_target_names_round_trip() {
        for &target in Target::ALL {
            assert_eq!(target.to_string().parse::<Target>().unwrap(), target);
        }
        assert!("bootloader".parse::<Target>().is_err());
    }
}
