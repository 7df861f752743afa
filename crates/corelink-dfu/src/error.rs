//! Error types for DFU orchestration

use std::io;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while probing for a device or driving a transfer
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Device enumeration did not complete within the probe window
    #[error("device enumeration timed out after {after:?}")]
    ProbeTimeout {
        /// The probe window that elapsed
        after: Duration,
    },

    /// Enumeration completed but no known identifier appeared in the output
    #[error("no compatible device found in update mode; programmer reported:\n{output}")]
    NoDeviceFound {
        /// Raw list output, kept for diagnostics
        output: String,
    },

    /// The external programmer exited with a non-zero status
    #[error("{program} failed with {status}\n{stderr}")]
    Transfer {
        /// Programmer executable that was invoked
        program: String,
        /// Exit status of the process
        status: ExitStatus,
        /// Captured standard output
        stdout: String,
        /// Captured standard error
        stderr: String,
    },

    /// A bounded external-process call exceeded its window
    #[error("{program} did not finish within {after:?}")]
    Timeout {
        /// Executable that was still running
        program: String,
        /// The window that elapsed
        after: Duration,
    },

    /// The external programmer could not be launched at all
    #[error("failed to launch {program}: {source}")]
    Spawn {
        /// Executable that could not be started
        program: String,
        /// Underlying spawn error
        #[source]
        source: io::Error,
    },

    /// Local file I/O failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
