// SPDX-License-Identifier: GPL-3.0-only
//! Error types for the crate
//!
//! Exchanges with a monitor fail in exactly three ways: the attribute name is
//! unknown, the per-device state can't be obtained, or the transport reported
//! a failure. Nothing here is retried; each error is local to one call.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which transaction of an exchange failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The single `SET_REPORT` of a write
    Set,
    /// The `SET_REPORT` that primes the device before a read
    Prime,
    /// The `GET_REPORT` that fetches the answer of a read
    Fetch,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Set => "set report",
            Stage::Prime => "prime report",
            Stage::Fetch => "fetch report",
        };
        f.write_str(s)
    }
}

/// Failure reported by a [`Transport`](crate::protocols::Transport)
#[derive(Error, Debug)]
pub enum TransportError {
    /// The raw request returned a negative status
    #[error("request failed with status {0}")]
    Status(i32),

    /// Waiting for the device to complete the request failed
    #[error("device did not signal completion: {0}")]
    Completion(String),

    /// The transport can't issue this kind of request
    #[error("unsupported request: {0}")]
    Unsupported(&'static str),

    /// hidapi error
    #[cfg(feature = "hidapi-transport")]
    #[error("HID error: {0}")]
    Hid(#[from] hidapi::HidError),
}

/// Errors surfaced by the protocol engine
#[derive(Error, Debug)]
pub enum EizoError {
    /// The attribute name is not one the monitor understands
    #[error("Unknown attribute: {0:?}")]
    InvalidAttribute(String),

    /// Per-device state could not be obtained
    #[error("Device state unavailable: {0}")]
    ResourceUnavailable(String),

    /// Any transport-level failure on either transaction of an exchange
    #[error("Communication error on {stage}: {source}")]
    Communication {
        stage: Stage,
        #[source]
        source: TransportError,
    },
}

impl EizoError {
    pub fn is_communication(&self) -> bool {
        matches!(self, EizoError::Communication { .. })
    }
}

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Result type alias for EizoError
pub type Result<T> = std::result::Result<T, EizoError>;
