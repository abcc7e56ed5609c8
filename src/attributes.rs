// SPDX-License-Identifier: GPL-3.0-only
//! Text attribute surface
//!
//! Each attribute reads as a decimal integer followed by a newline and
//! accepts a decimal integer on write, the same contract as the `settings`
//! sysfs group of the kernel driver. Failures carry the errno that group
//! returned.

use thiserror::Error;

use crate::error::EizoError;
use crate::protocols::Transport;
use crate::protocols::eizo_hid::{Attribute, EizoHidDisplay, UnknownAttribute};

/// Name of the attribute group
pub const ATTRIBUTE_GROUP: &str = "settings";

/// File mode of every attribute (rw-rw-r--)
pub const ATTRIBUTE_MODE: u32 = 0o664;

#[derive(Error, Debug)]
pub enum AttributeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A write reached the engine and failed
    #[error("Write rejected: {0}")]
    PermissionDenied(#[source] EizoError),

    /// A read reached the engine and failed
    #[error("No data: {0}")]
    NoData(#[source] EizoError),
}

impl AttributeError {
    /// Positive errno value for this failure
    pub fn errno(&self) -> i32 {
        match self {
            AttributeError::InvalidArgument(_) => libc::EINVAL,
            AttributeError::PermissionDenied(_) => libc::EPERM,
            AttributeError::NoData(_) => libc::ENODATA,
        }
    }
}

/// Names of all attributes in the group
pub fn names() -> impl Iterator<Item = &'static str> {
    Attribute::ALL.into_iter().map(Attribute::name)
}

/// Read an attribute and format it
pub fn show<T: Transport>(display: &EizoHidDisplay<T>, name: &str) -> Result<String, AttributeError> {
    let attribute = lookup(name)?;
    let value = display
        .read_attribute(attribute)
        .map_err(AttributeError::NoData)?;
    Ok(format!("{value}\n"))
}

/// Parse `buf` and write it to an attribute
///
/// Returns the number of bytes consumed, which is always all of `buf`.
pub fn store<T: Transport>(
    display: &EizoHidDisplay<T>,
    name: &str,
    buf: &str,
) -> Result<usize, AttributeError> {
    let value = parse_value(buf)?;
    let attribute = lookup(name)?;
    display
        .write_attribute(attribute, value)
        .map_err(AttributeError::PermissionDenied)?;
    Ok(buf.len())
}

/// Base-10 integer with an optional sign and at most one trailing newline
pub fn parse_value(buf: &str) -> Result<i32, AttributeError> {
    let digits = buf.strip_suffix('\n').unwrap_or(buf);
    digits
        .parse::<i32>()
        .map_err(|e| AttributeError::InvalidArgument(format!("{buf:?}: {e}")))
}

fn lookup(name: &str) -> Result<Attribute, AttributeError> {
    name.parse()
        .map_err(|e: UnknownAttribute| AttributeError::InvalidArgument(e.to_string()))
}
