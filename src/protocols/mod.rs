// SPDX-License-Identifier: GPL-3.0-only
//! Monitor control protocols
//!
//! The protocol engine never talks to hardware directly. It drives a
//! [`Transport`], which performs one raw HID report request at a time and
//! can block until the device signals completion.

pub mod eizo_hid;

#[cfg(feature = "hidapi-transport")]
pub mod hidraw;

#[cfg(test)]
pub(crate) mod mock;

use crate::error::TransportError;

/// HID report class targeted by a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    Input,
    Output,
    Feature,
}

/// HID class request issued on the control pipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    GetReport,
    SetReport,
}

/// Synchronous request/response channel to one physical device
pub trait Transport: Send {
    /// Issue a raw report request
    ///
    /// For `SetReport` the buffer is sent to the device. For `GetReport` the
    /// device's answer is written into the same buffer. Returns the number
    /// of bytes transferred.
    fn raw_request(
        &mut self,
        report_id: u8,
        buf: &mut [u8],
        report_type: ReportType,
        request: RequestType,
    ) -> Result<usize, TransportError>;

    /// Block until the device has finished processing the last request
    fn wait(&mut self) -> Result<(), TransportError>;
}
