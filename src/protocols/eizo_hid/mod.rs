// SPDX-License-Identifier: GPL-3.0-only
//! EIZO FlexScan HID control protocol
//!
//! FlexScan monitors (EV2760, EV2460, ...) expose their on-screen settings as
//! vendor-defined HID feature reports. Every request is a 39-byte report
//! carrying a usage identifier, a sequence counter and a 32-bit value.
//!
//! A write is one `SET_REPORT` on report 2. A read primes the device with a
//! `SET_REPORT` on report 3 and collects the answer with a `GET_REPORT` on
//! the same report.

mod device;
pub mod report;
pub mod session;
pub mod usage;

pub use device::EizoHidDisplay;
pub use report::Report;
pub use session::{SessionGuard, SessionState};
pub use usage::{Attribute, UnknownAttribute, resolve};

/// EIZO USB Vendor ID
pub const VENDOR_ID: u16 = 0x056d;

/// Report ID used to set a value
pub const SET_REPORT_ID: u8 = 2;

/// Report ID used to prime and fetch a value
pub const GET_REPORT_ID: u8 = 3;

/// Sequence counter a fresh connection starts with
pub const INITIAL_COUNTER: u16 = 0x0001;
