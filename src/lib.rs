// SPDX-License-Identifier: GPL-3.0-only
//! Settings control for EIZO FlexScan monitors over USB HID
//!
//! [`protocols::eizo_hid::EizoHidDisplay`] reads and writes the monitor's
//! brightness, power, gamma and profile through a [`protocols::Transport`].
//! [`attributes`] layers the text get/set surface on top of it, and
//! [`monitor::DisplayManager`] keeps one connection per attached monitor.

#[macro_use]
extern crate tracing;

pub mod attributes;
pub mod config;
pub mod error;
pub mod monitor;
pub mod protocols;

pub use error::{EizoError, Result};
