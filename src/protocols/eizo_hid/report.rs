// SPDX-License-Identifier: GPL-3.0-only
//! 39-byte feature report layout
//!
//! | bytes | field    | encoding    |
//! |-------|----------|-------------|
//! | 0     | reserved | zero        |
//! | 1-4   | usage    | LE u32      |
//! | 5-6   | counter  | LE u16      |
//! | 7-10  | value    | LE i32      |
//! | 11-38 | padding  | zero        |

/// HID feature report size in bytes
pub const REPORT_SIZE: usize = 39;

const USAGE: std::ops::Range<usize> = 1..5;
const COUNTER: std::ops::Range<usize> = 5..7;
const VALUE: std::ops::Range<usize> = 7..11;

/// One request buffer, built fresh for every exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    buf: [u8; REPORT_SIZE],
}

impl Report {
    /// Build a report with an empty value field (used for reads)
    pub fn new(usage: u32, counter: u16) -> Self {
        let mut buf = [0u8; REPORT_SIZE];
        buf[USAGE].copy_from_slice(&usage.to_le_bytes());
        buf[COUNTER].copy_from_slice(&counter.to_le_bytes());
        Self { buf }
    }

    /// Build a report carrying a value (used for writes)
    pub fn with_value(usage: u32, counter: u16, value: i32) -> Self {
        let mut report = Self::new(usage, counter);
        report.buf[VALUE].copy_from_slice(&value.to_le_bytes());
        report
    }

    pub fn usage(&self) -> u32 {
        u32::from_le_bytes([self.buf[1], self.buf[2], self.buf[3], self.buf[4]])
    }

    pub fn counter(&self) -> u16 {
        u16::from_le_bytes([self.buf[5], self.buf[6]])
    }

    /// Decode the value field
    pub fn value(&self) -> i32 {
        i32::from_le_bytes([self.buf[7], self.buf[8], self.buf[9], self.buf[10]])
    }

    pub fn as_bytes(&self) -> &[u8; REPORT_SIZE] {
        &self.buf
    }

    /// Receive target for `GET_REPORT`
    pub fn as_mut_bytes(&mut self) -> &mut [u8; REPORT_SIZE] {
        &mut self.buf
    }
}

impl From<[u8; REPORT_SIZE]> for Report {
    fn from(buf: [u8; REPORT_SIZE]) -> Self {
        Self { buf }
    }
}
