// SPDX-License-Identifier: GPL-3.0-only
//! Mock transport for testing
//!
//! Records every request and echoes back the last value written for each
//! usage. Clones share state, so a test keeps one clone as a handle while
//! the session owns the other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread::ThreadId;
use std::time::Duration;

use crate::error::TransportError;

use super::eizo_hid::{GET_REPORT_ID, Report, SET_REPORT_ID};
use super::{ReportType, RequestType, Transport};

/// One recorded request
#[derive(Debug, Clone)]
pub struct Transaction {
    pub thread: ThreadId,
    pub report_id: u8,
    pub report_type: ReportType,
    pub request: RequestType,
    /// Buffer contents as handed to the transport
    pub data: Vec<u8>,
}

#[derive(Debug, Default)]
struct MockState {
    transactions: Vec<Transaction>,
    values: HashMap<u32, i32>,
    fail_request: Option<RequestType>,
    /// Number of successful waits left before one fails
    fail_wait_in: Option<usize>,
    waits: usize,
    delay: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep inside every request, to widen race windows
    pub fn with_delay(self, delay: Duration) -> Self {
        self.state.lock().unwrap().delay = delay;
        self
    }

    /// Make the next request of this kind return a negative status
    pub fn fail_next(&self, request: RequestType) {
        self.state.lock().unwrap().fail_request = Some(request);
    }

    /// Make the next completion wait fail
    pub fn fail_next_wait(&self) {
        self.fail_wait_after(0);
    }

    /// Let `successes` waits through, then fail the one after
    pub fn fail_wait_after(&self, successes: usize) {
        self.state.lock().unwrap().fail_wait_in = Some(successes);
    }

    /// Preload the value the device reports for a usage
    pub fn set_value(&self, usage: u32, value: i32) {
        self.state.lock().unwrap().values.insert(usage, value);
    }

    pub fn value(&self, usage: u32) -> Option<i32> {
        self.state.lock().unwrap().values.get(&usage).copied()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().transactions.clone()
    }

    pub fn waits(&self) -> usize {
        self.state.lock().unwrap().waits
    }
}

impl Transport for MockTransport {
    fn raw_request(
        &mut self,
        report_id: u8,
        buf: &mut [u8],
        report_type: ReportType,
        request: RequestType,
    ) -> Result<usize, TransportError> {
        let delay = {
            let mut state = self.state.lock().unwrap();
            state.transactions.push(Transaction {
                thread: std::thread::current().id(),
                report_id,
                report_type,
                request,
                data: buf.to_vec(),
            });

            if state.fail_request == Some(request) {
                state.fail_request = None;
                return Err(TransportError::Status(-libc::EIO));
            }

            let mut raw = [0u8; 39];
            raw.copy_from_slice(&buf[..39]);
            let report = Report::from(raw);

            match (request, report_id) {
                (RequestType::SetReport, SET_REPORT_ID) => {
                    state.values.insert(report.usage(), report.value());
                }
                (RequestType::GetReport, GET_REPORT_ID) => {
                    let value = state.values.get(&report.usage()).copied().unwrap_or(0);
                    buf[7..11].copy_from_slice(&value.to_le_bytes());
                }
                _ => {}
            }
            state.delay
        };

        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        Ok(buf.len())
    }

    fn wait(&mut self) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        state.waits += 1;
        match state.fail_wait_in {
            Some(0) => state.fail_wait_in = None,
            Some(n) => {
                state.fail_wait_in = Some(n - 1);
                return Ok(());
            }
            None => return Ok(()),
        }
        Err(TransportError::Completion("device timed out".to_string()))
    }
}
