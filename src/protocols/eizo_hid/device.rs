// SPDX-License-Identifier: GPL-3.0-only
//! EIZO HID display device implementation

use crate::error::{EizoError, Result, Stage, TransportError};
use crate::protocols::{ReportType, RequestType, Transport};

use super::report::Report;
use super::session::{SessionGuard, SessionState};
use super::usage::Attribute;
use super::{GET_REPORT_ID, SET_REPORT_ID};

/// EIZO FlexScan display controller
///
/// Owns the session of one open connection. All methods take `&self`; share
/// the display across threads with an `Arc` and every exchange is
/// serialized on the session lock.
#[derive(Debug)]
pub struct EizoHidDisplay<T> {
    session: SessionState<T>,
    serial: String,
    product: String,
}

impl<T: Transport> EizoHidDisplay<T> {
    /// Create a new EizoHidDisplay from an open transport
    ///
    /// # Arguments
    /// * `transport` - Channel to the device, owned for the connection's lifetime
    /// * `serial` - Serial number of the display
    /// * `product` - Product name string
    pub fn new(transport: T, serial: String, product: String) -> Self {
        Self {
            session: SessionState::new(transport),
            serial,
            product,
        }
    }

    pub fn id(&self) -> String {
        format!("eizo-hid-{}", self.serial)
    }

    pub fn name(&self) -> String {
        format!("EIZO {}", self.product)
    }

    /// Read an attribute by name
    pub fn read(&self, attribute: &str) -> Result<i32> {
        let attribute = parse_attribute(attribute)?;
        self.read_attribute(attribute)
    }

    /// Write an attribute by name
    ///
    /// The value is sent as-is; range checking is up to the caller.
    pub fn write(&self, attribute: &str, value: i32) -> Result<()> {
        let attribute = parse_attribute(attribute)?;
        self.write_attribute(attribute, value)
    }

    pub fn read_attribute(&self, attribute: Attribute) -> Result<i32> {
        let mut session = self.session.acquire()?;
        let mut report = Report::new(attribute.usage(), session.current_counter());

        // Priming tells the device which usage the following GET answers
        transact(&mut session, &mut report, GET_REPORT_ID, RequestType::SetReport)
            .map_err(|source| self.failed(attribute, Stage::Prime, source))?;

        transact(&mut session, &mut report, GET_REPORT_ID, RequestType::GetReport)
            .map_err(|source| self.failed(attribute, Stage::Fetch, source))?;

        let value = report.value();
        tracing::debug!(
            "{} {} {}: {}",
            self.name(),
            self.serial,
            attribute,
            value
        );

        Ok(value)
    }

    pub fn write_attribute(&self, attribute: Attribute, value: i32) -> Result<()> {
        let mut session = self.session.acquire()?;
        let mut report = Report::with_value(attribute.usage(), session.current_counter(), value);

        transact(&mut session, &mut report, SET_REPORT_ID, RequestType::SetReport)
            .map_err(|source| self.failed(attribute, Stage::Set, source))?;

        tracing::debug!(
            "Set {} {} {} to {}",
            self.name(),
            self.serial,
            attribute,
            value
        );

        Ok(())
    }

    fn failed(&self, attribute: Attribute, stage: Stage, source: TransportError) -> EizoError {
        tracing::error!(
            display_id = %self.id(),
            attribute = %attribute,
            error = %source,
            "failed to {}",
            stage
        );
        EizoError::Communication { stage, source }
    }
}

fn parse_attribute(name: &str) -> Result<Attribute> {
    name.parse()
        .map_err(|_| EizoError::InvalidAttribute(name.to_string()))
}

/// One feature report transaction followed by a completion wait
///
/// The wait is issued even when the request itself failed.
fn transact<T: Transport>(
    session: &mut SessionGuard<'_, T>,
    report: &mut Report,
    report_id: u8,
    request: RequestType,
) -> std::result::Result<(), TransportError> {
    let transport = session.transport();
    let sent = transport.raw_request(report_id, report.as_mut_bytes(), ReportType::Feature, request);
    let waited = transport.wait();
    sent?;
    waited
}
