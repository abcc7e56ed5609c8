// SPDX-License-Identifier: GPL-3.0-only
//! User-space transport on top of hidapi (hidraw on Linux)

use hidapi::{HidApi, HidDevice};

use crate::error::TransportError;

use super::{ReportType, RequestType, Transport};

/// hidapi-backed transport for one opened monitor
#[derive(Debug)]
pub struct HidapiTransport {
    device: HidDevice,
}

impl HidapiTransport {
    pub fn new(device: HidDevice) -> Self {
        Self { device }
    }

    /// Open a monitor by vendor/product ID, optionally pinned to a serial number
    pub fn open(
        api: &HidApi,
        vendor_id: u16,
        product_id: u16,
        serial: Option<&str>,
    ) -> Result<Self, TransportError> {
        let device = match serial {
            Some(serial) => api.open_serial(vendor_id, product_id, serial)?,
            None => api.open(vendor_id, product_id)?,
        };

        tracing::debug!(
            "Opened HID device vendor={:#06x} product={:#06x} serial={:?}",
            vendor_id,
            product_id,
            serial
        );

        Ok(Self::new(device))
    }

    pub fn serial_number(&self) -> Option<String> {
        self.device.get_serial_number_string().ok().flatten()
    }

    pub fn product_string(&self) -> Option<String> {
        self.device.get_product_string().ok().flatten()
    }
}

impl Transport for HidapiTransport {
    fn raw_request(
        &mut self,
        report_id: u8,
        buf: &mut [u8],
        report_type: ReportType,
        request: RequestType,
    ) -> Result<usize, TransportError> {
        if report_type != ReportType::Feature {
            return Err(TransportError::Unsupported("only feature reports are supported"));
        }
        if buf.is_empty() {
            return Err(TransportError::Unsupported("empty report buffer"));
        }

        // hidraw takes the report number from the first byte
        match request {
            RequestType::SetReport => {
                let mut data = buf.to_vec();
                data[0] = report_id;
                self.device.send_feature_report(&data)?;
                Ok(data.len())
            }
            RequestType::GetReport => {
                buf[0] = report_id;
                Ok(self.device.get_feature_report(buf)?)
            }
        }
    }

    /// hidapi calls return only once the transfer has completed
    fn wait(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}
