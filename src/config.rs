// SPDX-License-Identifier: GPL-3.0-only
//! Configuration file
//!
//! An optional KDL document at `$XDG_CONFIG_HOME/eizo-hid-control/config.kdl`:
//!
//! ```kdl
//! vendor-id 0x056d
//! product-id 0x4036
//! serial "21345678"
//! log-filter "info"
//! ```
//!
//! Every key is optional. A missing file yields the defaults.

use std::path::{Path, PathBuf};

use kdl::{KdlDocument, KdlValue};

use crate::error::ConfigError;
use crate::protocols::eizo_hid::VENDOR_ID;

pub const APPID: &str = "eizo-hid-control";
pub const CONFIG_FILE: &str = "config.kdl";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub vendor_id: u16,
    /// No default; must come from the file or the command line
    pub product_id: Option<u16>,
    pub serial: Option<String>,
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vendor_id: VENDOR_ID,
            product_id: None,
            serial: None,
            log_filter: None,
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APPID).join(CONFIG_FILE))
    }

    /// Load from `path`, or from the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                debug!("Loading config from {}", path.display());
                Self::parse(&text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io { path, source }),
        }
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let doc: KdlDocument = text
            .parse()
            .map_err(|e: kdl::KdlError| ConfigError::Parse(e.to_string()))?;

        let mut config = Self::default();
        if let Some(value) = doc.get_arg("vendor-id") {
            config.vendor_id = usb_id("vendor-id", value)?;
        }
        if let Some(value) = doc.get_arg("product-id") {
            config.product_id = Some(usb_id("product-id", value)?);
        }
        if let Some(value) = doc.get_arg("serial") {
            config.serial = Some(string("serial", value)?);
        }
        if let Some(value) = doc.get_arg("log-filter") {
            config.log_filter = Some(string("log-filter", value)?);
        }

        Ok(config)
    }
}

fn usb_id(key: &'static str, value: &KdlValue) -> Result<u16, ConfigError> {
    let raw = value.as_integer().ok_or_else(|| ConfigError::InvalidValue {
        key,
        reason: format!("expected an integer, got {value}"),
    })?;
    u16::try_from(raw).map_err(|_| ConfigError::InvalidValue {
        key,
        reason: format!("{raw} is not a 16-bit USB ID"),
    })
}

fn string(key: &'static str, value: &KdlValue) -> Result<String, ConfigError> {
    value
        .as_string()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::InvalidValue {
            key,
            reason: format!("expected a string, got {value}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.vendor_id, 0x056d);
        assert!(config.product_id.is_none());
    }

    #[test]
    fn test_full_document() {
        let config = Config::parse(
            r#"
            vendor-id 0x056d
            product-id 0x4036
            serial "21345678"
            log-filter "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.vendor_id, 0x056d);
        assert_eq!(config.product_id, Some(0x4036));
        assert_eq!(config.serial.as_deref(), Some("21345678"));
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_id() {
        let err = Config::parse("product-id 70000").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "product-id", .. }));
    }

    #[test]
    fn test_wrong_type() {
        let err = Config::parse("serial 12").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "serial", .. }));

        let err = Config::parse("vendor-id \"eizo\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "vendor-id", .. }));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            Config::parse("product-id {"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("eizo-hid-control-does-not-exist.kdl");
        assert_eq!(Config::load(Some(path.as_path())).unwrap(), Config::default());
    }
}
