// SPDX-License-Identifier: GPL-3.0-only
//! Attribute name to HID usage lookup

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Brightness, from the VESA monitor control usage page (0x82)
pub const USAGE_BRIGHTNESS: u32 = 0x0082_0010;
/// Power state, vendor page
pub const USAGE_POWER: u32 = 0xff01_0100;
/// Gamma preset, vendor page
pub const USAGE_GAMMA: u32 = 0xff01_0101;
/// Color profile (color mode) selection, vendor page
pub const USAGE_PROFILE: u32 = 0xff01_0102;

/// A monitor setting that can be read and written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Brightness,
    Power,
    Gamma,
    Profile,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::Brightness,
        Attribute::Power,
        Attribute::Gamma,
        Attribute::Profile,
    ];

    /// Name as exposed to callers
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Brightness => "brightness",
            Attribute::Power => "power",
            Attribute::Gamma => "gamma",
            Attribute::Profile => "profile",
        }
    }

    /// Usage identifier understood by the monitor
    pub fn usage(self) -> u32 {
        match self {
            Attribute::Brightness => USAGE_BRIGHTNESS,
            Attribute::Power => USAGE_POWER,
            Attribute::Gamma => USAGE_GAMMA,
            Attribute::Profile => USAGE_PROFILE,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The name did not match any attribute
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown attribute {0:?}")]
pub struct UnknownAttribute(pub String);

impl FromStr for Attribute {
    type Err = UnknownAttribute;

    /// Exact, case-sensitive match
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brightness" => Ok(Attribute::Brightness),
            "power" => Ok(Attribute::Power),
            "gamma" => Ok(Attribute::Gamma),
            "profile" => Ok(Attribute::Profile),
            _ => Err(UnknownAttribute(s.to_string())),
        }
    }
}

/// Resolve an attribute name to its usage identifier
pub fn resolve(name: &str) -> Option<u32> {
    name.parse::<Attribute>().ok().map(Attribute::usage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_names_resolve_to_distinct_usages() {
        let usages: HashSet<u32> = Attribute::ALL
            .iter()
            .map(|a| resolve(a.name()).expect("known attribute"))
            .collect();
        assert_eq!(usages.len(), 4);

        assert_eq!(resolve("brightness"), Some(USAGE_BRIGHTNESS));
        assert_eq!(resolve("power"), Some(USAGE_POWER));
        assert_eq!(resolve("gamma"), Some(USAGE_GAMMA));
        assert_eq!(resolve("profile"), Some(USAGE_PROFILE));
    }

    #[test]
    fn test_resolution_is_stable() {
        for attr in Attribute::ALL {
            assert_eq!(resolve(attr.name()), resolve(attr.name()));
            assert_eq!(attr.name().parse::<Attribute>(), Ok(attr));
        }
    }

    #[test]
    fn test_unknown_names() {
        for name in ["", "Brightness", "BRIGHTNESS", "bright", "brightness ", " power", "contrast"] {
            assert_eq!(resolve(name), None, "{name:?} should not resolve");
        }

        let err = "volume".parse::<Attribute>().unwrap_err();
        assert_eq!(err, UnknownAttribute("volume".to_string()));
    }
}
