//! MAC address value type.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// A 48-bit hardware address.
///
/// Parses the canonical `AA:BB:CC:DD:EE:FF` form; `-` is accepted as a
/// separator as well. Anything else is rejected with
/// [`ValidationError::InvalidMacAddress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Wrap raw octets.
    #[must_use]
    pub fn from_octets(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// The six address octets, most significant first.
    #[must_use]
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

impl FromStr for MacAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0u8; 6];
        let mut count = 0;

        for group in s.split([':', '-']) {
            if count == 6 || group.len() != 2 {
                return Err(ValidationError::InvalidMacAddress);
            }
            octets[count] = u8::from_str_radix(group, 16)
                .map_err(|_| ValidationError::InvalidMacAddress)?;
            count += 1;
        }

        if count != 6 {
            return Err(ValidationError::InvalidMacAddress);
        }
        Ok(Self(octets))
    }
}

impl Serialize for MacAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MacAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
