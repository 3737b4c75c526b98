// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Mac address type, as written into the radio's destination tables.

use std::fmt::Display;

/// A [MAC Address].
///
/// [MAC Address]: https://en.wikipedia.org/wiki/MAC_address
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Mac(pub [u8; 6]);

impl Mac {
    /// The zero `Mac`, which interfaces without a hardware address (e.g. tunnels) report.
    pub const ZERO: Mac = Mac([0; 6]);

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self == &Mac::ZERO
    }
}

impl From<[u8; 6]> for Mac {
    fn from(value: [u8; 6]) -> Self {
        Mac(value)
    }
}

impl AsRef<[u8; 6]> for Mac {
    fn as_ref(&self) -> &[u8; 6] {
        &self.0
    }
}

/// Lowercase, colon-separated: the notation the radio expects in `#DIP`.
impl Display for Mac {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::Mac;

    #[test]
    fn display_is_lowercase_colon_separated() {
        let mac = Mac([0xF8, 0xF2, 0x1E, 0x43, 0xD4, 0x08]);
        assert_eq!(mac.to_string(), "f8:f2:1e:43:d4:08");
    }

    #[test]
    fn zero() {
        assert!(Mac::ZERO.is_zero());
        assert!(!Mac::from([0x02, 0, 0, 0, 0, 1]).is_zero());
        assert_eq!(Mac::ZERO.as_ref(), &[0u8; 6]);
    }
}
