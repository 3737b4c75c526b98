// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Validated names of local network interfaces.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Maximum length of a linux interface name, excluding the trailing NUL.
const MAX_INTERFACE_NAME_LEN: usize = 15;

/// The name of a local network interface (e.g. `eth6`).
///
/// Names follow the kernel restrictions: 1 to 15 ASCII characters among
/// alphanumerics and `.-_`, and neither `.` nor `..`.
#[repr(transparent)]
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct InterfaceName(String);

/// Errors which may occur when turning a string into an [`InterfaceName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IllegalInterfaceName {
    #[error("interface name must be at least one character")]
    Empty,
    #[error("interface name must not be . or ..")]
    OnlyDots(String),
    #[error("interface name {0} is longer than {MAX_INTERFACE_NAME_LEN} characters")]
    TooLong(String),
    #[error(
        "interface name {0} contains illegal characters (only alphanumeric ASCII and .-_ are permitted)"
    )]
    IllegalCharacters(String),
}

impl InterfaceName {
    pub const MAX_LEN: usize = MAX_INTERFACE_NAME_LEN;

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for InterfaceName {
    type Error = IllegalInterfaceName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        const LEGAL_PUNCT: [char; 3] = ['.', '-', '_'];
        if value.is_empty() {
            return Err(IllegalInterfaceName::Empty);
        }
        if value == "." || value == ".." {
            return Err(IllegalInterfaceName::OnlyDots(value));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || LEGAL_PUNCT.contains(&c))
        {
            return Err(IllegalInterfaceName::IllegalCharacters(value));
        }
        if value.len() > InterfaceName::MAX_LEN {
            return Err(IllegalInterfaceName::TooLong(value));
        }
        Ok(InterfaceName(value))
    }
}

impl TryFrom<&str> for InterfaceName {
    type Error = IllegalInterfaceName;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_string())
    }
}

impl FromStr for InterfaceName {
    type Err = IllegalInterfaceName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl AsRef<str> for InterfaceName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for InterfaceName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{IllegalInterfaceName, InterfaceName};

    #[test]
    fn accepts_kernel_style_names() {
        for name in ["eth6", "enp3s0f1", "GbEth1.9000", "data_0", "br-radio"] {
            let ifname = InterfaceName::try_from(name).unwrap();
            assert_eq!(ifname.as_str(), name);
            assert_eq!(ifname.to_string(), name);
        }
    }

    #[test]
    fn rejects_illegal_names() {
        assert_eq!(InterfaceName::try_from(""), Err(IllegalInterfaceName::Empty));
        assert!(matches!(
            InterfaceName::try_from(".."),
            Err(IllegalInterfaceName::OnlyDots(_))
        ));
        assert!(matches!(
            InterfaceName::try_from("eth 6"),
            Err(IllegalInterfaceName::IllegalCharacters(_))
        ));
        assert!(matches!(
            InterfaceName::try_from("éth0"),
            Err(IllegalInterfaceName::IllegalCharacters(_))
        ));
        assert!(matches!(
            InterfaceName::try_from("a-very-long-ifname"),
            Err(IllegalInterfaceName::TooLong(_))
        ));
        assert!(InterfaceName::try_from("abcdefghijklmno").is_ok());
    }
}
