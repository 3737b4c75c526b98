// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Resolution of interface names to the addresses the radio must stream to.

use std::net::Ipv4Addr;

use netdev::Interface;
use netdev::get_interfaces;
use thiserror::Error;
use tracing::debug;

use crate::{InterfaceName, Mac};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No such interface: {0}")]
    NoSuchInterface(InterfaceName),
    #[error("Interface {0} has no IPv4 address")]
    NoIpv4Address(InterfaceName),
    #[error("Interface {0} has no MAC address")]
    NoMacAddress(InterfaceName),
}

/// Maps a local interface name to its IPv4 and MAC addresses
pub trait NetworkInterfaceResolver {
    /// The (first) IPv4 address assigned to the interface.
    ///
    /// # Errors
    ///
    /// Fails if the interface does not exist or has no IPv4 address.
    fn ipv4_address(&self, ifname: &InterfaceName) -> Result<Ipv4Addr, ResolveError>;

    /// The hardware address of the interface.
    ///
    /// # Errors
    ///
    /// Fails if the interface does not exist or has no (or a zero) MAC address.
    fn mac_address(&self, ifname: &InterfaceName) -> Result<Mac, ResolveError>;
}

/// Resolver backed by a snapshot of the kernel interfaces.
pub struct SystemResolver {
    interfaces: Vec<Interface>,
}

impl SystemResolver {
    /// Take a snapshot of the local interfaces. Later changes are not seen.
    #[must_use]
    pub fn snapshot() -> Self {
        let interfaces = get_interfaces();
        debug!("Found {} local interfaces", interfaces.len());
        Self { interfaces }
    }

    fn lookup(&self, ifname: &InterfaceName) -> Result<&Interface, ResolveError> {
        self.interfaces
            .iter()
            .find(|interface| interface.name == ifname.as_str())
            .ok_or_else(|| ResolveError::NoSuchInterface(ifname.clone()))
    }
}

impl NetworkInterfaceResolver for SystemResolver {
    fn ipv4_address(&self, ifname: &InterfaceName) -> Result<Ipv4Addr, ResolveError> {
        self.lookup(ifname)?
            .ipv4
            .first()
            .map(|net| net.addr())
            .ok_or_else(|| ResolveError::NoIpv4Address(ifname.clone()))
    }

    fn mac_address(&self, ifname: &InterfaceName) -> Result<Mac, ResolveError> {
        self.lookup(ifname)?
            .mac_addr
            .map(|mac| Mac::from(mac.octets()))
            .filter(|mac| !mac.is_zero())
            .ok_or_else(|| ResolveError::NoMacAddress(ifname.clone()))
    }
}

#[cfg(any(test, feature = "testing"))]
pub use self::fake::StaticResolver;

#[cfg(any(test, feature = "testing"))]
mod fake {
    use std::collections::HashMap;
    use std::net::Ipv4Addr;

    use super::{NetworkInterfaceResolver, ResolveError};
    use crate::{InterfaceName, Mac};

    /// A resolver answering from a fixed table, for tests.
    #[derive(Debug, Default, Clone)]
    pub struct StaticResolver {
        entries: HashMap<String, (Option<Ipv4Addr>, Option<Mac>)>,
    }

    impl StaticResolver {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }
        /// Add an interface with both addresses.
        #[must_use]
        pub fn with(mut self, ifname: &str, ip: Ipv4Addr, mac: Mac) -> Self {
            self.entries.insert(ifname.to_string(), (Some(ip), Some(mac)));
            self
        }
        /// Add an interface which has a MAC but no IPv4 address.
        #[must_use]
        pub fn without_ipv4(mut self, ifname: &str, mac: Mac) -> Self {
            self.entries.insert(ifname.to_string(), (None, Some(mac)));
            self
        }
        fn entry(
            &self,
            ifname: &InterfaceName,
        ) -> Result<&(Option<Ipv4Addr>, Option<Mac>), ResolveError> {
            self.entries
                .get(ifname.as_str())
                .ok_or_else(|| ResolveError::NoSuchInterface(ifname.clone()))
        }
    }

    impl NetworkInterfaceResolver for StaticResolver {
        fn ipv4_address(&self, ifname: &InterfaceName) -> Result<Ipv4Addr, ResolveError> {
            self.entry(ifname)?
                .0
                .ok_or_else(|| ResolveError::NoIpv4Address(ifname.clone()))
        }
        fn mac_address(&self, ifname: &InterfaceName) -> Result<Mac, ResolveError> {
            self.entry(ifname)?
                .1
                .ok_or_else(|| ResolveError::NoMacAddress(ifname.clone()))
        }
    }
}
