// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Bindings of radio data ports to local interfaces

use std::fmt::Display;
use std::net::Ipv4Addr;

use netif::{InterfaceName, Mac, NetworkInterfaceResolver};
use radio::{Command, DipEntry, RadioSourceIp};

use crate::errors::ConfigureError;

/// A data port of the radio bound to a local interface: the port streams from
/// `source_ip` to the interface addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceBinding {
    pub interface: InterfaceName,
    pub local_ip: Ipv4Addr,
    pub local_mac: Mac,
    pub source_ip: RadioSourceIp,
    pub gige_index: u32,
}

impl InterfaceBinding {
    /// Bind data port `gige_index` to `interface`, looking up its addresses.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigureError::InterfaceResolution`] if the interface does
    /// not exist or lacks an IPv4 or MAC address.
    pub fn resolve<R: NetworkInterfaceResolver + ?Sized>(
        gige_index: u32,
        interface: &InterfaceName,
        resolver: &R,
    ) -> Result<Self, ConfigureError> {
        let failed = |source| ConfigureError::InterfaceResolution {
            gige_index,
            interface: interface.clone(),
            source,
        };
        let local_ip = resolver.ipv4_address(interface).map_err(failed)?;
        let local_mac = resolver.mac_address(interface).map_err(failed)?;
        Ok(Self {
            interface: interface.clone(),
            local_ip,
            local_mac,
            source_ip: RadioSourceIp::next_after(local_ip),
            gige_index,
        })
    }

    #[must_use]
    pub fn source_ip_command(&self) -> Command {
        Command::SetSourceIp {
            gige_index: self.gige_index,
            source_ip: self.source_ip,
        }
    }

    /// The DIP table entry `entry_index` of the bound port, sending to UDP port
    /// `udp_base + entry_index` of the local interface.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigureError::InvalidUdpBase`] if that port exceeds 65535.
    pub fn dip_entry(&self, entry_index: u32, udp_base: u16) -> Result<DipEntry, ConfigureError> {
        let udp_port = u32::from(udp_base)
            .checked_add(entry_index)
            .and_then(|port| u16::try_from(port).ok())
            .ok_or(ConfigureError::InvalidUdpBase {
                udp_base,
                gige_index: self.gige_index,
                entry_index,
            })?;
        Ok(DipEntry {
            gige_index: self.gige_index,
            entry_index,
            dest_ip: self.local_ip,
            dest_mac: self.local_mac,
            udp_port,
        })
    }
}

impl Display for InterfaceBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "data port {} -> {} ({} {}), source IP {}",
            self.gige_index, self.interface, self.local_ip, self.local_mac, self.source_ip
        )
    }
}
