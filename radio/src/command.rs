// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Commands of the NDR text control protocol that the data-port configuration uses

use netif::Mac;
use std::fmt::Display;
use std::net::Ipv4Addr;

/// The source IP a radio data port is given: the address of the local interface
/// it streams to, with the last octet incremented by one.
///
/// The last component is kept wider than an octet: a local address ending in
/// `.255` yields the (invalid) address `x.y.z.256`, which is sent as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RadioSourceIp {
    head: [u8; 3],
    last: u16,
}

impl RadioSourceIp {
    #[must_use]
    pub fn next_after(local: Ipv4Addr) -> Self {
        let [a, b, c, d] = local.octets();
        Self {
            head: [a, b, c],
            last: u16::from(d) + 1,
        }
    }
    /// The address as an [`Ipv4Addr`], if the last component still fits in an octet
    #[must_use]
    pub fn to_ipv4(&self) -> Option<Ipv4Addr> {
        let [a, b, c] = self.head;
        u8::try_from(self.last)
            .ok()
            .map(|d| Ipv4Addr::new(a, b, c, d))
    }
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.to_ipv4().is_some()
    }
}

impl Display for RadioSourceIp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.head;
        write!(f, "{a}.{b}.{c}.{}", self.last)
    }
}

/// An entry of the destination-IP (DIP) table of a data port. The UDP port is
/// used for both the source and destination port fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DipEntry {
    pub gige_index: u32,
    pub entry_index: u32,
    pub dest_ip: Ipv4Addr,
    pub dest_mac: Mac,
    pub udp_port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `CFG 1`
    EnterConfigMode,
    /// `CFG 0`
    ExitConfigMode,
    /// `#SIP <gige>, <ip>`
    SetSourceIp {
        gige_index: u32,
        source_ip: RadioSourceIp,
    },
    /// `#DIP <gige>, <entry>, <ip>, <mac>, <port>, <port>`
    SetDipEntry(DipEntry),
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::EnterConfigMode => write!(f, "CFG 1"),
            Command::ExitConfigMode => write!(f, "CFG 0"),
            Command::SetSourceIp {
                gige_index,
                source_ip,
            } => write!(f, "#SIP {gige_index}, {source_ip}"),
            Command::SetDipEntry(e) => write!(
                f,
                "#DIP {}, {}, {}, {}, {}, {}",
                e.gige_index, e.entry_index, e.dest_ip, e.dest_mac, e.udp_port, e.udp_port
            ),
        }
    }
}
