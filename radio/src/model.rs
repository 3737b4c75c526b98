// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Capability sets of the supported radio models

use std::ops::RangeInclusive;

use crate::link::Transport;

/// What the data-port configuration needs to know about a radio model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioModel {
    /// Model name, as reported to the operator
    pub name: &'static str,
    /// Indices of the gigabit data ports
    pub gige_indices: RangeInclusive<u32>,
    /// Indices of the destination-IP table entries of every data port
    pub dip_entries: RangeInclusive<u32>,
    /// Transports the control port can be reached over
    pub transports: &'static [Transport],
}

impl RadioModel {
    #[must_use]
    pub fn gige_index_range(&self) -> Vec<u32> {
        self.gige_indices.clone().collect()
    }
    /// All the data ports of the NDR308 family share the same table size
    #[must_use]
    pub fn dip_entry_index_range(&self, _gige_index: u32) -> Vec<u32> {
        self.dip_entries.clone().collect()
    }
    #[must_use]
    pub fn supports(&self, transport: Transport) -> bool {
        self.transports.contains(&transport)
    }
}

pub const NDR308: RadioModel = RadioModel {
    name: "NDR308",
    gige_indices: 1..=2,
    dip_entries: 0..=31,
    transports: &[Transport::Tcp],
};

pub const NDR318: RadioModel = RadioModel {
    name: "NDR318",
    ..NDR308
};

pub const NDR318A: RadioModel = RadioModel {
    name: "NDR318A",
    ..NDR308
};

pub const NDR818: RadioModel = RadioModel {
    name: "NDR818",
    ..NDR308
};
