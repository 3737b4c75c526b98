// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The error results of a configuration run.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::RunConfigBuilderError;
use netif::{InterfaceName, ResolveError};
use radio::RadioError;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigureError {
    #[error(transparent)]
    Radio(#[from] RadioError),

    #[error("Cannot bind data port {gige_index} to {interface}: {source}")]
    InterfaceResolution {
        gige_index: u32,
        interface: InterfaceName,
        #[source]
        source: ResolveError,
    },

    #[error(
        "UDP base port {udp_base} leaves no port for DIP entry {entry_index} of data port {gige_index}"
    )]
    InvalidUdpBase {
        udp_base: u16,
        gige_index: u32,
        entry_index: u32,
    },

    #[error("Interrupted")]
    Interrupted,

    #[error("Invalid run configuration: {0}")]
    Config(#[from] RunConfigBuilderError),
}

impl ConfigureError {
    /// A failure seen once `interrupt` is raised is the interrupt's doing: a
    /// blocked connect or read gives up with an I/O error after the signal.
    #[must_use]
    pub fn or_interrupted(self, interrupt: Option<&AtomicBool>) -> Self {
        if interrupt.is_some_and(|flag| flag.load(Ordering::Relaxed))
            && !matches!(self, Self::Interrupted)
        {
            debug!("Failure after interrupt: {self}");
            Self::Interrupted
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_failure() -> ConfigureError {
        ConfigureError::Radio(RadioError::Io(std::io::Error::from(
            std::io::ErrorKind::Interrupted,
        )))
    }

    #[test]
    fn failure_after_interrupt_is_interrupt() {
        let flag = AtomicBool::new(true);
        assert!(matches!(
            io_failure().or_interrupted(Some(&flag)),
            ConfigureError::Interrupted
        ));
    }

    #[test]
    fn failure_without_interrupt_is_kept() {
        let flag = AtomicBool::new(false);
        assert!(matches!(
            io_failure().or_interrupted(Some(&flag)),
            ConfigureError::Radio(RadioError::Io(_))
        ));
        assert!(matches!(
            io_failure().or_interrupted(None),
            ConfigureError::Radio(RadioError::Io(_))
        ));
    }
}
