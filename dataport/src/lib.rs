// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Configuration of the gigabit data ports of NDR radios.
//!
//! Each data port of the radio is bound to a local interface: the port gets the
//! interface address plus one as source IP, and all the entries of its
//! destination-IP table point at the interface, on consecutive UDP ports.

mod binding;
mod config;
mod configurator;
mod errors;
mod session;

use std::sync::atomic::AtomicBool;

use netif::NetworkInterfaceResolver;
use radio::RadioRegistry;
use tracing::debug;

pub use binding::InterfaceBinding;
pub use config::{RunConfig, RunConfigBuilder, RunConfigBuilderError};
pub use configurator::{DataPortConfigurator, RunReport};
pub use errors::ConfigureError;
pub use session::RadioSession;

use tracectl::trace_target;
trace_target!("dataport", tracectl::LevelFilter::INFO, &[]);

/// Connect to the radio described by `config` and bind its data ports to the
/// configured interfaces. Raising `interrupt` stops the run before the next command.
///
/// # Errors
///
/// Fails if the radio type is unknown, the radio cannot be reached, or the
/// configuration does not complete. See [`ConfigureError`].
pub fn run<R: NetworkInterfaceResolver + ?Sized>(
    config: &RunConfig,
    registry: &RadioRegistry,
    resolver: &R,
    interrupt: &AtomicBool,
) -> Result<RunReport, ConfigureError> {
    debug!("{config}");
    let mut radio = registry.connect(
        &config.radio_type,
        config.transport,
        &config.hostname,
        config.port,
        config.timeout,
    )
    .map_err(|e| ConfigureError::from(e).or_interrupted(Some(interrupt)))?;
    DataPortConfigurator::new(&mut radio, resolver)
        .with_interrupt(interrupt)
        .configure(&config.interfaces, config.udp_base)
}
