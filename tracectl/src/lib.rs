// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Crate to set up tracing for the configurator and adjust log-levels per target

pub mod control;
pub mod display;
pub mod targets;

// re-exports
pub use control::TracingConfigError;
pub use control::TracingControl;
pub use control::get_trace_ctl;
pub use tracing_subscriber::filter::LevelFilter;

/// Log-level used for the targets that nobody declared
pub const DEFAULT_LOGLEVEL: LevelFilter = LevelFilter::INFO;
