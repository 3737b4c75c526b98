// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Control of NDR-series radios over their text command/response protocol.
//!
//! Only the part of the protocol needed to set up the gigabit data ports is
//! implemented: configuration mode, source IPs and destination-IP tables.

pub mod command;
pub mod connection;
pub mod errors;
pub mod link;
pub mod model;
pub mod registry;
pub mod response;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// re-exports
pub use command::{Command, DipEntry, RadioSourceIp};
pub use connection::{Radio, RadioConnection};
pub use errors::RadioError;
pub use link::{Link, TcpLink, Transport};
pub use model::RadioModel;
pub use registry::RadioRegistry;
pub use response::Response;

use tracectl::trace_target;
trace_target!("radio", tracectl::LevelFilter::INFO, &["radio-io"]);
