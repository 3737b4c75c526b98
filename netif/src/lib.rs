// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Local network interfaces as seen by the data-port configurator: their names,
//! and the IPv4 and MAC addresses the radio streams data to.

pub mod mac;
pub mod name;
pub mod resolver;

pub use mac::Mac;
pub use name::{IllegalInterfaceName, InterfaceName};
#[cfg(any(test, feature = "testing"))]
pub use resolver::StaticResolver;
pub use resolver::{NetworkInterfaceResolver, ResolveError, SystemResolver};

use tracectl::trace_target;
trace_target!("netif", tracectl::LevelFilter::INFO, &["interfaces"]);
