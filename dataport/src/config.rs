// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The parameters of a configuration run

use std::fmt::Display;
use std::time::Duration;

use args::{
    DEFAULT_HOSTNAME, DEFAULT_INTERFACES, DEFAULT_RADIO_PORT, DEFAULT_RADIO_TYPE,
    DEFAULT_TIMEOUT_SECS, DEFAULT_UDP_BASE,
};
use derive_builder::Builder;
use netif::InterfaceName;
use radio::Transport;

fn default_interfaces() -> Vec<InterfaceName> {
    DEFAULT_INTERFACES
        .into_iter()
        .filter_map(|name| InterfaceName::try_from(name).ok())
        .collect()
}

/// Everything a run needs, built once from the command line. N.B. we derive a
/// builder type `RunConfigBuilder` and provide defaults for each field.
#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct RunConfig {
    #[builder(setter(into), default = DEFAULT_RADIO_TYPE.to_string())]
    pub radio_type: String,

    #[builder(setter(into), default = DEFAULT_HOSTNAME.to_string())]
    pub hostname: String,

    #[builder(default = DEFAULT_RADIO_PORT)]
    pub port: u16,

    #[builder(default = Transport::Tcp)]
    pub transport: Transport,

    #[builder(default = Duration::from_secs(DEFAULT_TIMEOUT_SECS))]
    pub timeout: Duration,

    #[builder(default = DEFAULT_UDP_BASE)]
    pub udp_base: u16,

    /// Local interfaces, consumed in order, one per data port
    #[builder(default = default_interfaces())]
    pub interfaces: Vec<InterfaceName>,
}

impl RunConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(interfaces) = &self.interfaces
            && interfaces.is_empty()
        {
            return Err("at least one interface is required".to_string());
        }
        if self.udp_base == Some(0) {
            return Err("the UDP base port must be positive".to_string());
        }
        Ok(())
    }
}

impl Display for RunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        writeln!(f, "Run config")?;
        writeln!(f, "  radio      : {}", self.radio_type)?;
        writeln!(
            f,
            "  control    : {}:{} over {}",
            self.hostname, self.port, self.transport
        )?;
        writeln!(f, "  timeout    : {}s", self.timeout.as_secs())?;
        writeln!(f, "  UDP base   : {}", self.udp_base)?;
        let interfaces: Vec<_> = self.interfaces.iter().map(InterfaceName::as_str).collect();
        writeln!(f, "  interfaces : {}", interfaces.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_command_line() {
        let config = RunConfigBuilder::default().build().unwrap();
        assert_eq!(config.radio_type, "ndr308");
        assert_eq!(config.hostname, "ndr308");
        assert_eq!(config.port, 8617);
        assert_eq!(config.transport, Transport::Tcp);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.udp_base, 11000);
        let names: Vec<_> = config.interfaces.iter().map(InterfaceName::as_str).collect();
        assert_eq!(names, vec!["eth6", "eth7"]);
    }

    #[test]
    fn build_with_overrides() {
        let config = RunConfigBuilder::default()
            .radio_type("ndr818")
            .hostname("10.1.1.1")
            .udp_base(4991)
            .interfaces(vec![InterfaceName::try_from("eth0").unwrap()])
            .build()
            .unwrap();
        assert_eq!(config.radio_type, "ndr818");
        assert_eq!(config.hostname, "10.1.1.1");
        assert_eq!(config.udp_base, 4991);
        assert_eq!(config.interfaces.len(), 1);
        assert!(config.to_string().contains("10.1.1.1:8617 over tcp"));
    }

    #[test]
    fn validation() {
        assert!(RunConfigBuilder::default().interfaces(vec![]).build().is_err());
        assert!(RunConfigBuilder::default().udp_base(0).build().is_err());
    }
}
