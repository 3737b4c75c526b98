// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Command line of the data-port configurator

pub use clap::Parser;
use netif::InterfaceName;

pub const DEFAULT_RADIO_TYPE: &str = "ndr308";
pub const DEFAULT_HOSTNAME: &str = "ndr308";
pub const DEFAULT_RADIO_PORT: u16 = 8617;
pub const DEFAULT_UDP_BASE: u16 = 11000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_INTERFACES: [&str; 2] = ["eth6", "eth7"];

#[derive(Parser, Debug)]
#[command(name = "ndr_dataport_config")]
#[command(version)]
#[command(
    about = "Configure the gigabit data ports of an NDR radio to stream to local interfaces",
    long_about = None
)]
pub struct CmdArgs {
    #[arg(
        short = 'r',
        long = "radio",
        value_name = "TYPE",
        default_value = DEFAULT_RADIO_TYPE,
        help = "Radio type (see --list-radios)"
    )]
    radio: String,

    #[arg(
        short = 'n',
        long = "hostname",
        value_name = "HOST",
        default_value = DEFAULT_HOSTNAME,
        help = "Host name or IP address of the radio"
    )]
    hostname: String,

    #[arg(
        short = 'p',
        long = "port",
        value_name = "PORT",
        default_value_t = DEFAULT_RADIO_PORT,
        help = "Control port of the radio"
    )]
    port: u16,

    #[arg(
        short = 'u',
        long = "udpbase",
        value_name = "PORT",
        default_value_t = DEFAULT_UDP_BASE,
        value_parser = clap::value_parser!(u16).range(1..),
        help = "First UDP port of the range assigned to the destination-IP table entries"
    )]
    udpbase: u16,

    #[arg(
        value_name = "IFLIST",
        num_args = 1..,
        default_values = DEFAULT_INTERFACES,
        help = "Local interfaces to bind to the radio data ports, in data-port order"
    )]
    interfaces: Vec<InterfaceName>,

    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..=3600),
        help = "Timeout for connecting to the radio and for every command"
    )]
    timeout: u64,

    #[arg(
        long,
        default_value_t = false,
        help = "Show the supported radio types and exit"
    )]
    list_radios: bool,

    #[arg(
        long,
        default_value_t = false,
        help = "Show configurable tracing targets and exit"
    )]
    show_tracing_targets: bool,

    #[arg(
        long,
        default_value_t = false,
        help = "Show tracing targets grouped by tag and exit"
    )]
    show_tracing_tags: bool,

    #[arg(
        long,
        value_name = "tracing configuration",
        help = "Tracing config string as comma-separated sequence of tag=level, with level one in [off,error,warn,info,debug,trace].
Passing default=level sets the default log-level.
Passing all=level sets the log-level of all the targets.
E.g. default=error,all=info,radio=debug"
    )]
    tracing: Option<String>,
}

impl CmdArgs {
    pub fn radio_type(&self) -> &str {
        &self.radio
    }
    pub fn hostname(&self) -> &str {
        &self.hostname
    }
    pub fn port(&self) -> u16 {
        self.port
    }
    pub fn udp_base(&self) -> u16 {
        self.udpbase
    }
    pub fn interfaces(&self) -> &[InterfaceName] {
        &self.interfaces
    }
    pub fn timeout_secs(&self) -> u64 {
        self.timeout
    }
    pub fn list_radios(&self) -> bool {
        self.list_radios
    }
    pub fn show_tracing_targets(&self) -> bool {
        self.show_tracing_targets
    }
    pub fn show_tracing_tags(&self) -> bool {
        self.show_tracing_tags
    }
    pub fn tracing(&self) -> Option<&String> {
        self.tracing.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(args: &CmdArgs) -> Vec<&str> {
        args.interfaces().iter().map(InterfaceName::as_str).collect()
    }

    #[test]
    fn defaults() {
        let args = CmdArgs::try_parse_from(["ndr_dataport_config"]).unwrap();
        assert_eq!(args.radio_type(), "ndr308");
        assert_eq!(args.hostname(), "ndr308");
        assert_eq!(args.port(), 8617);
        assert_eq!(args.udp_base(), 11000);
        assert_eq!(names(&args), vec!["eth6", "eth7"]);
        assert_eq!(args.timeout_secs(), 5);
        assert!(!args.list_radios());
        assert!(args.tracing().is_none());
    }

    #[test]
    fn short_options_and_interface_list() {
        let args = CmdArgs::try_parse_from([
            "ndr_dataport_config",
            "-r",
            "ndr318",
            "-n",
            "10.0.0.1",
            "-p",
            "9000",
            "-u",
            "20000",
            "eth2",
            "eth0",
            "eth1",
        ])
        .unwrap();
        assert_eq!(args.radio_type(), "ndr318");
        assert_eq!(args.hostname(), "10.0.0.1");
        assert_eq!(args.port(), 9000);
        assert_eq!(args.udp_base(), 20000);
        // order is kept
        assert_eq!(names(&args), vec!["eth2", "eth0", "eth1"]);
    }

    #[test]
    fn long_options() {
        let args = CmdArgs::try_parse_from([
            "ndr_dataport_config",
            "--radio=ndr818",
            "--hostname",
            "radio.lab",
            "--udpbase",
            "4991",
            "--tracing",
            "default=debug",
            "enp1s0",
        ])
        .unwrap();
        assert_eq!(args.radio_type(), "ndr818");
        assert_eq!(args.hostname(), "radio.lab");
        assert_eq!(args.udp_base(), 4991);
        assert_eq!(args.tracing().map(String::as_str), Some("default=debug"));
        assert_eq!(names(&args), vec!["enp1s0"]);
    }

    #[test]
    fn rejects_bad_values() {
        // port out of range
        assert!(CmdArgs::try_parse_from(["ndr_dataport_config", "-p", "70000"]).is_err());
        // udp base must be positive
        assert!(CmdArgs::try_parse_from(["ndr_dataport_config", "-u", "0"]).is_err());
        // not an interface name
        assert!(CmdArgs::try_parse_from(["ndr_dataport_config", "eth 0"]).is_err());
        assert!(CmdArgs::try_parse_from(["ndr_dataport_config", "a-very-long-ifname"]).is_err());
    }

    #[test]
    fn version_flag() {
        let err = CmdArgs::try_parse_from(["ndr_dataport_config", "-V"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
