// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Binding of the radio data ports to local interfaces, one port at a time

use std::fmt::Display;
use std::sync::atomic::AtomicBool;

use netif::{InterfaceName, NetworkInterfaceResolver};
use radio::{Command, RadioConnection};
use tracing::{error, info, warn};

use crate::binding::InterfaceBinding;
use crate::errors::ConfigureError;
use crate::session::RadioSession;

/// What a successful run did
#[derive(Debug, Default)]
pub struct RunReport {
    /// Data ports bound to an interface, in data-port order
    pub configured: Vec<InterfaceBinding>,
    /// Data ports left alone because the interface list ran out
    pub unconfigured: Vec<u32>,
    /// Interfaces left over once every data port was bound
    pub unused: Vec<InterfaceName>,
    /// Commands sent, including entering and leaving configuration mode
    pub commands: usize,
}

impl Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Configured {} data port(s) with {} commands",
            self.configured.len(),
            self.commands
        )?;
        for binding in &self.configured {
            writeln!(f, "  {binding}")?;
        }
        for gige_index in &self.unconfigured {
            writeln!(f, "  data port {gige_index} left unconfigured")?;
        }
        for interface in &self.unused {
            writeln!(f, "  interface {interface} not used")?;
        }
        Ok(())
    }
}

/// Programs the data ports of a connected radio.
///
/// Data ports are taken in ascending order and bound to the given interfaces
/// in the order supplied. Every DIP table entry of a bound port points at the
/// interface, with UDP port `udp_base + entry_index`. Commands already sent
/// are not undone when the run fails.
pub struct DataPortConfigurator<'a, C, R>
where
    C: RadioConnection + ?Sized,
    R: NetworkInterfaceResolver + ?Sized,
{
    conn: &'a mut C,
    resolver: &'a R,
    interrupt: Option<&'a AtomicBool>,
    echo: bool,
}

impl<'a, C, R> DataPortConfigurator<'a, C, R>
where
    C: RadioConnection + ?Sized,
    R: NetworkInterfaceResolver + ?Sized,
{
    pub fn new(conn: &'a mut C, resolver: &'a R) -> Self {
        Self {
            conn,
            resolver,
            interrupt: None,
            echo: true,
        }
    }

    /// Stop issuing port commands once `flag` is raised
    #[must_use]
    pub fn with_interrupt(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Do not print commands and responses to stdout
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    /// Bind the data ports of the radio to `interfaces`. Configuration mode is
    /// left on every path once it has been requested.
    ///
    /// # Errors
    ///
    /// Returns the first failure. If leaving configuration mode also fails
    /// after an earlier error, that second failure is only logged. Any failure
    /// once the interrupt flag is raised is reported as
    /// [`ConfigureError::Interrupted`].
    pub fn configure(
        self,
        interfaces: &[InterfaceName],
        udp_base: u16,
    ) -> Result<RunReport, ConfigureError> {
        let mut session = RadioSession::new(self.conn, self.interrupt, self.echo);
        let outcome = configure_ports(&mut session, self.resolver, interfaces, udp_base);
        let exited = session.exit_config_mode();
        let commands = session.commands();
        let result = match (outcome, exited) {
            (Ok(mut report), Ok(())) => {
                report.commands = commands;
                Ok(report)
            }
            (Ok(_), Err(e)) | (Err(e), Ok(())) => Err(e),
            (Err(e), Err(exit)) => {
                error!("Could not exit configuration mode: {exit}");
                Err(e)
            }
        };
        result.map_err(|e| e.or_interrupted(self.interrupt))
    }
}

fn configure_ports<C, R>(
    session: &mut RadioSession<'_, C>,
    resolver: &R,
    interfaces: &[InterfaceName],
    udp_base: u16,
) -> Result<RunReport, ConfigureError>
where
    C: RadioConnection + ?Sized,
    R: NetworkInterfaceResolver + ?Sized,
{
    session.enter_config_mode()?;

    let mut report = RunReport::default();
    let mut remaining = interfaces.iter();
    for gige_index in session.connection().gige_index_range() {
        let Some(interface) = remaining.next() else {
            warn!("No interface left for data port {gige_index}: leaving it unconfigured");
            report.unconfigured.push(gige_index);
            continue;
        };
        let binding = InterfaceBinding::resolve(gige_index, interface, resolver)?;
        if !binding.source_ip.is_valid() {
            warn!(
                "Source IP {} of data port {gige_index} is not a valid IPv4 address",
                binding.source_ip
            );
        }
        let entries = session
            .connection()
            .gige_dip_entry_index_range(gige_index)
            .into_iter()
            .map(|entry_index| binding.dip_entry(entry_index, udp_base))
            .collect::<Result<Vec<_>, _>>()?;

        session.issue(&binding.source_ip_command())?;
        for entry in entries {
            session.issue(&Command::SetDipEntry(entry))?;
        }
        info!("Bound {binding}");
        report.configured.push(binding);
    }

    report.unused = remaining.cloned().collect();
    if !report.unused.is_empty() {
        let names: Vec<_> = report.unused.iter().map(InterfaceName::as_str).collect();
        warn!(
            "{} has no data port left for: {}",
            session.connection().model_name(),
            names.join(", ")
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use netif::{Mac, ResolveError, StaticResolver};
    use pretty_assertions::assert_eq;
    use radio::RadioError;
    use radio::testing::ScriptedRadio;
    use std::net::Ipv4Addr;
    use std::sync::Arc;
    use tracing_test::traced_test;

    const MAC6: Mac = Mac([0x02, 0, 0, 0, 0, 0x06]);
    const MAC7: Mac = Mac([0x02, 0, 0, 0, 0, 0x07]);

    fn ifnames(names: &[&str]) -> Vec<InterfaceName> {
        names
            .iter()
            .map(|name| InterfaceName::try_from(*name).unwrap())
            .collect()
    }

    fn resolver() -> StaticResolver {
        StaticResolver::new()
            .with("eth6", Ipv4Addr::new(10, 0, 0, 5), MAC6)
            .with("eth7", Ipv4Addr::new(10, 0, 1, 5), MAC7)
            .with("eth0", Ipv4Addr::new(192, 168, 50, 1), MAC6)
    }

    fn udp_ports(dip: &str) -> (u32, u16, u16) {
        let fields: Vec<&str> = dip.trim_start_matches("#DIP ").split(", ").collect();
        (
            fields[1].parse().unwrap(),
            fields[4].parse().unwrap(),
            fields[5].parse().unwrap(),
        )
    }

    #[test]
    fn full_sequence() {
        let mut radio = ScriptedRadio::default().with_dip_entries(&[0, 1]);
        let resolver = resolver();
        let report = DataPortConfigurator::new(&mut radio, &resolver)
            .quiet()
            .configure(&ifnames(&["eth6", "eth7"]), 11000)
            .unwrap();
        assert_eq!(
            radio.sent(),
            [
                "CFG 1",
                "#SIP 1, 10.0.0.6",
                "#DIP 1, 0, 10.0.0.5, 02:00:00:00:00:06, 11000, 11000",
                "#DIP 1, 1, 10.0.0.5, 02:00:00:00:00:06, 11001, 11001",
                "#SIP 2, 10.0.1.6",
                "#DIP 2, 0, 10.0.1.5, 02:00:00:00:00:07, 11000, 11000",
                "#DIP 2, 1, 10.0.1.5, 02:00:00:00:00:07, 11001, 11001",
                "CFG 0",
            ]
        );
        assert_eq!(report.commands, 8);
        assert_eq!(report.configured.len(), 2);
        assert!(report.unconfigured.is_empty());
        assert!(report.unused.is_empty());
    }

    #[test]
    fn every_port_gets_one_sip_and_all_dips() {
        let mut radio = ScriptedRadio::default();
        let resolver = resolver();
        DataPortConfigurator::new(&mut radio, &resolver)
            .quiet()
            .configure(&ifnames(&["eth6", "eth7"]), 11000)
            .unwrap();
        for gige in [1, 2] {
            let sips = radio
                .sent()
                .iter()
                .filter(|c| c.starts_with(&format!("#SIP {gige}, ")))
                .count();
            assert_eq!(sips, 1);
            let dips: Vec<_> = radio
                .sent()
                .iter()
                .filter(|c| c.starts_with(&format!("#DIP {gige}, ")))
                .map(|c| udp_ports(c))
                .collect();
            assert_eq!(dips.len(), 32);
            for (n, (entry, send, recv)) in dips.into_iter().enumerate() {
                // ascending entry order
                assert_eq!(entry as usize, n);
                assert_eq!(u32::from(send), 11000 + entry);
                assert_eq!(send, recv);
            }
        }
        assert_eq!(radio.count("CFG 1"), 1);
        assert_eq!(radio.count("CFG 0"), 1);
    }

    #[test]
    #[traced_test]
    fn fewer_interfaces_than_ports() {
        let mut radio = ScriptedRadio::default()
            .with_gige_indices(&[0, 1])
            .with_dip_entries(&[0, 1, 2]);
        let resolver = resolver();
        let report = DataPortConfigurator::new(&mut radio, &resolver)
            .configure(&ifnames(&["eth0"]), 11000)
            .unwrap();
        assert_eq!(report.configured.len(), 1);
        assert_eq!(report.configured[0].gige_index, 0);
        assert_eq!(report.configured[0].interface.as_str(), "eth0");
        assert_eq!(report.unconfigured, vec![1]);
        assert_eq!(radio.count("#SIP 0, 192.168.50.2"), 1);
        assert!(!radio.sent().iter().any(|c| c.starts_with("#SIP 1")));
        assert!(!radio.sent().iter().any(|c| c.starts_with("#DIP 1")));
        assert_eq!(radio.sent().last().map(String::as_str), Some("CFG 0"));
        assert!(logs_contain("No interface left for data port 1"));
        assert!(report.to_string().contains("data port 1 left unconfigured"));
    }

    #[test]
    #[traced_test]
    fn more_interfaces_than_ports() {
        let mut radio = ScriptedRadio::default().with_dip_entries(&[0]);
        let resolver = resolver();
        let report = DataPortConfigurator::new(&mut radio, &resolver)
            .quiet()
            .configure(&ifnames(&["eth6", "eth7", "eth0"]), 11000)
            .unwrap();
        assert_eq!(report.configured.len(), 2);
        assert_eq!(report.unused, ifnames(&["eth0"]));
        assert!(logs_contain("NDR308 has no data port left for: eth0"));
    }

    #[test]
    fn radio_without_data_ports() {
        let mut radio = ScriptedRadio::default().with_gige_indices(&[]);
        let resolver = resolver();
        let report = DataPortConfigurator::new(&mut radio, &resolver)
            .quiet()
            .configure(&ifnames(&["eth6"]), 11000)
            .unwrap();
        assert!(report.configured.is_empty());
        assert_eq!(report.unused, ifnames(&["eth6"]));
        assert_eq!(radio.sent(), ["CFG 1", "CFG 0"]);
    }

    #[test]
    fn command_failure_still_exits_config_mode() {
        let failing = "#DIP 1, 3, 10.0.0.5, 02:00:00:00:00:06, 11003, 11003";
        let mut radio = ScriptedRadio::default().fail_on(failing, "ERROR: table full");
        let resolver = resolver();
        let err = DataPortConfigurator::new(&mut radio, &resolver)
            .quiet()
            .configure(&ifnames(&["eth6", "eth7"]), 11000)
            .unwrap_err();
        match err {
            ConfigureError::Radio(RadioError::CommandFailure { command, reply }) => {
                assert_eq!(command, failing);
                assert_eq!(reply, "ERROR: table full");
            }
            other => panic!("unexpected error {other}"),
        }
        // CFG 1, SIP, DIP 0..=3, CFG 0
        assert_eq!(radio.sent().len(), 7);
        assert_eq!(radio.count("CFG 0"), 1);
        assert_eq!(radio.sent().last().map(String::as_str), Some("CFG 0"));
        assert!(!radio.sent().iter().any(|c| c.starts_with("#SIP 2")));
    }

    #[test]
    fn failed_config_mode_entry_still_exits() {
        let mut radio = ScriptedRadio::default().fail_on("CFG 1", "ERROR: locked");
        let resolver = resolver();
        let err = DataPortConfigurator::new(&mut radio, &resolver)
            .quiet()
            .configure(&ifnames(&["eth6"]), 11000)
            .unwrap_err();
        assert!(matches!(err, ConfigureError::Radio(RadioError::CommandFailure { .. })));
        assert_eq!(radio.sent(), ["CFG 1", "CFG 0"]);
    }

    #[test]
    fn failed_exit_fails_the_run() {
        let mut radio = ScriptedRadio::default()
            .with_dip_entries(&[0])
            .fail_on("CFG 0", "ERROR: no");
        let resolver = resolver();
        let err = DataPortConfigurator::new(&mut radio, &resolver)
            .quiet()
            .configure(&ifnames(&["eth6", "eth7"]), 11000)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigureError::Radio(RadioError::CommandFailure { ref command, .. }) if command == "CFG 0"
        ));
        assert_eq!(radio.count("CFG 0"), 1);
    }

    #[test]
    fn resolution_failure_on_second_interface() {
        let mut radio = ScriptedRadio::default().with_dip_entries(&[0]);
        let resolver = StaticResolver::new()
            .with("eth6", Ipv4Addr::new(10, 0, 0, 5), MAC6)
            .without_ipv4("eth7", MAC7);
        let err = DataPortConfigurator::new(&mut radio, &resolver)
            .quiet()
            .configure(&ifnames(&["eth6", "eth7"]), 11000)
            .unwrap_err();
        match err {
            ConfigureError::InterfaceResolution {
                gige_index,
                interface,
                source,
            } => {
                assert_eq!(gige_index, 2);
                assert_eq!(interface.as_str(), "eth7");
                assert_eq!(source, ResolveError::NoIpv4Address(interface.clone()));
            }
            other => panic!("unexpected error {other}"),
        }
        assert_eq!(
            radio.sent(),
            [
                "CFG 1",
                "#SIP 1, 10.0.0.6",
                "#DIP 1, 0, 10.0.0.5, 02:00:00:00:00:06, 11000, 11000",
                "CFG 0",
            ]
        );
    }

    #[test]
    fn udp_base_too_high_sends_nothing_for_the_port() {
        let mut radio = ScriptedRadio::default();
        let resolver = resolver();
        let err = DataPortConfigurator::new(&mut radio, &resolver)
            .quiet()
            .configure(&ifnames(&["eth6"]), 65530)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigureError::InvalidUdpBase {
                udp_base: 65530,
                gige_index: 1,
                entry_index: 6
            }
        ));
        assert_eq!(radio.sent(), ["CFG 1", "CFG 0"]);
    }

    #[test]
    #[traced_test]
    fn last_octet_255_is_sent_unchanged() {
        let mut radio = ScriptedRadio::default().with_dip_entries(&[0]);
        let resolver = StaticResolver::new().with("eth6", Ipv4Addr::new(192, 168, 1, 255), MAC6);
        DataPortConfigurator::new(&mut radio, &resolver)
            .quiet()
            .configure(&ifnames(&["eth6"]), 11000)
            .unwrap();
        assert_eq!(radio.count("#SIP 1, 192.168.1.256"), 1);
        assert!(logs_contain("is not a valid IPv4 address"));
    }

    #[test]
    fn interrupt_stops_the_run_and_exits_config_mode() {
        let flag = Arc::new(AtomicBool::new(false));
        // raised once CFG 1, SIP and the first DIP are answered
        let mut radio = ScriptedRadio::default().interrupt_after(3, flag.clone());
        let resolver = resolver();
        let err = DataPortConfigurator::new(&mut radio, &resolver)
            .with_interrupt(&flag)
            .quiet()
            .configure(&ifnames(&["eth6", "eth7"]), 11000)
            .unwrap_err();
        assert!(matches!(err, ConfigureError::Interrupted));
        assert_eq!(radio.sent().len(), 4);
        assert_eq!(radio.count("CFG 0"), 1);
    }

    #[test]
    fn failure_of_an_interrupted_command_is_an_interrupt() {
        let flag = Arc::new(AtomicBool::new(false));
        // the signal lands while the SIP command is in flight
        let mut radio = ScriptedRadio::default()
            .interrupt_after(2, flag.clone())
            .fail_on("#SIP 1, 10.0.0.6", "ERROR: timed out");
        let resolver = resolver();
        let err = DataPortConfigurator::new(&mut radio, &resolver)
            .with_interrupt(&flag)
            .quiet()
            .configure(&ifnames(&["eth6"]), 11000)
            .unwrap_err();
        assert!(matches!(err, ConfigureError::Interrupted));
        assert_eq!(radio.sent(), ["CFG 1", "#SIP 1, 10.0.0.6", "CFG 0"]);
    }

    #[test]
    #[traced_test]
    fn lost_connection() {
        let mut radio = ScriptedRadio::default().disconnect_after(2);
        let resolver = resolver();
        let err = DataPortConfigurator::new(&mut radio, &resolver)
            .quiet()
            .configure(&ifnames(&["eth6", "eth7"]), 11000)
            .unwrap_err();
        assert!(matches!(err, ConfigureError::Radio(RadioError::ConnectionClosed)));
        assert_eq!(radio.sent(), ["CFG 1", "#SIP 1, 10.0.0.6"]);
        assert!(logs_contain("Could not exit configuration mode"));
    }
}
