// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![deny(clippy::all, clippy::pedantic)]

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use args::{CmdArgs, Parser};
use ndr_dataport::{ConfigureError, RunConfig, RunConfigBuilder, RunReport, run};
use netif::SystemResolver;
use radio::RadioRegistry;
use tracectl::{get_trace_ctl, trace_target};
use tracing::{debug, info, warn};

const PROGRAM: &str = "ndr_dataport_config";

trace_target!("main", tracectl::LevelFilter::INFO, &[]);

fn failure_message(error: &dyn std::fmt::Display) -> String {
    format!("{PROGRAM}: {error}\n  for help use --help")
}

fn fail(error: &dyn std::fmt::Display) -> ExitCode {
    eprintln!("{}", failure_message(error));
    ExitCode::from(2)
}

/// Exit status of a run and the message to print on stderr, if any.
/// Interrupted runs succeed, whatever error the interrupt caused.
fn exit_status(
    result: &Result<RunReport, ConfigureError>,
    interrupted: bool,
) -> (ExitCode, Option<String>) {
    match result {
        Err(e) if !interrupted && !matches!(e, ConfigureError::Interrupted) => {
            (ExitCode::from(2), Some(failure_message(e)))
        }
        _ => (ExitCode::SUCCESS, None),
    }
}

fn build_config(args: &CmdArgs) -> Result<RunConfig, ConfigureError> {
    Ok(RunConfigBuilder::default()
        .radio_type(args.radio_type())
        .hostname(args.hostname())
        .port(args.port())
        .udp_base(args.udp_base())
        .timeout(Duration::from_secs(args.timeout_secs()))
        .interfaces(args.interfaces().to_vec())
        .build()?)
}

fn main() -> ExitCode {
    let args = CmdArgs::parse();

    let tctl = get_trace_ctl();
    if let Some(tracing) = args.tracing()
        && let Err(e) = tctl.setup_from_string(tracing)
    {
        return fail(&format!("Invalid tracing configuration: {e}"));
    }
    if args.show_tracing_tags() {
        tctl.dump_targets_by_tag();
        return ExitCode::SUCCESS;
    }
    if args.show_tracing_targets() {
        tctl.dump();
        return ExitCode::SUCCESS;
    }

    let registry = RadioRegistry::builtin();
    if args.list_radios() {
        for radio_type in registry.radio_types() {
            println!("{radio_type}");
        }
        return ExitCode::SUCCESS;
    }

    let interrupt = Arc::new(AtomicBool::new(false));
    let flag = interrupt.clone();
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed)) {
        warn!("Could not install the interrupt handler: {e}");
    }

    let result = build_config(&args).and_then(|config| {
        let resolver = SystemResolver::snapshot();
        run(&config, &registry, &resolver, &interrupt)
    });
    let interrupted = interrupt.load(Ordering::Relaxed);
    match &result {
        Ok(report) => print!("{report}"),
        Err(e) if interrupted || matches!(e, ConfigureError::Interrupted) => info!("Interrupted"),
        Err(e) => debug!("Run failed: {e:?}"),
    }
    let (status, message) = exit_status(&result, interrupted);
    if let Some(message) = message {
        eprintln!("{message}");
    }
    status
}
