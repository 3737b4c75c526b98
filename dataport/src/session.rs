// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Scoped use of a radio connection in configuration mode

use std::sync::atomic::{AtomicBool, Ordering};

use radio::{Command, RadioConnection, RadioError, Response};
use tracing::{debug, error};

use crate::errors::ConfigureError;

/// Exclusive use of a radio connection for one run.
///
/// Once `CFG 1` has been sent, `CFG 0` is sent exactly once:
/// by [`RadioSession::exit_config_mode`] or, failing that, when the session is
/// dropped. Commands other than `CFG 0` are refused once the interrupt flag is raised.
pub struct RadioSession<'a, C: RadioConnection + ?Sized> {
    conn: &'a mut C,
    interrupt: Option<&'a AtomicBool>,
    echo: bool,
    config_mode: bool,
    commands: usize,
}

impl<'a, C: RadioConnection + ?Sized> RadioSession<'a, C> {
    /// Wrap a connection. With `echo`, commands and responses are printed to stdout.
    pub fn new(conn: &'a mut C, interrupt: Option<&'a AtomicBool>, echo: bool) -> Self {
        Self {
            conn,
            interrupt,
            echo,
            config_mode: false,
            commands: 0,
        }
    }

    pub fn connection(&self) -> &C {
        &*self.conn
    }

    /// Number of commands sent so far
    pub fn commands(&self) -> usize {
        self.commands
    }

    fn interrupted(&self) -> bool {
        self.interrupt.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn send(&mut self, command: &Command) -> Result<Response, RadioError> {
        self.commands += 1;
        if self.echo {
            println!(">> {command}");
        }
        let result = self.conn.send_command(command);
        if self.echo {
            match &result {
                Ok(response) => println!("{response}"),
                Err(RadioError::CommandFailure { reply, .. }) => println!("{reply}"),
                Err(_) => {}
            }
        }
        result
    }

    /// Issue a command in the current mode.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigureError::Interrupted`] without sending anything if the
    /// run was interrupted, or with the radio error if the command fails.
    pub fn issue(&mut self, command: &Command) -> Result<Response, ConfigureError> {
        if self.interrupted() {
            debug!("Interrupted: not sending '{command}'");
            return Err(ConfigureError::Interrupted);
        }
        Ok(self.send(command)?)
    }

    /// Put the radio in configuration mode. Once `CFG 1` is on its way the
    /// session owes the radio a `CFG 0`, even if `CFG 1` fails.
    ///
    /// # Errors
    ///
    /// As [`RadioSession::issue`].
    pub fn enter_config_mode(&mut self) -> Result<(), ConfigureError> {
        if self.interrupted() {
            return Err(ConfigureError::Interrupted);
        }
        self.config_mode = true;
        self.send(&Command::EnterConfigMode)?;
        Ok(())
    }

    /// Return the radio to normal mode. Does nothing if `CFG 1` was never sent
    /// or configuration mode was already left. Not subject to interruption.
    ///
    /// # Errors
    ///
    /// Fails if the radio does not accept `CFG 0`.
    pub fn exit_config_mode(&mut self) -> Result<(), ConfigureError> {
        if !self.config_mode {
            return Ok(());
        }
        self.config_mode = false;
        self.send(&Command::ExitConfigMode)?;
        Ok(())
    }
}

impl<C: RadioConnection + ?Sized> Drop for RadioSession<'_, C> {
    fn drop(&mut self) {
        if self.config_mode {
            debug!("Leaving configuration mode on release of {}", self.conn.model_name());
            if let Err(e) = self.exit_config_mode() {
                error!("Could not exit configuration mode: {e}");
            }
        }
    }
}
