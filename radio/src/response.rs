// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Framing of radio responses.
//!
//! The radio answers every command with zero or more text lines (e.g. an echo
//! of the command or query results) followed by a status line: `OK`, or a
//! line starting with `ERROR` that carries the reason.

use std::fmt::Display;

use crate::errors::RadioError;
use crate::link::Link;

/// A line of a response, once classified
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ResponseLine {
    Body(String),
    Ok,
    Error(String),
}

impl ResponseLine {
    /// Classify a raw line. Returns `None` for blank lines.
    pub(crate) fn classify(raw: &str) -> Option<Self> {
        let line = raw.trim_end_matches(['\r', '\n']).trim();
        if line.is_empty() {
            None
        } else if line.eq_ignore_ascii_case("OK") {
            Some(ResponseLine::Ok)
        } else if line.get(..5).is_some_and(|s| s.eq_ignore_ascii_case("ERROR")) {
            Some(ResponseLine::Error(line.to_string()))
        } else {
            Some(ResponseLine::Body(line.to_string()))
        }
    }
}

/// The successful response to one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    lines: Vec<String>,
}

impl Response {
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }
    /// The lines received before the `OK` status line
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Read the response to `command` from the link, up to and including its status line.
    ///
    /// # Errors
    ///
    /// Fails with [`RadioError::CommandFailure`] if the radio reports an error,
    /// [`RadioError::ConnectionClosed`] if the link ends before the status line,
    /// or [`RadioError::Io`] on read failures (including timeouts).
    pub fn read_from(link: &mut dyn Link, command: &str) -> Result<Response, RadioError> {
        let mut lines = Vec::new();
        loop {
            let Some(raw) = link.read_line()? else {
                return Err(RadioError::ConnectionClosed);
            };
            match ResponseLine::classify(&raw) {
                None => {}
                Some(ResponseLine::Body(line)) => lines.push(line),
                Some(ResponseLine::Ok) => return Ok(Response { lines }),
                Some(ResponseLine::Error(reply)) => {
                    return Err(RadioError::CommandFailure {
                        command: command.to_string(),
                        reply,
                    });
                }
            }
        }
    }
}

impl Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        write!(f, "OK")
    }
}
