// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! An in-memory radio for testing code that drives a [`RadioConnection`]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::command::Command;
use crate::connection::RadioConnection;
use crate::errors::RadioError;
use crate::model::{NDR308, RadioModel};
use crate::response::Response;

/// A radio that records every command and answers `OK`, unless told otherwise.
pub struct ScriptedRadio {
    model: RadioModel,
    gige_indices: Vec<u32>,
    dip_entries: Vec<u32>,
    failures: Vec<(String, String)>,
    interrupt: Option<(usize, Arc<AtomicBool>)>,
    disconnect_after: Option<usize>,
    sent: Vec<String>,
}

impl Default for ScriptedRadio {
    fn default() -> Self {
        Self::new(NDR308)
    }
}

impl ScriptedRadio {
    #[must_use]
    pub fn new(model: RadioModel) -> Self {
        Self {
            gige_indices: model.gige_index_range(),
            dip_entries: model.dip_entry_index_range(0),
            model,
            failures: Vec::new(),
            interrupt: None,
            disconnect_after: None,
            sent: Vec::new(),
        }
    }
    /// Override the data-port indices the radio reports
    #[must_use]
    pub fn with_gige_indices(mut self, indices: &[u32]) -> Self {
        self.gige_indices = indices.to_vec();
        self
    }
    /// Override the DIP table entry indices the radio reports for every port
    #[must_use]
    pub fn with_dip_entries(mut self, entries: &[u32]) -> Self {
        self.dip_entries = entries.to_vec();
        self
    }
    /// Answer `reply` (an `ERROR ...` line) to the command whose text is `command`
    #[must_use]
    pub fn fail_on(mut self, command: &str, reply: &str) -> Self {
        self.failures.push((command.to_string(), reply.to_string()));
        self
    }
    /// Raise `flag` once `count` commands have been answered
    #[must_use]
    pub fn interrupt_after(mut self, count: usize, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some((count, flag));
        self
    }
    /// Behave as a closed connection from the `count`-th command on
    #[must_use]
    pub fn disconnect_after(mut self, count: usize) -> Self {
        self.disconnect_after = Some(count);
        self
    }
    /// The text of all the commands received, in order
    #[must_use]
    pub fn sent(&self) -> &[String] {
        &self.sent
    }
    /// How many times a command with the given text was received
    #[must_use]
    pub fn count(&self, command: &str) -> usize {
        self.sent.iter().filter(|c| *c == command).count()
    }
}

impl RadioConnection for ScriptedRadio {
    fn model_name(&self) -> &str {
        self.model.name
    }

    fn send_command(&mut self, command: &Command) -> Result<Response, RadioError> {
        if self.disconnect_after.is_some_and(|n| self.sent.len() >= n) {
            return Err(RadioError::ConnectionClosed);
        }
        let text = command.to_string();
        self.sent.push(text.clone());
        if let Some((count, flag)) = &self.interrupt
            && self.sent.len() >= *count
        {
            flag.store(true, Ordering::Relaxed);
        }
        if let Some((_, reply)) = self.failures.iter().find(|(c, _)| *c == text) {
            return Err(RadioError::CommandFailure {
                command: text,
                reply: reply.clone(),
            });
        }
        Ok(Response::new(vec![text]))
    }

    fn gige_index_range(&self) -> Vec<u32> {
        self.gige_indices.clone()
    }

    fn gige_dip_entry_index_range(&self, _gige_index: u32) -> Vec<u32> {
        self.dip_entries.clone()
    }
}
