// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! A connected radio

use tracing::debug;

use crate::command::Command;
use crate::errors::RadioError;
use crate::link::Link;
use crate::model::RadioModel;
use crate::response::Response;

/// Command/response access to a radio, plus the layout of its data ports
pub trait RadioConnection {
    /// Name of the radio model behind the connection
    fn model_name(&self) -> &str;

    /// Send a command and wait for its complete response. One command is in flight at a time.
    ///
    /// # Errors
    ///
    /// Fails if the command cannot be sent, the response cannot be read, or the radio
    /// reports an error.
    fn send_command(&mut self, command: &Command) -> Result<Response, RadioError>;

    /// Indices of the gigabit data ports, in ascending order
    fn gige_index_range(&self) -> Vec<u32>;

    /// Indices of the destination-IP table entries of a data port, in ascending order
    fn gige_dip_entry_index_range(&self, gige_index: u32) -> Vec<u32>;
}

/// A radio of a known model, reached over a link
pub struct Radio {
    model: RadioModel,
    link: Box<dyn Link>,
}

impl Radio {
    #[must_use]
    pub fn new(model: RadioModel, link: Box<dyn Link>) -> Self {
        Self { model, link }
    }
}

impl RadioConnection for Radio {
    fn model_name(&self) -> &str {
        self.model.name
    }

    fn send_command(&mut self, command: &Command) -> Result<Response, RadioError> {
        let text = command.to_string();
        debug!("{}: >> {text}", self.model.name);
        self.link.send_line(&text)?;
        let response = Response::read_from(self.link.as_mut(), &text)?;
        for line in response.lines() {
            debug!("{}: << {line}", self.model.name);
        }
        Ok(response)
    }

    fn gige_index_range(&self) -> Vec<u32> {
        self.model.gige_index_range()
    }

    fn gige_dip_entry_index_range(&self, gige_index: u32) -> Vec<u32> {
        self.model.dip_entry_index_range(gige_index)
    }
}
