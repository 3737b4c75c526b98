// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The error results used by this library.

use crate::link::Transport;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RadioError {
    #[error("Unsupported radio type '{requested}' (supported: {supported})")]
    UnsupportedRadioType { requested: String, supported: String },

    #[error("Radio {model} cannot be controlled over {transport}")]
    UnsupportedTransport {
        model: &'static str,
        transport: Transport,
    },

    #[error("Could not connect to {host}:{port} over {transport}: {source}")]
    ConnectionError {
        host: String,
        port: u16,
        transport: Transport,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error on radio link: {0}")]
    Io(#[from] std::io::Error),

    #[error("Radio closed the connection")]
    ConnectionClosed,

    #[error("Command '{command}' failed: {reply}")]
    CommandFailure { command: String, reply: String },
}
