// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Registry mapping radio-type identifiers to radio models

use std::time::Duration;

use ordermap::OrderMap;
use tracing::{debug, info};

use crate::connection::Radio;
use crate::errors::RadioError;
use crate::link::{TcpLink, Transport};
use crate::model::{NDR308, NDR318, NDR318A, NDR818, RadioModel};

/// The radio types a run can target. Identifiers are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct RadioRegistry {
    models: OrderMap<String, RadioModel>,
}

impl RadioRegistry {
    /// An empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with all the built-in models
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("ndr308", NDR308);
        registry.register("ndr318", NDR318);
        registry.register("ndr318a", NDR318A);
        registry.register("ndr818", NDR818);
        registry
    }

    /// Register a model under an identifier, replacing any model registered with the same one
    pub fn register(&mut self, radio_type: &str, model: RadioModel) {
        debug!("Registering radio type '{radio_type}' as {}", model.name);
        self.models.insert(radio_type.to_ascii_lowercase(), model);
    }

    /// The registered identifiers, in registration order
    pub fn radio_types(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Look up the model of a radio type.
    ///
    /// # Errors
    ///
    /// Fails with [`RadioError::UnsupportedRadioType`] if no model is registered under `radio_type`.
    pub fn resolve(&self, radio_type: &str) -> Result<&RadioModel, RadioError> {
        self.models
            .get(&radio_type.to_ascii_lowercase())
            .ok_or_else(|| RadioError::UnsupportedRadioType {
                requested: radio_type.to_string(),
                supported: self.radio_types().collect::<Vec<_>>().join(", "),
            })
    }

    /// Resolve a radio type and connect to its control port.
    ///
    /// # Errors
    ///
    /// Fails if the type is unknown, the model cannot use `transport`, or the
    /// connection cannot be established.
    pub fn connect(
        &self,
        radio_type: &str,
        transport: Transport,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<Radio, RadioError> {
        let model = self.resolve(radio_type)?;
        if !model.supports(transport) {
            return Err(RadioError::UnsupportedTransport {
                model: model.name,
                transport,
            });
        }
        let link = match transport {
            Transport::Tcp => TcpLink::connect(host, port, timeout),
        }
        .map_err(|source| RadioError::ConnectionError {
            host: host.to_string(),
            port,
            transport,
            source,
        })?;
        info!("Connected to {} at {host}:{port} over {transport}", model.name);
        Ok(Radio::new(model.clone(), Box::new(link)))
    }
}
