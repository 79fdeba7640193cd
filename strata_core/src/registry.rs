// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The panel's list of toggleable layers.

use alloc::string::String;
use alloc::vec::Vec;

use crate::sync::CheckboxState;

/// A display label paired with the engine layer it controls.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayerDescriptor {
    name: String,
    identifier: String,
}

impl LayerDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
        }
    }

    /// Returns the display label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the engine layer identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// Ordered, immutable list of [`LayerDescriptor`]s.
///
/// Every input pair becomes exactly one descriptor, in input order. Several
/// descriptors may share an identifier; each is rendered and toggled on its
/// own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerRegistry {
    layers: Vec<LayerDescriptor>,
}

impl LayerRegistry {
    /// Builds a registry from `(name, identifier)` pairs.
    ///
    /// An empty input yields an empty, valid registry.
    #[must_use]
    pub fn initialize<I, N, Id>(layers: I) -> Self
    where
        I: IntoIterator<Item = (N, Id)>,
        N: Into<String>,
        Id: Into<String>,
    {
        layers
            .into_iter()
            .map(|(name, identifier)| LayerDescriptor::new(name, identifier))
            .collect()
    }

    /// Returns the descriptors in insertion order.
    #[must_use]
    pub fn list(&self) -> &[LayerDescriptor] {
        &self.layers
    }

    /// Returns the number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Returns the checkbox set as first rendered: every layer checked.
    #[must_use]
    pub fn initial_ui_state(&self) -> Vec<CheckboxState> {
        self.layers
            .iter()
            .map(|layer| CheckboxState::new(layer.identifier(), true))
            .collect()
    }
}

impl FromIterator<LayerDescriptor> for LayerRegistry {
    fn from_iter<I: IntoIterator<Item = LayerDescriptor>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}
