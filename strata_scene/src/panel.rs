// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel construction input.
//!
//! ```json
//! {
//!   "layers": { "Water": "water", "Major roads": "highway" },
//!   "options": { "collapsed": false, "position": "bottomleft" }
//! }
//! ```
//!
//! `options` and each of its keys are optional and default to
//! [`PanelOptions::default`].

use serde_json::Value;
use strata_core::options::{ControlPosition, PanelOptions};
use strata_core::registry::{LayerDescriptor, LayerRegistry};

use crate::SceneError;

/// Everything needed to construct a panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PanelConfig {
    /// Layers in document order.
    pub registry: LayerRegistry,
    /// Presentation options.
    pub options: PanelOptions,
}

/// Parses panel configuration JSON.
///
/// # Errors
///
/// Returns [`SceneError::Json`] for malformed input and the errors of
/// [`panel_config_from_value`] otherwise.
pub fn load_panel_config(json: &str) -> Result<PanelConfig, SceneError> {
    let value: Value = serde_json::from_str(json)?;
    panel_config_from_value(&value)
}

/// Builds a [`PanelConfig`] from an already parsed document.
///
/// # Errors
///
/// - [`SceneError::MissingLayers`] if there is no `layers` key.
/// - [`SceneError::NotAnObject`] if `layers` or `options` is not an object.
/// - [`SceneError::InvalidIdentifier`] if a layer maps to a non-string.
/// - [`SceneError::InvalidOption`] for a mistyped or unknown option value.
pub fn panel_config_from_value(value: &Value) -> Result<PanelConfig, SceneError> {
    let layers = value
        .get("layers")
        .ok_or(SceneError::MissingLayers)?
        .as_object()
        .ok_or_else(|| SceneError::NotAnObject {
            path: "layers".into(),
        })?;

    let registry = layers
        .iter()
        .map(|(name, identifier)| match identifier {
            Value::String(identifier) => Ok(LayerDescriptor::new(name.as_str(), identifier.as_str())),
            _ => Err(SceneError::InvalidIdentifier { name: name.clone() }),
        })
        .collect::<Result<LayerRegistry, _>>()?;

    let options = match value.get("options") {
        None | Some(Value::Null) => PanelOptions::default(),
        Some(options) => parse_options(options)?,
    };

    Ok(PanelConfig { registry, options })
}

fn parse_options(value: &Value) -> Result<PanelOptions, SceneError> {
    let object = value.as_object().ok_or_else(|| SceneError::NotAnObject {
        path: "options".into(),
    })?;
    let mut options = PanelOptions::default();

    if let Some(collapsed) = object.get("collapsed") {
        options.collapsed = collapsed.as_bool().ok_or_else(|| invalid("collapsed"))?;
    }
    if let Some(position) = object.get("position") {
        options.position = position
            .as_str()
            .and_then(|s| s.parse::<ControlPosition>().ok())
            .ok_or_else(|| invalid("position"))?;
    }
    Ok(options)
}

fn invalid(key: &str) -> SceneError {
    SceneError::InvalidOption { key: key.into() }
}
