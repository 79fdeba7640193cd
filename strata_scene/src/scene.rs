// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer tree loading and visibility write-back.
//!
//! Keys listed in [`LAYER_PROPERTY_KEYS`] are never loaded as sub-layers, so
//! they are never resolvable layer identifiers.

use serde_json::{Map, Value};
use strata_core::tree::{ConfigTree, LayerMap, LayerNode};

use crate::SceneError;

/// Keys of a layer object that describe the layer rather than name a
/// sub-layer.
pub const LAYER_PROPERTY_KEYS: &[&str] = &[
    "data",
    "draw",
    "enabled",
    "exclusive",
    "filter",
    "priority",
    "properties",
    "visible",
];

/// Parses a scene document and returns its layer tree.
///
/// # Errors
///
/// Returns [`SceneError::Json`] for malformed input,
/// [`SceneError::MissingLayers`] if the document has no `layers` key, and the
/// errors of [`layers_from_value`] otherwise.
pub fn load_layers(json: &str) -> Result<ConfigTree, SceneError> {
    let document: Value = serde_json::from_str(json)?;
    let layers = document.get("layers").ok_or(SceneError::MissingLayers)?;
    layers_from_value(layers)
}

/// Builds a tree from the value of a scene document's `layers` key.
///
/// # Errors
///
/// Returns [`SceneError::NotAnObject`] if `layers` or any top-level layer is
/// not an object, and [`SceneError::InvalidVisible`] for a non-boolean
/// `visible` attribute anywhere in the tree.
pub fn layers_from_value(layers: &Value) -> Result<ConfigTree, SceneError> {
    let object = layers.as_object().ok_or_else(|| SceneError::NotAnObject {
        path: "layers".into(),
    })?;

    let mut tree = ConfigTree::new();
    for (key, value) in object {
        let path = format!("layers/{key}");
        let layer = value
            .as_object()
            .ok_or_else(|| SceneError::NotAnObject { path: path.clone() })?;
        tree.layers_mut().insert(key.as_str(), layer_node(layer, &path)?);
    }
    Ok(tree)
}

fn layer_node(object: &Map<String, Value>, path: &str) -> Result<LayerNode, SceneError> {
    let mut node = LayerNode::new();
    match object.get("visible") {
        None | Some(Value::Null) => {}
        Some(Value::Bool(visible)) => node.set_visible(*visible),
        Some(_) => {
            return Err(SceneError::InvalidVisible { path: path.into() });
        }
    }

    let mut sublayers = LayerMap::new();
    for (key, value) in object {
        if LAYER_PROPERTY_KEYS.contains(&key.as_str()) {
            continue;
        }
        if let Value::Object(child) = value {
            sublayers.insert(key.as_str(), layer_node(child, &format!("{path}/{key}"))?);
        }
    }
    *node.sublayers_mut() = sublayers;
    Ok(node)
}

/// Copies every explicit `visible` attribute of `tree` into `document`.
///
/// `document` is a full scene document with a `layers` key. Nodes without a
/// matching layer object in the document are skipped, and nodes whose
/// `visible` is absent leave the document untouched. Returns the number of
/// attributes written.
///
/// # Errors
///
/// Returns [`SceneError::MissingLayers`] if `document` has no `layers` key
/// and [`SceneError::NotAnObject`] if it is not an object.
pub fn apply_visibility(tree: &ConfigTree, document: &mut Value) -> Result<usize, SceneError> {
    let layers = document
        .get_mut("layers")
        .ok_or(SceneError::MissingLayers)?
        .as_object_mut()
        .ok_or_else(|| SceneError::NotAnObject {
            path: "layers".into(),
        })?;
    Ok(write_map(tree.layers(), layers))
}

fn write_map(map: &LayerMap, object: &mut Map<String, Value>) -> usize {
    let mut written = 0;
    for (key, node) in map.iter() {
        let Some(Value::Object(layer)) = object.get_mut(key) else {
            continue;
        };
        if let Some(visible) = node.visible() {
            layer.insert("visible".into(), Value::Bool(visible));
            written += 1;
        }
        written += write_map(node.sublayers(), layer);
    }
    written
}
