// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene-document loading for Strata.
//!
//! Map engines commonly describe their layers in a scene document whose
//! `layers` object maps layer identifiers to layer objects. This crate turns
//! such a document into a [`ConfigTree`] and writes visibility back into it.
//! It also reads the panel's construction input from JSON.
//!
//! Key order of the document is preserved (`serde_json` is built with
//! `preserve_order`), so top-level iteration and first-match sub-layer lookup
//! follow the order the author wrote.
//!
//! # Layer objects
//!
//! Inside a layer object, the keys in [`LAYER_PROPERTY_KEYS`] are properties
//! of the layer itself. Every other key whose value is an object is a
//! sub-layer; other scalar keys are ignored.
//!
//! ```json
//! {
//!   "layers": {
//!     "water": { "data": { "source": "osm" }, "draw": { "polygons": {} } },
//!     "roads": {
//!       "visible": false,
//!       "highway": { "filter": { "kind": "highway" } },
//!       "minor": { "filter": { "kind": "minor_road" } }
//!     }
//!   }
//! }
//! ```

mod panel;
mod scene;

pub use panel::{PanelConfig, load_panel_config, panel_config_from_value};
pub use scene::{LAYER_PROPERTY_KEYS, apply_visibility, layers_from_value, load_layers};

use std::fmt;

/// Errors from loading scene or panel JSON.
#[derive(Debug)]
pub enum SceneError {
    /// The input is not valid JSON.
    Json(serde_json::Error),
    /// The document has no `layers` key.
    MissingLayers,
    /// A value that must be an object is something else.
    NotAnObject {
        /// Slash-separated location of the value, e.g. `layers/roads`.
        path: String,
    },
    /// A `visible` attribute is not a boolean.
    InvalidVisible {
        /// Slash-separated location of the layer.
        path: String,
    },
    /// A panel layer entry maps to something other than a string identifier.
    InvalidIdentifier {
        /// Display name of the entry.
        name: String,
    },
    /// A panel option has the wrong type or an unknown value.
    InvalidOption {
        /// Name of the option.
        key: String,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid JSON: {err}"),
            Self::MissingLayers => f.write_str("document has no `layers` object"),
            Self::NotAnObject { path } => write!(f, "`{path}` is not an object"),
            Self::InvalidVisible { path } => {
                write!(f, "`{path}/visible` is not a boolean")
            }
            Self::InvalidIdentifier { name } => {
                write!(f, "layer `{name}` does not map to a string identifier")
            }
            Self::InvalidOption { key } => write!(f, "invalid value for option `{key}`"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
