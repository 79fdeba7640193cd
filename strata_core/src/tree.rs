// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine layer configuration tree.
//!
//! The rendering engine owns a tree of layer nodes keyed by identifier. A
//! top-level layer may carry sub-layers, which are themselves layer nodes.
//! Strata reads this tree and flips the `visible` attribute of nodes it
//! resolves; it never adds, removes, or reorders entries.
//!
//! # Visibility default
//!
//! A node's `visible` attribute is optional. Absence means the engine draws
//! the layer, so the three stored states resolve to a boolean through
//! [`DEFAULT_VISIBLE`]:
//!
//! | stored        | effective |
//! |---------------|-----------|
//! | `Some(true)`  | `true`    |
//! | `Some(false)` | `false`   |
//! | `None`        | `true`    |

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Visibility assumed for a layer whose `visible` attribute is absent.
pub const DEFAULT_VISIBLE: bool = true;

/// A single layer in the engine's configuration tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerNode {
    visible: Option<bool>,
    sublayers: LayerMap,
}

impl LayerNode {
    /// Creates a node with no explicit visibility and no sub-layers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this node with an explicit `visible` attribute.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Returns this node with `node` appended as a sub-layer under `key`.
    #[must_use]
    pub fn with_sublayer(mut self, key: impl Into<String>, node: Self) -> Self {
        self.sublayers.insert(key, node);
        self
    }

    /// Returns the stored `visible` attribute, `None` when absent.
    #[inline]
    #[must_use]
    pub const fn visible(&self) -> Option<bool> {
        self.visible
    }

    /// Returns the effective visibility, applying [`DEFAULT_VISIBLE`] when the
    /// attribute is absent.
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(DEFAULT_VISIBLE)
    }

    /// Sets the `visible` attribute.
    #[inline]
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = Some(visible);
    }

    /// Returns the sub-layers of this node in engine key order.
    #[must_use]
    pub fn sublayers(&self) -> &LayerMap {
        &self.sublayers
    }

    /// Returns the sub-layers for engine-side editing.
    pub fn sublayers_mut(&mut self) -> &mut LayerMap {
        &mut self.sublayers
    }
}

/// Identifier-keyed layer nodes in insertion order.
///
/// Keys are unique: inserting an existing key replaces the node in place and
/// keeps its position, like assigning to an existing property of an ordered
/// object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerMap {
    entries: Vec<(String, LayerNode)>,
}

impl LayerMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `node` under `key`, returning the node it replaced.
    pub fn insert(&mut self, key: impl Into<String>, node: LayerNode) -> Option<LayerNode> {
        let key = key.into();
        if let Some(slot) = self.get_mut(&key) {
            return Some(core::mem::replace(slot, node));
        }
        self.entries.push((key, node));
        None
    }

    /// Returns the node stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LayerNode> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    /// Returns the node stored under `key` for mutation.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut LayerNode> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over `(key, node)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LayerNode)> {
        self.entries.iter().map(|(k, node)| (k.as_str(), node))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, LayerNode)> for LayerMap {
    fn from_iter<I: IntoIterator<Item = (K, LayerNode)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, node) in iter {
            map.insert(key, node);
        }
        map
    }
}

/// Location of a node inside a [`ConfigTree`].
///
/// Only two depths exist: a top-level layer, or a sub-layer directly below
/// one. Addressing anything deeper needs a new variant, which keeps the
/// one-level lookup limit visible in the type rather than in a loop bound.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayerPath {
    /// A top-level layer.
    Layer(String),
    /// A sub-layer of a top-level layer.
    SubLayer {
        /// Key of the top-level layer.
        parent: String,
        /// Key of the sub-layer within its parent.
        key: String,
    },
}

impl LayerPath {
    /// Returns the identifier of the addressed node.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Layer(key) | Self::SubLayer { key, .. } => key,
        }
    }

    /// Returns the top-level parent key, if this is a sub-layer.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        match self {
            Self::Layer(_) => None,
            Self::SubLayer { parent, .. } => Some(parent),
        }
    }
}

impl fmt::Display for LayerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layer(key) => f.write_str(key),
            Self::SubLayer { parent, key } => write!(f, "{parent}/{key}"),
        }
    }
}

/// The engine's layer configuration: top-level layers keyed by identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigTree {
    layers: LayerMap,
}

impl ConfigTree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            layers: LayerMap::new(),
        }
    }

    /// Returns this tree with `node` added as a top-level layer.
    #[must_use]
    pub fn with_layer(mut self, key: impl Into<String>, node: LayerNode) -> Self {
        self.layers.insert(key, node);
        self
    }

    /// Returns the top-level layers.
    #[must_use]
    pub fn layers(&self) -> &LayerMap {
        &self.layers
    }

    /// Returns the top-level layers for engine-side editing.
    pub fn layers_mut(&mut self) -> &mut LayerMap {
        &mut self.layers
    }

    /// Iterates over top-level layer identifiers in engine key order.
    pub fn top_level_names(&self) -> impl Iterator<Item = &str> {
        self.layers.keys()
    }

    /// Returns the node at `path`.
    #[must_use]
    pub fn node(&self, path: &LayerPath) -> Option<&LayerNode> {
        match path {
            LayerPath::Layer(key) => self.layers.get(key),
            LayerPath::SubLayer { parent, key } => self.layers.get(parent)?.sublayers.get(key),
        }
    }

    /// Returns the node at `path` for mutation.
    pub fn node_mut(&mut self, path: &LayerPath) -> Option<&mut LayerNode> {
        match path {
            LayerPath::Layer(key) => self.layers.get_mut(key),
            LayerPath::SubLayer { parent, key } => {
                self.layers.get_mut(parent)?.sublayers.get_mut(key)
            }
        }
    }
}

impl From<LayerMap> for ConfigTree {
    fn from(layers: LayerMap) -> Self {
        Self { layers }
    }
}

impl<K: Into<String>> FromIterator<(K, LayerNode)> for ConfigTree {
    fn from_iter<I: IntoIterator<Item = (K, LayerNode)>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}
