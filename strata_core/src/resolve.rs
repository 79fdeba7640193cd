// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifier lookup in the engine configuration tree.
//!
//! [`resolve`] is a pure lookup: it never mutates the tree and can be called
//! any number of times against a shared borrow.
//!
//! # Search order
//!
//! 1. The identifier as a top-level key.
//! 2. The identifier as a sub-layer key of each top-level layer, walking
//!    top-level layers in engine key order. The first parent that contains
//!    it wins; an identifier present under several parents is not an error.
//!
//! Nothing below the first sub-layer level is searched. An identifier that
//! only exists two levels down reports [`ResolveError::NotFound`].

use alloc::string::String;
use core::fmt;

use crate::tree::{ConfigTree, LayerNode, LayerPath};

/// A node located by [`resolve`].
#[derive(Clone, Debug)]
pub struct Resolved<'a> {
    /// Where the node lives in the tree.
    pub path: LayerPath,
    /// The node itself.
    pub node: &'a LayerNode,
}

/// Errors from [`resolve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// No top-level layer or first-level sub-layer has this identifier.
    NotFound {
        /// The identifier that was looked up.
        identifier: String,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { identifier } => write!(f, "layer `{identifier}` not found"),
        }
    }
}

impl core::error::Error for ResolveError {}

/// Locates the node for `identifier` in `tree`.
///
/// A top-level match always takes precedence over a sub-layer with the same
/// key.
///
/// # Errors
///
/// Returns [`ResolveError::NotFound`] if neither the top level nor any
/// first-level sub-layer map contains `identifier`.
pub fn resolve<'a>(tree: &'a ConfigTree, identifier: &str) -> Result<Resolved<'a>, ResolveError> {
    if let Some(node) = tree.layers().get(identifier) {
        return Ok(Resolved {
            path: LayerPath::Layer(identifier.into()),
            node,
        });
    }

    for (parent, layer) in tree.layers().iter() {
        if let Some(node) = layer.sublayers().get(identifier) {
            return Ok(Resolved {
                path: LayerPath::SubLayer {
                    parent: parent.into(),
                    key: identifier.into(),
                },
                node,
            });
        }
    }

    Err(ResolveError::NotFound {
        identifier: identifier.into(),
    })
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    fn sample() -> ConfigTree {
        ConfigTree::new()
            .with_layer("a", LayerNode::new())
            .with_layer("b", LayerNode::new().with_sublayer("c", LayerNode::new()))
    }

    #[test]
    fn finds_top_level() {
        let tree = sample();
        let found = resolve(&tree, "a").map(|r| r.path);
        assert_eq!(found, Ok(LayerPath::Layer("a".to_string())));
    }

    #[test]
    fn finds_first_level_sublayer() {
        let tree = sample();
        let found = resolve(&tree, "c").map(|r| r.path);
        assert_eq!(
            found,
            Ok(LayerPath::SubLayer {
                parent: "b".to_string(),
                key: "c".to_string(),
            })
        );
    }

    #[test]
    fn top_level_wins_over_sublayer() {
        let tree = ConfigTree::new()
            .with_layer("x", LayerNode::new().with_visible(true))
            .with_layer(
                "group",
                LayerNode::new().with_sublayer("x", LayerNode::new().with_visible(false)),
            );
        let resolved = resolve(&tree, "x");
        assert!(
            matches!(resolved, Ok(Resolved { path: LayerPath::Layer(_), node }) if node.visible() == Some(true)),
            "top-level `x` should shadow the nested one"
        );
    }

    #[test]
    fn first_parent_in_key_order_wins() {
        let tree = ConfigTree::new()
            .with_layer("first", LayerNode::new().with_sublayer("dup", LayerNode::new()))
            .with_layer("second", LayerNode::new().with_sublayer("dup", LayerNode::new()));
        let found = resolve(&tree, "dup").map(|r| r.path);
        assert_eq!(
            found.ok().as_ref().and_then(LayerPath::parent),
            Some("first")
        );
    }

    #[test]
    fn two_levels_deep_is_not_found() {
        let tree = ConfigTree::new().with_layer(
            "outer",
            LayerNode::new().with_sublayer(
                "middle",
                LayerNode::new().with_sublayer("deep", LayerNode::new()),
            ),
        );
        assert_eq!(
            resolve(&tree, "deep").map(|r| r.path),
            Err(ResolveError::NotFound {
                identifier: "deep".to_string()
            })
        );
        assert!(resolve(&tree, "middle").is_ok());
    }

    #[test]
    fn missing_everywhere() {
        let tree = sample();
        let err = resolve(&tree, "z").map(|r| r.path);
        assert!(
            matches!(&err, Err(ResolveError::NotFound { identifier }) if identifier == "z"),
            "unexpected result {err:?}"
        );
    }

    #[test]
    fn empty_tree() {
        assert!(resolve(&ConfigTree::new(), "a").is_err());
    }
}
