// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering engine contract and readiness lifecycle.
//!
//! Strata does not draw anything. The rendering engine owns the layer
//! configuration tree and knows how to redraw; Strata only needs three things
//! from it, captured by the [`SceneEngine`] trait:
//!
//! - read access to the [`ConfigTree`],
//! - write access so `visible` flags of resolved nodes can be flipped,
//! - a **scoped rebuild** that refreshes only the named layers.
//!
//! The trait has no full-reconfiguration method, so the cost of a toggle
//! scales with the number of layers that changed rather than with the size
//! of the scene.
//!
//! # Readiness
//!
//! Engines usually finish loading after the panel is constructed. The panel
//! holds an [`EngineState`], which starts [`Unready`](EngineState::Unready)
//! and becomes [`Ready`](EngineState::Ready) when the host forwards the
//! engine's ready signal. Every operation that needs the tree goes through
//! [`EngineState::engine_mut`] and reports
//! [`LayerError::EngineUnready`](crate::LayerError::EngineUnready) when the
//! engine has not arrived yet.
//!
//! # Hosting pseudocode
//!
//! ```rust,ignore
//! let mut panel = LayerPanel::with_sink(registry, options, PrettyPrintSink::stderr());
//!
//! engine.on_ready(|scene| panel.on_engine_ready(scene));
//!
//! checkboxes.on_change(|| {
//!     let ui_state = checkboxes.current_state();
//!     let report = panel.on_checkbox_set_changed(&ui_state);
//!     // `report` holds one outcome per checkbox.
//! });
//! ```

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use crate::tree::{ConfigTree, LayerPath};

/// The set of layers an engine should refresh.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RebuildScope {
    layers: Vec<LayerPath>,
}

impl RebuildScope {
    /// Creates a scope naming exactly one layer.
    #[must_use]
    pub fn single(path: LayerPath) -> Self {
        Self { layers: vec![path] }
    }

    /// Returns the layers in this scope.
    #[must_use]
    pub fn layers(&self) -> &[LayerPath] {
        &self.layers
    }
}

/// The engine-side collaborator that owns the layer configuration tree.
pub trait SceneEngine {
    /// Returns the current layer configuration.
    fn config(&self) -> &ConfigTree;

    /// Returns the layer configuration for mutation.
    ///
    /// Strata only ever changes the `visible` attribute of nodes it has
    /// resolved through this reference.
    fn config_mut(&mut self) -> &mut ConfigTree;

    /// Refreshes the layers named in `scope`, picking up their current
    /// configuration.
    fn rebuild(&mut self, scope: &RebuildScope);
}

impl<E: SceneEngine + ?Sized> SceneEngine for &mut E {
    fn config(&self) -> &ConfigTree {
        (**self).config()
    }

    fn config_mut(&mut self) -> &mut ConfigTree {
        (**self).config_mut()
    }

    fn rebuild(&mut self, scope: &RebuildScope) {
        (**self).rebuild(scope);
    }
}

impl<E: SceneEngine + ?Sized> SceneEngine for Box<E> {
    fn config(&self) -> &ConfigTree {
        (**self).config()
    }

    fn config_mut(&mut self) -> &mut ConfigTree {
        (**self).config_mut()
    }

    fn rebuild(&mut self, scope: &RebuildScope) {
        (**self).rebuild(scope);
    }
}

/// Two-state engine lifecycle.
#[derive(Debug)]
pub enum EngineState<E> {
    /// The engine has not signalled readiness yet.
    Unready,
    /// The engine is loaded and its configuration tree can be used.
    Ready(E),
}

impl<E> Default for EngineState<E> {
    fn default() -> Self {
        Self::Unready
    }
}

impl<E> EngineState<E> {
    /// Records the engine's ready signal.
    ///
    /// A repeated signal replaces the held engine. Forwarding the same engine
    /// twice is harmless.
    pub fn set_ready(&mut self, engine: E) {
        *self = Self::Ready(engine);
    }

    /// Returns `true` once the engine has signalled readiness.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Returns the engine, if ready.
    #[must_use]
    pub const fn engine(&self) -> Option<&E> {
        match self {
            Self::Unready => None,
            Self::Ready(engine) => Some(engine),
        }
    }

    /// Returns the engine for mutation, if ready.
    pub fn engine_mut(&mut self) -> Option<&mut E> {
        match self {
            Self::Unready => None,
            Self::Ready(engine) => Some(engine),
        }
    }
}
