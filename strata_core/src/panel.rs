// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layer toggle panel as seen by its two collaborators.
//!
//! [`LayerPanel`] ties the pieces together. The engine side calls
//! [`on_engine_ready`](LayerPanel::on_engine_ready) once its scene is
//! loaded. The presentation side renders [`registry`](LayerPanel::registry)
//! and forwards the full checkbox set to
//! [`on_checkbox_set_changed`](LayerPanel::on_checkbox_set_changed) on every
//! change.

use alloc::vec::Vec;

use crate::LayerError;
use crate::engine::{EngineState, SceneEngine};
use crate::options::PanelOptions;
use crate::registry::LayerRegistry;
use crate::sync::{CheckboxState, ReconcileReport, reconcile};
use crate::trace::{EngineReadyEvent, NoopSink, TraceSink, Tracer};
use crate::visibility::{Toggle, set_visibility};

/// A map overlay toggle panel bound to a rendering engine.
///
/// `S` receives diagnostics; the default [`NoopSink`] discards them.
#[derive(Debug)]
pub struct LayerPanel<E, S = NoopSink> {
    registry: LayerRegistry,
    options: PanelOptions,
    engine: EngineState<E>,
    sink: S,
}

impl<E: SceneEngine> LayerPanel<E> {
    /// Creates a panel that discards diagnostics.
    #[must_use]
    pub fn new(registry: LayerRegistry, options: PanelOptions) -> Self {
        Self::with_sink(registry, options, NoopSink)
    }
}

impl<E: SceneEngine, S: TraceSink> LayerPanel<E, S> {
    /// Creates a panel that reports diagnostics to `sink`.
    #[must_use]
    pub fn with_sink(registry: LayerRegistry, options: PanelOptions, sink: S) -> Self {
        Self {
            registry,
            options,
            engine: EngineState::Unready,
            sink,
        }
    }

    /// Returns the layers this panel renders.
    #[must_use]
    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    /// Returns the presentation options.
    #[must_use]
    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    /// Returns the diagnostics sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the diagnostics sink for mutation.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the panel and returns its diagnostics sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Returns `true` once the engine has signalled readiness.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.engine.is_ready()
    }

    /// Returns the engine, if ready.
    #[must_use]
    pub fn engine(&self) -> Option<&E> {
        self.engine.engine()
    }

    /// Handles the engine's ready signal.
    ///
    /// Emits an [`EngineReadyEvent`] listing the top-level layers. A repeated
    /// signal replaces the held engine.
    pub fn on_engine_ready(&mut self, engine: E) {
        let names: Vec<&str> = engine.config().top_level_names().collect();
        Tracer::new(&mut self.sink).engine_ready(&EngineReadyEvent {
            available_layers: &names,
        });
        drop(names);
        self.engine.set_ready(engine);
    }

    /// Lists the top-level layer identifiers of the engine's tree.
    ///
    /// Sub-layers are not listed.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::EngineUnready`] before the engine is ready.
    pub fn available_layer_names(&self) -> Result<Vec<&str>, LayerError> {
        let engine = self.engine.engine().ok_or(LayerError::EngineUnready)?;
        Ok(engine.config().top_level_names().collect())
    }

    /// Sets the visibility of a single layer by identifier.
    ///
    /// # Errors
    ///
    /// See [`set_visibility`](crate::visibility::set_visibility).
    pub fn set_layer_visibility(
        &mut self,
        identifier: &str,
        visible: bool,
    ) -> Result<Toggle, LayerError> {
        set_visibility(
            &mut self.engine,
            identifier,
            visible,
            &mut Tracer::new(&mut self.sink),
        )
    }

    /// Reconciles the full checkbox set reported by the presentation layer.
    pub fn on_checkbox_set_changed(&mut self, ui_state: &[CheckboxState]) -> ReconcileReport {
        reconcile(
            &mut self.engine,
            ui_state,
            &mut Tracer::new(&mut self.sink),
        )
    }
}
