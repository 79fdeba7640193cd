// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics for the synchronization engine.
//!
//! Strata never prints. Every observable event is passed to a [`TraceSink`],
//! whose methods all default to no-ops, so implementing only the events you
//! care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink` and is what the
//! [`visibility`](crate::visibility) and [`sync`](crate::sync) functions
//! take. Each method performs a single `Option` branch before dispatching.
//!
//! Failed toggles are always emitted as a [`ToggleEvent`] in addition to
//! being returned, so a sink that logs failures sees every dropped toggle.

use crate::LayerError;
use crate::engine::RebuildScope;
use crate::visibility::Toggle;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How a single visibility toggle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToggleOutcome {
    /// The node was mutated and a scoped rebuild requested.
    Changed,
    /// The node already had the desired visibility.
    Unchanged,
    /// The engine had not signalled readiness.
    EngineUnready,
    /// The identifier did not resolve.
    NotFound,
}

impl ToggleOutcome {
    /// Returns a short label for log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Changed => "changed",
            Self::Unchanged => "unchanged",
            Self::EngineUnready => "engine-unready",
            Self::NotFound => "not-found",
        }
    }

    /// Returns `true` for the failure outcomes.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::EngineUnready | Self::NotFound)
    }
}

impl From<&Result<Toggle, LayerError>> for ToggleOutcome {
    fn from(result: &Result<Toggle, LayerError>) -> Self {
        match result {
            Ok(Toggle::Changed) => Self::Changed,
            Ok(Toggle::Unchanged) => Self::Unchanged,
            Err(LayerError::EngineUnready) => Self::EngineUnready,
            Err(LayerError::NotFound { .. }) => Self::NotFound,
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the engine signals readiness.
#[derive(Clone, Copy, Debug)]
pub struct EngineReadyEvent<'a> {
    /// Top-level layer identifiers of the engine's tree, in key order.
    pub available_layers: &'a [&'a str],
}

/// Emitted when a visibility toggle finishes, whatever its outcome.
#[derive(Clone, Copy, Debug)]
pub struct ToggleEvent<'a> {
    /// Identifier the toggle was requested for.
    pub identifier: &'a str,
    /// Requested visibility.
    pub desired: bool,
    /// How the toggle ended.
    pub outcome: ToggleOutcome,
}

/// Emitted just before a scoped rebuild is requested from the engine.
#[derive(Clone, Copy, Debug)]
pub struct RebuildEvent<'a> {
    /// Layers being rebuilt.
    pub scope: &'a RebuildScope,
}

/// Per-pass counts produced at the end of a reconciliation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Number of checkbox entries processed.
    pub entries: usize,
    /// Entries whose layer was mutated and rebuilt.
    pub changed: usize,
    /// Entries whose layer already matched.
    pub unchanged: usize,
    /// Entries whose identifier did not resolve.
    pub not_found: usize,
    /// Entries dropped because the engine was not ready.
    pub engine_unready: usize,
    /// Identifiers reported by more than one checkbox in this pass.
    pub duplicate_identifiers: usize,
}

impl ReconcileSummary {
    /// Adds one entry outcome to the counts.
    pub fn record(&mut self, outcome: ToggleOutcome) {
        self.entries += 1;
        match outcome {
            ToggleOutcome::Changed => self.changed += 1,
            ToggleOutcome::Unchanged => self.unchanged += 1,
            ToggleOutcome::NotFound => self.not_found += 1,
            ToggleOutcome::EngineUnready => self.engine_unready += 1,
        }
    }

    /// Returns the number of failed entries.
    #[must_use]
    pub const fn failures(&self) -> usize {
        self.not_found + self.engine_unready
    }
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives diagnostic events from the synchronization engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when the engine signals readiness.
    fn on_engine_ready(&mut self, e: &EngineReadyEvent<'_>) {
        _ = e;
    }

    /// Called when a visibility toggle finishes.
    fn on_toggle(&mut self, e: &ToggleEvent<'_>) {
        _ = e;
    }

    /// Called before a scoped rebuild is requested.
    fn on_rebuild(&mut self, e: &RebuildEvent<'_>) {
        _ = e;
    }

    /// Called at the end of a reconciliation pass.
    fn on_reconcile(&mut self, s: &ReconcileSummary) {
        _ = s;
    }
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn on_engine_ready(&mut self, e: &EngineReadyEvent<'_>) {
        (**self).on_engine_ready(e);
    }

    fn on_toggle(&mut self, e: &ToggleEvent<'_>) {
        (**self).on_toggle(e);
    }

    fn on_rebuild(&mut self, e: &RebuildEvent<'_>) {
        (**self).on_rebuild(e);
    }

    fn on_reconcile(&mut self, s: &ReconcileSummary) {
        (**self).on_reconcile(s);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    sink: Option<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer")
            .field("attached", &self.sink.is_some())
            .finish()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        Self { sink: Some(sink) }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self { sink: None }
    }

    /// Emits an [`EngineReadyEvent`].
    #[inline]
    pub fn engine_ready(&mut self, e: &EngineReadyEvent<'_>) {
        if let Some(s) = &mut self.sink {
            s.on_engine_ready(e);
        }
    }

    /// Emits a [`ToggleEvent`].
    #[inline]
    pub fn toggle(&mut self, e: &ToggleEvent<'_>) {
        if let Some(s) = &mut self.sink {
            s.on_toggle(e);
        }
    }

    /// Emits a [`RebuildEvent`].
    #[inline]
    pub fn rebuild(&mut self, e: &RebuildEvent<'_>) {
        if let Some(s) = &mut self.sink {
            s.on_rebuild(e);
        }
    }

    /// Emits a [`ReconcileSummary`].
    #[inline]
    pub fn reconcile(&mut self, s: &ReconcileSummary) {
        if let Some(sink) = &mut self.sink {
            sink.on_reconcile(s);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
