// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps an owned copy of every
//! event it receives, in arrival order, for later inspection or
//! [`export`](crate::export::export).

use strata_core::trace::{
    EngineReadyEvent, RebuildEvent, ReconcileSummary, ToggleEvent, ToggleOutcome, TraceSink,
};
use strata_core::tree::LayerPath;

/// An owned copy of a trace event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// An [`EngineReadyEvent`].
    EngineReady {
        /// Top-level layer identifiers at readiness.
        available_layers: Vec<String>,
    },
    /// A [`ToggleEvent`].
    Toggle {
        /// Requested identifier.
        identifier: String,
        /// Requested visibility.
        desired: bool,
        /// How the toggle ended.
        outcome: ToggleOutcome,
    },
    /// A [`RebuildEvent`].
    Rebuild {
        /// Layers in the rebuild scope.
        layers: Vec<LayerPath>,
    },
    /// A [`ReconcileSummary`].
    Reconcile(ReconcileSummary),
}

/// A [`TraceSink`] that records owned events.
#[derive(Clone, Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events in arrival order.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Iterates over recorded toggles whose outcome is a failure.
    pub fn failed_toggles(&self) -> impl Iterator<Item = &RecordedEvent> {
        self.events.iter().filter(|e| {
            matches!(e, RecordedEvent::Toggle { outcome, .. } if outcome.is_failure())
        })
    }

    /// Forgets every recorded event.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TraceSink for RecorderSink {
    fn on_engine_ready(&mut self, e: &EngineReadyEvent<'_>) {
        self.events.push(RecordedEvent::EngineReady {
            available_layers: e.available_layers.iter().map(|&s| s.to_owned()).collect(),
        });
    }

    fn on_toggle(&mut self, e: &ToggleEvent<'_>) {
        self.events.push(RecordedEvent::Toggle {
            identifier: e.identifier.to_owned(),
            desired: e.desired,
            outcome: e.outcome,
        });
    }

    fn on_rebuild(&mut self, e: &RebuildEvent<'_>) {
        self.events.push(RecordedEvent::Rebuild {
            layers: e.scope.layers().to_vec(),
        });
    }

    fn on_reconcile(&mut self, s: &ReconcileSummary) {
        self.events.push(RecordedEvent::Reconcile(*s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut rec = RecorderSink::new();
        rec.on_engine_ready(&EngineReadyEvent {
            available_layers: &["a"],
        });
        rec.on_toggle(&ToggleEvent {
            identifier: "z",
            desired: true,
            outcome: ToggleOutcome::NotFound,
        });
        rec.on_reconcile(&ReconcileSummary {
            entries: 1,
            not_found: 1,
            ..ReconcileSummary::default()
        });

        assert_eq!(rec.events().len(), 3);
        assert_eq!(
            rec.events()[0],
            RecordedEvent::EngineReady {
                available_layers: vec!["a".to_owned()],
            }
        );
        assert_eq!(rec.failed_toggles().count(), 1);

        rec.clear();
        assert!(rec.events().is_empty());
    }
}
