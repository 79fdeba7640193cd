// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr):
//!
//! ```text
//! [ready] layers=water,roads,buildings
//! [rebuild] roads/minor
//! [toggle] minor desired=false outcome=changed
//! [reconcile] entries=3 changed=1 unchanged=1 not-found=1 unready=0 duplicates=0
//! ```

use std::io::Write;

use strata_core::trace::{
    EngineReadyEvent, RebuildEvent, ReconcileSummary, ToggleEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    failures_only: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("failures_only", &self.failures_only)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self::with_writer(writer)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            failures_only: false,
        }
    }

    /// Suppresses toggle lines for successful toggles and rebuild lines.
    ///
    /// Readiness and reconcile summaries are still written.
    #[must_use]
    pub fn failures_only(mut self) -> Self {
        self.failures_only = true;
        self
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_engine_ready(&mut self, e: &EngineReadyEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[ready] layers={}",
            e.available_layers.join(","),
        );
    }

    fn on_toggle(&mut self, e: &ToggleEvent<'_>) {
        if self.failures_only && !e.outcome.is_failure() {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[toggle] {} desired={} outcome={}",
            e.identifier,
            e.desired,
            e.outcome.as_str(),
        );
    }

    fn on_rebuild(&mut self, e: &RebuildEvent<'_>) {
        if self.failures_only {
            return;
        }
        let layers: Vec<String> = e.scope.layers().iter().map(ToString::to_string).collect();
        let _ = writeln!(self.writer, "[rebuild] {}", layers.join(","));
    }

    fn on_reconcile(&mut self, s: &ReconcileSummary) {
        let _ = writeln!(
            self.writer,
            "[reconcile] entries={} changed={} unchanged={} not-found={} unready={} \
             duplicates={}",
            s.entries,
            s.changed,
            s.unchanged,
            s.not_found,
            s.engine_unready,
            s.duplicate_identifiers,
        );
    }
}
