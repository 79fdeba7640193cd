// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable engine double, convergence checks, and pass statistics for
//! exercising Strata panels without a real rendering engine.
//!
//! - [`RecordingEngine`] implements [`SceneEngine`] over an owned
//!   [`ConfigTree`] and records every scoped rebuild request.
//! - [`check_convergence`] compares a reported checkbox set with the tree's
//!   effective visibility.
//! - [`ReconcileStats`] is a [`TraceSink`] that accumulates pass summaries.

#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use strata_core::engine::{RebuildScope, SceneEngine};
use strata_core::resolve::resolve;
use strata_core::sync::CheckboxState;
use strata_core::trace::{ReconcileSummary, TraceSink};
use strata_core::tree::{ConfigTree, LayerPath};

// ---------------------------------------------------------------------------
// RecordingEngine
// ---------------------------------------------------------------------------

/// A [`SceneEngine`] that records rebuild requests instead of drawing.
#[derive(Clone, Debug, Default)]
pub struct RecordingEngine {
    tree: ConfigTree,
    scopes: Vec<RebuildScope>,
}

impl RecordingEngine {
    /// Creates an engine over `tree` with no recorded rebuilds.
    #[must_use]
    pub fn new(tree: ConfigTree) -> Self {
        Self {
            tree,
            scopes: Vec::new(),
        }
    }

    /// Returns the current tree.
    #[must_use]
    pub fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    /// Returns the recorded rebuild scopes in request order.
    #[must_use]
    pub fn scopes(&self) -> &[RebuildScope] {
        &self.scopes
    }

    /// Returns the number of rebuild requests.
    #[must_use]
    pub fn rebuild_count(&self) -> usize {
        self.scopes.len()
    }

    /// Returns every rebuilt layer path, flattened across requests.
    #[must_use]
    pub fn rebuilt_layers(&self) -> Vec<&LayerPath> {
        self.scopes.iter().flat_map(RebuildScope::layers).collect()
    }

    /// Returns the effective visibility of the node at `path`.
    #[must_use]
    pub fn is_visible(&self, path: &LayerPath) -> Option<bool> {
        self.tree.node(path).map(|node| node.is_visible())
    }

    /// Forgets recorded rebuilds, returning them.
    pub fn take_scopes(&mut self) -> Vec<RebuildScope> {
        core::mem::take(&mut self.scopes)
    }
}

impl SceneEngine for RecordingEngine {
    fn config(&self) -> &ConfigTree {
        &self.tree
    }

    fn config_mut(&mut self) -> &mut ConfigTree {
        &mut self.tree
    }

    fn rebuild(&mut self, scope: &RebuildScope) {
        self.scopes.push(scope.clone());
    }
}

// ---------------------------------------------------------------------------
// Convergence
// ---------------------------------------------------------------------------

/// A checkbox whose layer does not show the checked state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Divergence {
    /// The layer's effective visibility differs from the checkbox.
    Mismatch {
        /// Identifier of the checkbox.
        identifier: String,
        /// Checkbox state.
        checked: bool,
    },
    /// The identifier does not resolve in the tree.
    Unresolved {
        /// Identifier of the checkbox.
        identifier: String,
    },
}

impl Divergence {
    /// Returns the identifier of the diverging checkbox.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::Mismatch { identifier, .. } | Self::Unresolved { identifier } => identifier,
        }
    }
}

/// Result of [`check_convergence`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConvergenceReport {
    /// Distinct identifiers compared.
    pub compared: usize,
    /// Checkboxes that do not match the tree, in first-reported order.
    pub divergences: Vec<Divergence>,
}

impl ConvergenceReport {
    /// Returns `true` if every compared checkbox matches the tree.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.divergences.is_empty()
    }
}

/// Compares `ui_state` with the effective visibility in `tree`.
///
/// When an identifier appears several times, only its last entry counts,
/// since that is the one a reconciliation pass applies last.
#[must_use]
pub fn check_convergence(tree: &ConfigTree, ui_state: &[CheckboxState]) -> ConvergenceReport {
    let mut last: BTreeMap<&str, bool> = BTreeMap::new();
    let mut order: Vec<&str> = Vec::new();
    for entry in ui_state {
        if last.insert(&entry.identifier, entry.checked).is_none() {
            order.push(&entry.identifier);
        }
    }

    let mut report = ConvergenceReport {
        compared: order.len(),
        divergences: Vec::new(),
    };
    for identifier in order {
        let checked = last.get(identifier).copied().unwrap_or_default();
        match resolve(tree, identifier) {
            Ok(resolved) if resolved.node.is_visible() == checked => {}
            Ok(_) => report.divergences.push(Divergence::Mismatch {
                identifier: identifier.into(),
                checked,
            }),
            Err(_) => report.divergences.push(Divergence::Unresolved {
                identifier: identifier.into(),
            }),
        }
    }
    report
}

// ---------------------------------------------------------------------------
// ReconcileStats
// ---------------------------------------------------------------------------

/// Aggregate counts across reconciliation passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Number of passes observed.
    pub passes: u64,
    /// Total checkbox entries across passes.
    pub entries: u64,
    /// Total rebuild requests across passes.
    pub rebuilds: u64,
    /// Total failed entries across passes.
    pub failures: u64,
    /// Largest number of rebuilds in a single pass.
    pub max_rebuilds_per_pass: u64,
}

impl ReconcileStats {
    /// Folds one pass summary into the totals.
    pub fn observe(&mut self, summary: &ReconcileSummary) {
        self.passes = self.passes.saturating_add(1);
        self.entries = self.entries.saturating_add(summary.entries as u64);
        self.rebuilds = self.rebuilds.saturating_add(summary.changed as u64);
        self.failures = self.failures.saturating_add(summary.failures() as u64);
        self.max_rebuilds_per_pass = self.max_rebuilds_per_pass.max(summary.changed as u64);
    }

    /// Rebuilds per 1000 processed entries.
    #[must_use]
    pub fn rebuild_rate_per_1000(&self) -> f64 {
        if self.entries == 0 {
            0.0
        } else {
            self.rebuilds as f64 * 1000.0 / self.entries as f64
        }
    }
}

impl TraceSink for ReconcileStats {
    fn on_reconcile(&mut self, s: &ReconcileSummary) {
        self.observe(s);
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use strata_core::tree::LayerNode;

    fn tree() -> ConfigTree {
        ConfigTree::new()
            .with_layer("a", LayerNode::new().with_visible(false))
            .with_layer("b", LayerNode::new().with_sublayer("c", LayerNode::new()))
    }

    #[test]
    fn converged_state() {
        let report = check_convergence(
            &tree(),
            &[
                CheckboxState::new("a", false),
                CheckboxState::new("b", true),
                CheckboxState::new("c", true),
            ],
        );
        assert!(report.is_converged());
        assert_eq!(report.compared, 3);
    }

    #[test]
    fn mismatch_and_unresolved() {
        let report = check_convergence(
            &tree(),
            &[CheckboxState::new("a", true), CheckboxState::new("z", true)],
        );
        assert_eq!(
            report.divergences,
            [
                Divergence::Mismatch {
                    identifier: "a".to_string(),
                    checked: true,
                },
                Divergence::Unresolved {
                    identifier: "z".to_string(),
                },
            ]
        );
    }

    #[test]
    fn last_duplicate_counts() {
        let report = check_convergence(
            &tree(),
            &[CheckboxState::new("a", true), CheckboxState::new("a", false)],
        );
        assert!(report.is_converged());
        assert_eq!(report.compared, 1);
    }

    #[test]
    fn recording_engine_records() {
        let mut engine = RecordingEngine::new(tree());
        let path = LayerPath::Layer("a".to_string());
        engine.rebuild(&RebuildScope::single(path.clone()));
        assert_eq!(engine.rebuild_count(), 1);
        assert_eq!(engine.rebuilt_layers(), [&path]);
        assert_eq!(engine.is_visible(&path), Some(false));
        assert_eq!(engine.take_scopes().len(), 1);
        assert_eq!(engine.rebuild_count(), 0);
    }

    #[test]
    fn stats_accumulate() {
        let mut stats = ReconcileStats::default();
        stats.observe(&ReconcileSummary {
            entries: 4,
            changed: 1,
            unchanged: 2,
            not_found: 1,
            engine_unready: 0,
            duplicate_identifiers: 0,
        });
        stats.observe(&ReconcileSummary {
            entries: 4,
            changed: 3,
            unchanged: 1,
            ..ReconcileSummary::default()
        });
        assert_eq!(stats.passes, 2);
        assert_eq!(stats.rebuilds, 4);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.max_rebuilds_per_pass, 3);
        assert!((stats.rebuild_rate_per_1000() - 500.0).abs() < 1e-9);
    }
}
