// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full-set reconciliation of checkbox state against the engine.
//!
//! Checkbox inputs do not report which one fired, only the collective state
//! after the change. [`reconcile`] therefore replays every reported
//! `(identifier, checked)` pair through
//! [`set_visibility`](crate::visibility::set_visibility). Unchanged layers
//! cost a lookup and nothing else, so a pass rebuilds only what differs.
//!
//! Entries are processed in the order given. Each entry is independent: a
//! failure is recorded in the [`ReconcileReport`] and the pass moves on.
//!
//! # Duplicate identifiers
//!
//! Two checkboxes may control the same engine layer. Within one pass the
//! later entry wins, since it is applied after the earlier one. The pass
//! does not treat this as a conflict; it only counts such identifiers in
//! [`ReconcileSummary::duplicate_identifiers`] and lists them through
//! [`ReconcileReport::duplicate_identifiers`].

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use crate::LayerError;
use crate::engine::{EngineState, SceneEngine};
use crate::trace::{ReconcileSummary, ToggleOutcome, Tracer};
use crate::visibility::{Toggle, set_visibility};

/// One checkbox as reported by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CheckboxState {
    /// Engine layer identifier the checkbox controls.
    pub identifier: String,
    /// Whether the checkbox is checked, i.e. the desired visibility.
    pub checked: bool,
}

impl CheckboxState {
    /// Creates a checkbox state.
    #[must_use]
    pub fn new(identifier: impl Into<String>, checked: bool) -> Self {
        Self {
            identifier: identifier.into(),
            checked,
        }
    }
}

/// The result of reconciling one checkbox entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryOutcome {
    /// Identifier of the entry.
    pub identifier: String,
    /// Desired visibility of the entry.
    pub desired: bool,
    /// What happened.
    pub result: Result<Toggle, LayerError>,
}

impl EntryOutcome {
    /// Returns the outcome as a plain [`ToggleOutcome`].
    #[must_use]
    pub fn outcome(&self) -> ToggleOutcome {
        ToggleOutcome::from(&self.result)
    }
}

/// Per-entry outcomes of a [`reconcile`] pass, in processing order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    entries: Vec<EntryOutcome>,
    summary: ReconcileSummary,
}

impl ReconcileReport {
    /// Returns every entry outcome in processing order.
    #[must_use]
    pub fn entries(&self) -> &[EntryOutcome] {
        &self.entries
    }

    /// Returns the per-outcome counts.
    #[must_use]
    pub const fn summary(&self) -> &ReconcileSummary {
        &self.summary
    }

    /// Returns the number of rebuild requests issued during the pass.
    #[must_use]
    pub const fn rebuilds(&self) -> usize {
        self.summary.changed
    }

    /// Iterates over entries that failed.
    pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.entries.iter().filter(|e| e.result.is_err())
    }

    /// Returns `true` if no entry failed.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.summary.failures() == 0
    }

    /// Returns identifiers that more than one entry reported, sorted.
    #[must_use]
    pub fn duplicate_identifiers(&self) -> Vec<&str> {
        duplicates(self.entries.iter().map(|e| e.identifier.as_str()))
            .into_iter()
            .collect()
    }
}

/// Applies every entry of `ui_state` to the engine held by `state`.
///
/// Before the engine is ready every entry reports
/// [`LayerError::EngineUnready`]; nothing is queued for later.
pub fn reconcile<E: SceneEngine>(
    state: &mut EngineState<E>,
    ui_state: &[CheckboxState],
    tracer: &mut Tracer<'_>,
) -> ReconcileReport {
    let mut report = ReconcileReport {
        entries: Vec::with_capacity(ui_state.len()),
        summary: ReconcileSummary::default(),
    };

    for entry in ui_state {
        let result = set_visibility(state, &entry.identifier, entry.checked, tracer);
        report.summary.record(ToggleOutcome::from(&result));
        report.entries.push(EntryOutcome {
            identifier: entry.identifier.clone(),
            desired: entry.checked,
            result,
        });
    }

    report.summary.duplicate_identifiers =
        duplicates(ui_state.iter().map(|e| e.identifier.as_str())).len();
    tracer.reconcile(&report.summary);
    report
}

fn duplicates<'a>(identifiers: impl Iterator<Item = &'a str>) -> BTreeSet<&'a str> {
    let mut seen = BTreeSet::new();
    let mut repeated = BTreeSet::new();
    for id in identifiers {
        if !seen.insert(id) {
            repeated.insert(id);
        }
    }
    repeated
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::*;
    use crate::engine::RebuildScope;
    use crate::trace::TraceSink;
    use crate::tree::{ConfigTree, LayerNode, LayerPath};

    #[derive(Debug, Default)]
    struct RecordingEngine {
        tree: ConfigTree,
        scopes: Vec<RebuildScope>,
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

    fn ready(tree: ConfigTree) -> EngineState<RecordingEngine> {
        let mut state = EngineState::default();
        state.set_ready(RecordingEngine {
            tree,
            scopes: Vec::new(),
        });
        state
    }

    fn scenario_tree() -> ConfigTree {
        ConfigTree::new()
            .with_layer("a", LayerNode::new())
            .with_layer("b", LayerNode::new().with_sublayer("c", LayerNode::new()))
    }

    fn rebuilt(state: &EngineState<RecordingEngine>) -> Vec<LayerPath> {
        state
            .engine()
            .map(|e| e.scopes.iter().flat_map(|s| s.layers().iter().cloned()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn hides_top_level_and_nested() {
        let mut state = ready(scenario_tree());
        let report = reconcile(
            &mut state,
            &[CheckboxState::new("a", false), CheckboxState::new("c", false)],
            &mut Tracer::none(),
        );

        assert_eq!(report.rebuilds(), 2);
        assert!(report.is_clean());
        assert_eq!(
            rebuilt(&state),
            vec![
                LayerPath::Layer("a".to_string()),
                LayerPath::SubLayer {
                    parent: "b".to_string(),
                    key: "c".to_string(),
                },
            ]
        );
        let tree = state.engine().map(|e| &e.tree);
        assert_eq!(
            tree.and_then(|t| t.layers().get("a")).and_then(LayerNode::visible),
            Some(false)
        );
    }

    #[test]
    fn replaying_the_same_state_rebuilds_nothing() {
        let mut state = ready(scenario_tree());
        let ui = [
            CheckboxState::new("a", false),
            CheckboxState::new("b", true),
            CheckboxState::new("c", true),
        ];
        let first = reconcile(&mut state, &ui, &mut Tracer::none());
        let second = reconcile(&mut state, &ui, &mut Tracer::none());
        assert_eq!(first.rebuilds(), 1);
        assert_eq!(second.rebuilds(), 0);
        assert_eq!(second.summary().unchanged, 3);
    }

    #[test]
    fn before_ready_every_entry_is_unready() {
        let mut state = EngineState::<RecordingEngine>::Unready;
        let report = reconcile(
            &mut state,
            &[CheckboxState::new("a", false), CheckboxState::new("b", true)],
            &mut Tracer::none(),
        );
        assert_eq!(report.summary().engine_unready, 2);
        assert_eq!(report.rebuilds(), 0);
        assert!(
            report
                .entries()
                .iter()
                .all(|e| e.result == Err(LayerError::EngineUnready)),
            "every entry should report EngineUnready"
        );
    }

    #[test]
    fn missing_identifier_does_not_abort_the_pass() {
        let mut state = ready(scenario_tree());
        let report = reconcile(
            &mut state,
            &[
                CheckboxState::new("z", false),
                CheckboxState::new("a", false),
            ],
            &mut Tracer::none(),
        );
        assert_eq!(report.summary().not_found, 1);
        assert_eq!(report.rebuilds(), 1);
        let failed: Vec<_> = report.failures().map(|e| e.identifier.as_str()).collect();
        assert_eq!(failed, ["z"]);
        assert_eq!(rebuilt(&state), vec![LayerPath::Layer("a".to_string())]);
    }

    #[test]
    fn later_duplicate_wins() {
        let mut state = ready(scenario_tree());
        let report = reconcile(
            &mut state,
            &[CheckboxState::new("a", false), CheckboxState::new("a", true)],
            &mut Tracer::none(),
        );
        assert_eq!(report.duplicate_identifiers(), ["a"]);
        assert_eq!(report.summary().duplicate_identifiers, 1);
        assert_eq!(report.rebuilds(), 2, "hidden then shown again");
        let visible = state
            .engine()
            .and_then(|e| e.tree.layers().get("a"))
            .map(LayerNode::is_visible);
        assert_eq!(visible, Some(true));
    }

    #[test]
    fn empty_state_is_a_clean_pass() {
        let mut state = ready(scenario_tree());
        let report = reconcile(&mut state, &[], &mut Tracer::none());
        assert!(report.entries().is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn summary_reaches_the_sink() {
        #[derive(Default)]
        struct Summaries(Vec<ReconcileSummary>);
        impl TraceSink for Summaries {
            fn on_reconcile(&mut self, s: &ReconcileSummary) {
                self.0.push(*s);
            }
        }

        let mut sink = Summaries::default();
        let mut state = ready(scenario_tree());
        let report = reconcile(
            &mut state,
            &[CheckboxState::new("a", false), CheckboxState::new("z", true)],
            &mut Tracer::new(&mut sink),
        );
        assert_eq!(sink.0, [*report.summary()]);
        assert_eq!(sink.0[0].changed, 1);
        assert_eq!(sink.0[0].not_found, 1);
    }
}
