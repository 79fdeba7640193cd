// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-layer visibility toggling.
//!
//! [`set_visibility`] is the only place that writes to the engine's tree.
//! Each call is synchronous and atomic from the caller's point of view:
//! either the resolved node's `visible` attribute is flipped **and** exactly
//! one scoped rebuild naming that node is requested, or nothing is touched.
//!
//! A call whose desired visibility already matches the node's effective
//! visibility returns [`Toggle::Unchanged`] without calling the engine.
//! Reconciliation replays the whole checkbox set on every interaction, so
//! this check is what keeps the number of engine rebuilds proportional to
//! the number of layers that actually changed.

use alloc::string::String;
use core::fmt;

use crate::engine::{EngineState, RebuildScope, SceneEngine};
use crate::resolve::{ResolveError, resolve};
use crate::trace::{RebuildEvent, ToggleEvent, ToggleOutcome, Tracer};

/// Successful result of [`set_visibility`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Toggle {
    /// The node already had the desired visibility; the engine was not called.
    Unchanged,
    /// The node was updated and a scoped rebuild was requested.
    Changed,
}

/// Reasons a toggle was skipped.
///
/// None of these are fatal. The toggle is dropped, reported to the trace
/// sink, and the next interaction retries naturally because it replays the
/// full checkbox set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayerError {
    /// The engine has not signalled readiness yet.
    EngineUnready,
    /// The identifier is neither a top-level layer nor a first-level
    /// sub-layer.
    NotFound {
        /// The identifier that was looked up.
        identifier: String,
    },
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EngineUnready => f.write_str("no engine scene available to update"),
            Self::NotFound { identifier } => write!(f, "layer `{identifier}` not found"),
        }
    }
}

impl core::error::Error for LayerError {}

impl From<ResolveError> for LayerError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound { identifier } => Self::NotFound { identifier },
        }
    }
}

/// Sets the visibility of the layer `identifier` to `desired`.
///
/// The outcome is also emitted to `tracer` as a [`ToggleEvent`], and a
/// [`RebuildEvent`] precedes every rebuild request.
///
/// # Errors
///
/// - [`LayerError::EngineUnready`] if `state` is still unready.
/// - [`LayerError::NotFound`] if `identifier` does not resolve.
pub fn set_visibility<E: SceneEngine>(
    state: &mut EngineState<E>,
    identifier: &str,
    desired: bool,
    tracer: &mut Tracer<'_>,
) -> Result<Toggle, LayerError> {
    let result = apply(state, identifier, desired, tracer);
    tracer.toggle(&ToggleEvent {
        identifier,
        desired,
        outcome: ToggleOutcome::from(&result),
    });
    result
}

fn apply<E: SceneEngine>(
    state: &mut EngineState<E>,
    identifier: &str,
    desired: bool,
    tracer: &mut Tracer<'_>,
) -> Result<Toggle, LayerError> {
    let engine = state.engine_mut().ok_or(LayerError::EngineUnready)?;

    let path = {
        let resolved = resolve(engine.config(), identifier)?;
        if resolved.node.is_visible() == desired {
            return Ok(Toggle::Unchanged);
        }
        resolved.path
    };

    // The path was resolved against this same tree an instant ago.
    let node = engine
        .config_mut()
        .node_mut(&path)
        .ok_or_else(|| LayerError::NotFound {
            identifier: identifier.into(),
        })?;
    node.set_visible(desired);

    let scope = RebuildScope::single(path);
    tracer.rebuild(&RebuildEvent { scope: &scope });
    engine.rebuild(&scope);

    Ok(Toggle::Changed)
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::*;
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

    fn scopes(state: &EngineState<RecordingEngine>) -> &[RebuildScope] {
        match state.engine() {
            Some(engine) => &engine.scopes,
            None => &[],
        }
    }

    fn visible(state: &EngineState<RecordingEngine>, path: &LayerPath) -> Option<bool> {
        state
            .engine()
            .and_then(|e| e.tree.node(path))
            .and_then(LayerNode::visible)
    }

    #[test]
    fn absent_visible_and_desired_true_is_noop() {
        let mut state = ready(ConfigTree::new().with_layer("a", LayerNode::new()));
        let result = set_visibility(&mut state, "a", true, &mut Tracer::none());
        assert_eq!(result, Ok(Toggle::Unchanged));
        assert!(scopes(&state).is_empty(), "no rebuild for a no-op toggle");
        assert_eq!(
            visible(&state, &LayerPath::Layer("a".to_string())),
            None,
            "an unchanged node keeps its absent attribute"
        );
    }

    #[test]
    fn matching_explicit_visibility_is_noop() {
        let mut state = ready(
            ConfigTree::new().with_layer("a", LayerNode::new().with_visible(false)),
        );
        let result = set_visibility(&mut state, "a", false, &mut Tracer::none());
        assert_eq!(result, Ok(Toggle::Unchanged));
        assert!(scopes(&state).is_empty(), "no rebuild for a no-op toggle");
    }

    #[test]
    fn change_rebuilds_exactly_that_node() {
        let mut state = ready(
            ConfigTree::new()
                .with_layer("a", LayerNode::new())
                .with_layer("b", LayerNode::new()),
        );
        let result = set_visibility(&mut state, "a", false, &mut Tracer::none());
        assert_eq!(result, Ok(Toggle::Changed));

        let a = LayerPath::Layer("a".to_string());
        assert_eq!(visible(&state, &a), Some(false));
        assert_eq!(visible(&state, &LayerPath::Layer("b".to_string())), None);
        assert_eq!(scopes(&state), [RebuildScope::single(a)]);
    }

    #[test]
    fn second_identical_call_is_unchanged() {
        let mut state = ready(ConfigTree::new().with_layer("a", LayerNode::new()));
        let mut tracer = Tracer::none();
        assert_eq!(
            set_visibility(&mut state, "a", false, &mut tracer),
            Ok(Toggle::Changed)
        );
        assert_eq!(
            set_visibility(&mut state, "a", false, &mut tracer),
            Ok(Toggle::Unchanged)
        );
        assert_eq!(scopes(&state).len(), 1, "only the first call rebuilds");
    }

    #[test]
    fn sublayer_change_is_scoped_to_the_sublayer() {
        let mut state = ready(
            ConfigTree::new()
                .with_layer("b", LayerNode::new().with_sublayer("c", LayerNode::new())),
        );
        let result = set_visibility(&mut state, "c", false, &mut Tracer::none());
        assert_eq!(result, Ok(Toggle::Changed));

        let c = LayerPath::SubLayer {
            parent: "b".to_string(),
            key: "c".to_string(),
        };
        assert_eq!(visible(&state, &c), Some(false));
        assert_eq!(
            visible(&state, &LayerPath::Layer("b".to_string())),
            None,
            "the parent is untouched"
        );
        assert_eq!(scopes(&state), [RebuildScope::single(c)]);
    }

    #[test]
    fn unready_engine_fails_cleanly() {
        let mut state = EngineState::<RecordingEngine>::Unready;
        let result = set_visibility(&mut state, "a", false, &mut Tracer::none());
        assert_eq!(result, Err(LayerError::EngineUnready));
    }

    #[test]
    fn unknown_identifier_is_not_found() {
        let mut state = ready(ConfigTree::new().with_layer("a", LayerNode::new()));
        let result = set_visibility(&mut state, "z", false, &mut Tracer::none());
        assert_eq!(
            result,
            Err(LayerError::NotFound {
                identifier: "z".to_string()
            })
        );
        assert!(scopes(&state).is_empty(), "failed toggles never rebuild");
    }

    #[test]
    fn failures_reach_the_sink() {
        #[derive(Default)]
        struct Outcomes(Vec<ToggleOutcome>);
        impl TraceSink for Outcomes {
            fn on_toggle(&mut self, e: &ToggleEvent<'_>) {
                self.0.push(e.outcome);
            }
        }

        let mut sink = Outcomes::default();
        let mut unready = EngineState::<RecordingEngine>::Unready;
        let mut state = ready(ConfigTree::new());
        {
            let mut tracer = Tracer::new(&mut sink);
            let _ = set_visibility(&mut unready, "a", true, &mut tracer);
            let _ = set_visibility(&mut state, "a", true, &mut tracer);
        }
        assert_eq!(
            sink.0,
            [ToggleOutcome::EngineUnready, ToggleOutcome::NotFound]
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            LayerError::EngineUnready.to_string(),
            "no engine scene available to update"
        );
        assert_eq!(
            LayerError::NotFound {
                identifier: "z".to_string()
            }
            .to_string(),
            "layer `z` not found"
        );
    }
}
