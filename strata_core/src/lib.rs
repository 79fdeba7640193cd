// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer-state synchronization for map overlay toggle panels.
//!
//! `strata_core` keeps a checklist of named map layers in step with the
//! visibility state of a layer tree owned by an external rendering engine. It
//! is `no_std` compatible (with `alloc`) and never draws, prints, or blocks.
//!
//! # Architecture
//!
//! ```text
//!   Presentation (checkboxes)
//!       │ full checkbox set
//!       ▼
//!   LayerPanel::on_checkbox_set_changed() ──► sync::reconcile()
//!                                                 │ per entry
//!                 ┌───────────────────────────────┘
//!                 ▼
//!   visibility::set_visibility() ──► resolve::resolve() ──► ConfigTree
//!                 │ only if changed
//!                 ▼
//!   SceneEngine::rebuild(RebuildScope::single(path))
//! ```
//!
//! **[`registry`]** - The ordered `(name, identifier)` list the panel renders.
//!
//! **[`tree`]** - The engine's layer configuration: top-level layers, each
//! with optional sub-layers, and the optional `visible` attribute whose
//! absence means visible.
//!
//! **[`resolve`]** - Pure identifier lookup: top level first, then one level
//! of sub-layers, never deeper.
//!
//! **[`engine`]** - The [`SceneEngine`](engine::SceneEngine) trait the
//! rendering engine implements, and the `Unready`/`Ready` lifecycle.
//!
//! **[`visibility`]** - Single-layer toggle with the unchanged fast path and
//! the scoped rebuild request.
//!
//! **[`sync`]** - Reconciliation of a full checkbox set, isolating per-entry
//! failures.
//!
//! **[`panel`]** - [`LayerPanel`](panel::LayerPanel), the facade the host
//! wires to engine and presentation events.
//!
//! **[`options`]** - Presentation options passed through untouched.
//!
//! **[`trace`]** - [`TraceSink`](trace::TraceSink) trait and event types for
//! diagnostics, with the [`Tracer`](trace::Tracer) wrapper.
//!
//! # Threading
//!
//! Every operation runs to completion on the caller's thread. Nothing here is
//! internally synchronized; hosts with several threads must serialize calls
//! into a panel.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod engine;
pub mod options;
pub mod panel;
pub mod registry;
pub mod resolve;
pub mod sync;
pub mod trace;
pub mod tree;
pub mod visibility;

pub use visibility::LayerError;
