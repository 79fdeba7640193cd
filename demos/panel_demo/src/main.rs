// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated panel session that exercises the diagnostics pipeline.
//!
//! Loads a scene and a panel configuration, reconciles a few checkbox sets
//! against a [`RecordingEngine`], and logs every event through a
//! [`PrettyPrintSink`] while a [`RecorderSink`] keeps a copy. The recording is
//! exported as JSON to the path given as the first argument, or
//! `panel_trace.json`.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;

use strata_core::panel::LayerPanel;
use strata_core::sync::CheckboxState;
use strata_core::trace::{EngineReadyEvent, RebuildEvent, ReconcileSummary, ToggleEvent, TraceSink};
use strata_debug::pretty::PrettyPrintSink;
use strata_debug::recorder::RecorderSink;
use strata_sync_harness::{RecordingEngine, check_convergence};

const SCENE: &str = r#"{
    "layers": {
        "water": { "draw": { "polygons": {} } },
        "earth": { "draw": { "polygons": {} } },
        "roads": {
            "data": { "source": "osm" },
            "highway": { "filter": { "kind": "highway" } },
            "minor": { "visible": false, "filter": { "kind": "minor_road" } }
        },
        "buildings": { "visible": true, "draw": { "polygons": {} } }
    }
}"#;

const PANEL: &str = r#"{
    "layers": {
        "Water": "water",
        "Highways": "highway",
        "Minor roads": "minor",
        "Buildings": "buildings",
        "Parks": "parks"
    },
    "options": { "collapsed": false }
}"#;

/// Forwards every event to two sinks.
struct Tee<A, B>(A, B);

impl<A: TraceSink, B: TraceSink> TraceSink for Tee<A, B> {
    fn on_engine_ready(&mut self, e: &EngineReadyEvent<'_>) {
        self.0.on_engine_ready(e);
        self.1.on_engine_ready(e);
    }

    fn on_toggle(&mut self, e: &ToggleEvent<'_>) {
        self.0.on_toggle(e);
        self.1.on_toggle(e);
    }

    fn on_rebuild(&mut self, e: &RebuildEvent<'_>) {
        self.0.on_rebuild(e);
        self.1.on_rebuild(e);
    }

    fn on_reconcile(&mut self, s: &ReconcileSummary) {
        self.0.on_reconcile(s);
        self.1.on_reconcile(s);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let out_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "panel_trace.json".to_owned());

    let config = strata_scene::load_panel_config(PANEL)?;
    let tree = strata_scene::load_layers(SCENE)?;

    let sink = Tee(
        PrettyPrintSink::new(Box::new(std::io::stdout())),
        RecorderSink::new(),
    );
    let mut panel = LayerPanel::with_sink(config.registry, config.options, sink);

    // Clicks before the engine is up are dropped.
    let mut ui = panel.registry().initial_ui_state();
    ui[1].checked = false;
    panel.on_checkbox_set_changed(&ui);

    panel.on_engine_ready(RecordingEngine::new(tree));

    // The same state again, now applied.
    panel.on_checkbox_set_changed(&ui);

    // Hide the water, show the minor roads.
    ui[0].checked = false;
    ui[2].checked = true;
    panel.on_checkbox_set_changed(&ui);

    if let Some(engine) = panel.engine() {
        let report = check_convergence(engine.tree(), &ui);
        println!(
            "{} rebuilds, {} of {} checkboxes diverge",
            engine.rebuild_count(),
            report.divergences.len(),
            report.compared,
        );
    }

    let Tee(_, recorder) = panel.into_sink();
    let file = File::create(&out_path)?;
    strata_debug::export::export(recorder.events(), &mut BufWriter::new(file))?;
    println!("wrote {out_path}");
    Ok(())
}
