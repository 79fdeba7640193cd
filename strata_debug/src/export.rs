// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export of recorded events.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::RecordedEvent;

/// Writes `events` to `writer` as a pretty-printed JSON array.
///
/// Every element has a `seq` index, an `event` name, and an `args` object:
///
/// ```json
/// [
///   { "seq": 0, "event": "EngineReady", "args": { "layers": ["water"] } },
///   { "seq": 1, "event": "Toggle", "args": { "identifier": "water", "desired": false, "outcome": "changed" } }
/// ]
/// ```
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let values: Vec<Value> = events
        .iter()
        .enumerate()
        .map(|(seq, event)| to_value(seq, event))
        .collect();
    serde_json::to_writer_pretty(writer, &values)?;
    Ok(())
}

fn to_value(seq: usize, event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::EngineReady { available_layers } => json!({
            "seq": seq,
            "event": "EngineReady",
            "args": { "layers": available_layers },
        }),
        RecordedEvent::Toggle {
            identifier,
            desired,
            outcome,
        } => json!({
            "seq": seq,
            "event": "Toggle",
            "args": {
                "identifier": identifier,
                "desired": desired,
                "outcome": outcome.as_str(),
            }
        }),
        RecordedEvent::Rebuild { layers } => json!({
            "seq": seq,
            "event": "Rebuild",
            "args": {
                "layers": layers.iter().map(ToString::to_string).collect::<Vec<_>>(),
            }
        }),
        RecordedEvent::Reconcile(s) => json!({
            "seq": seq,
            "event": "Reconcile",
            "args": {
                "entries": s.entries,
                "changed": s.changed,
                "unchanged": s.unchanged,
                "not_found": s.not_found,
                "engine_unready": s.engine_unready,
                "duplicate_identifiers": s.duplicate_identifiers,
            }
        }),
    }
}
