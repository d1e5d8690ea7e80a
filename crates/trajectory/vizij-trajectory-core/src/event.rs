//! Event markers: named points in time along a trajectory.
//!
//! Only extraction lives here. What a marker triggers is up to the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::coercion::{field_f64, to_f64};

/// The only command kind whose markers are kept.
const NAMED_COMMAND: &str = "named";

/// A named point in time within a trajectory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventMarker {
    /// Seconds from the start of the trajectory.
    pub timestamp: f64,
    /// Event label.
    pub event: String,
}

impl EventMarker {
    pub fn new(timestamp: f64, event: impl Into<String>) -> Self {
        Self {
            timestamp,
            event: event.into(),
        }
    }

    /// Copy of this marker shifted by `offset` seconds. No clamping is applied.
    pub fn offset_by(&self, offset: f64) -> Self {
        Self {
            timestamp: self.timestamp + offset,
            event: self.event.clone(),
        }
    }
}

/// Resolve one raw marker record into an absolute-time `EventMarker`.
///
/// Accepted shapes:
/// - offset form: `{"name": .., "from": {"targetTimestamp": .., "offset": {"val": ..}}, "event": ..}`
/// - simple form: `{"timestamp": .., "event": "<label>"}`
///
/// Returns `None` for markers that cannot be used: negative or non-finite
/// time, empty label, a command other than `named`, or missing numbers.
/// Generators legitimately emit such markers, so this is never an error.
pub fn resolve_event_marker(raw: &JsonValue) -> Option<EventMarker> {
    let obj = raw.as_object()?;
    let marker = if obj.contains_key("from") {
        resolve_offset_form(obj)?
    } else {
        resolve_simple_form(obj)?
    };
    if !marker.timestamp.is_finite() || marker.timestamp < 0.0 || marker.event.is_empty() {
        return None;
    }
    Some(marker)
}

fn resolve_offset_form(obj: &Map<String, JsonValue>) -> Option<EventMarker> {
    let from = obj.get("from")?.as_object()?;
    let target = field_f64(from, "targetTimestamp")?;
    let offset = from
        .get("offset")
        .and_then(|o| o.as_object())
        .and_then(|o| field_f64(o, "val"))?;
    let name = obj.get("name")?.as_str()?;
    if !is_named_command(obj.get("event")) {
        return None;
    }
    Some(EventMarker::new(target + offset, name))
}

fn resolve_simple_form(obj: &Map<String, JsonValue>) -> Option<EventMarker> {
    let timestamp = obj.get("timestamp").and_then(to_f64)?;
    let event = obj.get("event")?.as_str()?;
    Some(EventMarker::new(timestamp, event))
}

/// An absent or null command is a plain marker; otherwise it must be `named`.
fn is_named_command(command: Option<&JsonValue>) -> bool {
    match command {
        None | Some(JsonValue::Null) => true,
        Some(JsonValue::Object(cmd)) => cmd
            .get("type")
            .and_then(|t| t.as_str())
            .map(|t| t.eq_ignore_ascii_case(NAMED_COMMAND))
            .unwrap_or(false),
        Some(_) => false,
    }
}
