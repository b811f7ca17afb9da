use chrono::Utc;
use serde_json::{Map, Value};

use super::kind::EventKind;

/// Wire field carrying the kind.
pub const FIELD_EVENT_TYPE: &str = "eventType";
/// Wire field carrying the emission time, epoch milliseconds.
pub const FIELD_EVENT_TIMESTAMP: &str = "eventTimestamp";

/// One normalized progress event.
///
/// The payload is a flat JSON object; `wire_body` layers the mandatory
/// `eventType` / `eventTimestamp` fields over it. Detectors never set those
/// two themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEvent {
    pub kind: EventKind,
    /// Epoch milliseconds at emission.
    pub timestamp_ms: i64,
    pub payload: Map<String, Value>,
}

impl NotificationEvent {
    /// Stamp a new event with the current wall clock.
    pub fn new(kind: EventKind, payload: Map<String, Value>) -> Self {
        Self { kind, timestamp_ms: Utc::now().timestamp_millis(), payload }
    }

    pub fn at(kind: EventKind, timestamp_ms: i64, payload: Map<String, Value>) -> Self {
        Self { kind, timestamp_ms, payload }
    }

    /// The JSON object POSTed to the collector.
    pub fn wire_body(&self) -> Value {
        let mut body = self.payload.clone();
        body.insert(FIELD_EVENT_TYPE.to_string(), Value::from(self.kind.wire_name()));
        body.insert(FIELD_EVENT_TIMESTAMP.to_string(), Value::from(self.timestamp_ms));
        Value::Object(body)
    }

    /// Rebuild an event from its wire form. Used by tests and tooling; the
    /// pipeline itself only ever goes the other way.
    pub fn from_wire(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let kind = EventKind::from_wire(obj.get(FIELD_EVENT_TYPE)?.as_str()?)?;
        let timestamp_ms = obj.get(FIELD_EVENT_TIMESTAMP)?.as_i64()?;
        let mut payload = obj.clone();
        payload.remove(FIELD_EVENT_TYPE);
        payload.remove(FIELD_EVENT_TIMESTAMP);
        Some(Self { kind, timestamp_ms, payload })
    }
}
