//! Normalized progress events and their wire shape.

mod kind;
mod payload;

pub use kind::EventKind;
pub use payload::{FIELD_EVENT_TIMESTAMP, FIELD_EVENT_TYPE, NotificationEvent};
