pub mod aggregate;
pub mod api;
pub mod authz;
pub mod catalogue;
pub mod client;
pub mod delivery;
pub mod dispatch;
pub mod events;
pub mod filters;
pub mod game_ids;
pub mod notifiers;

// Re-exports for convenience
pub use client::{ClientSignal, GameView, SessionState};
pub use dispatch::EventPipeline;
pub use events::{EventKind, NotificationEvent};
pub use filters::{FilterSet, FilterStore};
