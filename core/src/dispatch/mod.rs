//! Session lifecycle and signal fan-out.
//!
//! The pipeline is the composition root of the crate: it owns the gate, the
//! filter store, the catalogues and every notifier, and is driven one
//! [`ClientSignal`](crate::client::ClientSignal) at a time by the host.
//!
//! ```text
//!                 StateChanged(LoggedIn)
//!                          │
//!                          ▼
//!   LoggedOut ──────► AwaitingSettle ──────► Active ──────► LoggedOut
//!                  arm gate,            settle elapsed    snapshot out,
//!                  refresh filters      + gate granted:   reset everything
//!                          │            build catalogues,
//!                          ▼            emit LOGIN
//!                       Denied
//!                 (gate budget spent;
//!                  dark until relog)
//! ```
//!
//! Detectors only see signals while the session is `Active`; nothing is
//! observed, enriched or delivered for an unauthorized session.

pub mod pipeline;


pub use pipeline::EventPipeline;
