//! The host-client boundary.
//!
//! The host pushes [`ClientSignal`] values at the pipeline and answers polled
//! reads through [`GameView`]. Nothing else crosses the boundary in either
//! direction.

mod signal;
mod stub;
mod view;

pub use signal::{
    ChatKind, ClientSignal, ItemStack, LootSourceKind, SessionState, TargetRef,
};
pub use stub::{StubItem, StubView};
pub use view::{
    ClanMembership, GameView, PlayerIdentity, QuestEntry, QuestState, SkillLevel,
};
