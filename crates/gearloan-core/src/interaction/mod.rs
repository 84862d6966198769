// ── Interaction layer ──
//
// Session state, the intents that change it, the pure reducer between
// them, and the controller that runs borrow/return flows against a
// notification surface.

mod controller;
mod intent;
mod reducer;
mod state;
mod surface;

pub use controller::{FlowOutcome, Interaction, LOADING, SAVING};
pub use intent::Intent;
pub use reducer::reduce;
pub use state::{Dialog, Session};
pub use surface::{Confirmation, Notice, NoticeLevel, NotificationSurface, Prompt};
