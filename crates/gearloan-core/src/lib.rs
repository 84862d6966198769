// gearloan-core: Catalog, lending state machine, and interaction flows
// between gearloan-api and consumers (CLI).

pub mod catalog;
pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod interaction;
pub mod lending;
pub mod model;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::{Catalog, Snapshot, StatusCounts, StatusFilter};
pub use command::{ActionKind, LendingCommand, TransitionOutcome};
pub use config::{StatusLabels, StoreConfig, TlsVerification};
pub use error::CoreError;
pub use interaction::{
    Confirmation, Dialog, FlowOutcome, Intent, Interaction, Notice, NoticeLevel,
    NotificationSurface, Prompt, Session,
};
pub use lending::Lending;
pub use model::{Availability, Item, ItemId, ItemStatus, Loan, PLACEHOLDER_IMAGE};
