// ── Domain model ──
//
// Canonical representation of an equipment item. Records from the store
// pass through `convert` before they are allowed to become one of these.

pub mod item;
pub mod item_id;

pub use item::{Availability, Item, ItemStatus, Loan, PLACEHOLDER_IMAGE};
pub use item_id::ItemId;
