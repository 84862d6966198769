use std::sync::Arc;

use crate::catalog::StatusFilter;
use crate::command::ActionKind;
use crate::model::{Item, ItemId};

/// Which modal, if any, is in front of the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Dialog {
    #[default]
    Closed,
    /// Asking for the borrower's name.
    BorrowPrompt { item: Arc<Item> },
    /// Asking whether to return the item.
    ReturnConfirm { item: Arc<Item> },
    /// A write is in flight.
    Saving { item_id: ItemId, kind: ActionKind },
}

impl Dialog {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// The item a prompt or confirmation was opened for.
    pub fn selected(&self) -> Option<&Arc<Item>> {
        match self {
            Self::BorrowPrompt { item } | Self::ReturnConfirm { item } => Some(item),
            Self::Closed | Self::Saving { .. } => None,
        }
    }
}

/// UI state of one session. Separate from the catalog: changing the
/// search or filter never triggers a fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub search: String,
    pub status_filter: StatusFilter,
    pub dialog: Dialog,
}
