//! Session transitions.

use crate::catalog::Snapshot;
use crate::command::ActionKind;
use crate::error::CoreError;
use crate::model::{ItemId, ItemStatus};

use super::intent::Intent;
use super::state::{Dialog, Session};

pub(crate) const DIALOG_BUSY: &str = "another action is in progress";

/// Apply one intent. Pure: intents that do not apply in the current state
/// leave the session unchanged.
pub fn reduce(session: Session, intent: Intent, snapshot: &Snapshot) -> Session {
    let Session {
        search,
        status_filter,
        dialog,
    } = session;

    match intent {
        Intent::SetSearch(search) => Session {
            search,
            status_filter,
            dialog,
        },

        Intent::SetStatusFilter(status_filter) => Session {
            search,
            status_filter,
            dialog,
        },

        Intent::SelectBorrow(id) => {
            let dialog = match (&dialog, snapshot.get(&id)) {
                (Dialog::Closed, Some(item)) if item.status() == ItemStatus::Ready => {
                    Dialog::BorrowPrompt { item: item.clone() }
                }
                _ => dialog,
            };
            Session {
                search,
                status_filter,
                dialog,
            }
        }

        Intent::SelectReturn(id) => {
            let dialog = match (&dialog, snapshot.get(&id)) {
                (Dialog::Closed, Some(item)) if item.status() == ItemStatus::Borrowed => {
                    Dialog::ReturnConfirm { item: item.clone() }
                }
                _ => dialog,
            };
            Session {
                search,
                status_filter,
                dialog,
            }
        }

        Intent::Cancel => {
            let dialog = match dialog {
                Dialog::BorrowPrompt { .. } | Dialog::ReturnConfirm { .. } => Dialog::Closed,
                other => other,
            };
            Session {
                search,
                status_filter,
                dialog,
            }
        }

        Intent::BeginSaving => {
            let dialog = match dialog {
                Dialog::BorrowPrompt { item } => Dialog::Saving {
                    item_id: item.id.clone(),
                    kind: ActionKind::Borrow,
                },
                Dialog::ReturnConfirm { item } => Dialog::Saving {
                    item_id: item.id.clone(),
                    kind: ActionKind::Return,
                },
                other => other,
            };
            Session {
                search,
                status_filter,
                dialog,
            }
        }

        Intent::Finish => {
            let dialog = match dialog {
                Dialog::Saving { .. } => Dialog::Closed,
                other => other,
            };
            Session {
                search,
                status_filter,
                dialog,
            }
        }
    }
}

/// Why a selection did not open its dialog.
pub(crate) fn selection_error(
    dialog: &Dialog,
    id: &ItemId,
    action: ActionKind,
    snapshot: &Snapshot,
) -> CoreError {
    if dialog.is_open() {
        return CoreError::validation(DIALOG_BUSY);
    }
    match snapshot.get(id) {
        None => CoreError::NotFound {
            item_id: id.clone(),
        },
        Some(item) => CoreError::InvalidTransition {
            item_id: id.clone(),
            status: item.status(),
            action,
        },
    }
}
