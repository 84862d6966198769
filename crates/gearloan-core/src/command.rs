// ── Lending commands ──
//
// Every write the client can request goes through `LendingCommand`.
// Local guards live here so the interaction layer can check input before
// it shows a saving indicator, and the lending machine can re-check
// against the snapshot right before submitting.

use std::sync::Arc;

use gearloan_api::Action;
use serde::Serialize;

use crate::catalog::Snapshot;
use crate::error::CoreError;
use crate::model::{Item, ItemId, ItemStatus};

pub(crate) const EMPTY_BORROWER: &str = "please enter the borrower's name";
pub(crate) const RETURN_NOT_CONFIRMED: &str = "return was not confirmed";

/// The two transitions a client may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Borrow,
    Return,
}

impl ActionKind {
    /// Status an item must be in before this action.
    pub fn required_status(self) -> ItemStatus {
        match self {
            Self::Borrow => ItemStatus::Ready,
            Self::Return => ItemStatus::Borrowed,
        }
    }

    /// Status the store should report once the action is applied.
    pub fn target_status(self) -> ItemStatus {
        match self {
            Self::Borrow => ItemStatus::Borrowed,
            Self::Return => ItemStatus::Ready,
        }
    }
}

/// A write request against one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LendingCommand {
    Borrow { id: ItemId, borrower: String },
    /// `confirmed` records the user's answer to the yes/no prompt.
    Return { id: ItemId, confirmed: bool },
}

impl LendingCommand {
    pub fn item_id(&self) -> &ItemId {
        match self {
            Self::Borrow { id, .. } | Self::Return { id, .. } => id,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Borrow { .. } => ActionKind::Borrow,
            Self::Return { .. } => ActionKind::Return,
        }
    }

    /// Checks that need no catalog: a non-blank borrower, a confirmed return.
    pub fn check_input(&self) -> Result<(), CoreError> {
        match self {
            Self::Borrow { borrower, .. } if borrower.trim().is_empty() => {
                Err(CoreError::validation(EMPTY_BORROWER))
            }
            Self::Return {
                confirmed: false, ..
            } => Err(CoreError::validation(RETURN_NOT_CONFIRMED)),
            _ => Ok(()),
        }
    }

    /// Run every local guard against `snapshot` and return the target item.
    ///
    /// Borrow checks the name before the item; return checks the item
    /// before the confirmation. Nothing here touches the network.
    pub fn check(&self, snapshot: &Snapshot) -> Result<Arc<Item>, CoreError> {
        if matches!(self, Self::Borrow { .. }) {
            self.check_input()?;
        }
        let item = snapshot
            .get(self.item_id())
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                item_id: self.item_id().clone(),
            })?;
        let action = self.kind();
        if item.status() != action.required_status() {
            return Err(CoreError::InvalidTransition {
                item_id: item.id.clone(),
                status: item.status(),
                action,
            });
        }
        self.check_input()?;
        Ok(item)
    }

    /// Wire form, with the borrower name trimmed.
    pub(crate) fn to_action(&self) -> Action {
        match self {
            Self::Borrow { id, borrower } => Action::Borrow {
                equipment_id: id.to_string(),
                borrower_name: borrower.trim().to_owned(),
            },
            Self::Return { id, .. } => Action::Return {
                equipment_id: id.to_string(),
            },
        }
    }
}

/// What the refresh after a write showed about the target item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionOutcome {
    pub item_id: ItemId,
    pub action: ActionKind,
    pub expected: ItemStatus,
    /// Status in the refreshed snapshot; `None` if the item vanished.
    pub observed: Option<ItemStatus>,
    /// Borrower in the refreshed snapshot, if borrowed.
    pub borrower: Option<String>,
    confirmed: bool,
}

impl TransitionOutcome {
    /// Compare the refreshed snapshot with what `command` asked for. A
    /// borrow only counts when the recorded borrower is the one we sent.
    pub(crate) fn observe(command: &LendingCommand, snapshot: &Snapshot) -> Self {
        let action = command.kind();
        let expected = action.target_status();
        let item = snapshot.get(command.item_id());
        let observed = item.map(|i| i.status());
        let borrower = item.and_then(|i| i.borrower()).map(str::to_owned);

        let confirmed = observed == Some(expected)
            && match command {
                LendingCommand::Borrow { borrower: sent, .. } => {
                    borrower.as_deref() == Some(sent.trim())
                }
                LendingCommand::Return { .. } => true,
            };

        Self {
            item_id: command.item_id().clone(),
            action,
            expected,
            observed,
            borrower,
            confirmed,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Treat an unconfirmed transition as an error.
    pub fn into_rejection(self) -> Result<Self, CoreError> {
        if self.confirmed {
            Ok(self)
        } else {
            Err(CoreError::BackendRejection {
                item_id: self.item_id,
                action: self.action,
                expected: self.expected,
                observed: self.observed,
            })
        }
    }
}
