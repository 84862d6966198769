// ── Interaction controller ──
//
// Drives the borrow and return flows: open a dialog, collect input,
// show a saving indicator, call the lending machine, report the result.
// Session changes go through `dispatch` and nowhere else.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::Snapshot;
use crate::command::{ActionKind, LendingCommand, TransitionOutcome};
use crate::error::CoreError;
use crate::lending::Lending;
use crate::model::{Item, ItemId};

use super::intent::Intent;
use super::reducer::{reduce, selection_error};
use super::state::{Dialog, Session};
use super::surface::{Confirmation, Notice, NotificationSurface, Prompt};

pub const LOADING: &str = "Loading...";
pub const SAVING: &str = "Saving...";

/// How a flow ended.
#[derive(Debug)]
pub enum FlowOutcome {
    /// The write went out and the catalog was refreshed. Check
    /// [`TransitionOutcome::is_confirmed`] for whether the store applied it.
    Completed(TransitionOutcome),
    /// The user backed out. Nothing was sent.
    Cancelled,
    /// A local guard refused the input. Nothing was sent.
    Rejected(CoreError),
    /// The write or the refresh after it failed.
    Failed(CoreError),
    /// The item could not be selected for this action.
    Unavailable(CoreError),
}

impl FlowOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn error(&self) -> Option<&CoreError> {
        match self {
            Self::Rejected(e) | Self::Failed(e) | Self::Unavailable(e) => Some(e),
            Self::Completed(_) | Self::Cancelled => None,
        }
    }
}

/// One user's session over a lending catalog.
pub struct Interaction<S> {
    lending: Lending,
    session: Session,
    surface: S,
}

impl<S: NotificationSurface> Interaction<S> {
    pub fn new(lending: Lending, surface: S) -> Self {
        Self {
            lending,
            session: Session::default(),
            surface,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn lending(&self) -> &Lending {
        &self.lending
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The single entry point for session updates.
    pub fn dispatch(&mut self, intent: Intent) -> &Session {
        let snapshot = self.lending.catalog().snapshot();
        let current = std::mem::take(&mut self.session);
        self.session = reduce(current, intent, &snapshot);
        &self.session
    }

    /// Items matching the current search and status filter.
    pub fn visible_items(&self) -> Vec<Arc<Item>> {
        self.lending
            .catalog()
            .filter(&self.session.search, self.session.status_filter)
    }

    /// Initial load. On failure the user is told and the catalog stays empty.
    pub async fn start(&mut self) -> Result<Arc<Snapshot>, CoreError> {
        self.load().await
    }

    /// User-requested re-fetch. On failure the previous snapshot stays.
    pub async fn reload(&mut self) -> Result<Arc<Snapshot>, CoreError> {
        self.load().await
    }

    async fn load(&mut self) -> Result<Arc<Snapshot>, CoreError> {
        self.surface.show_progress(LOADING);
        let result = self.lending.refresh().await;
        self.surface.dismiss_progress();

        if let Err(e) = &result {
            warn!(error = %e, "catalog load failed");
            self.surface
                .notify(&Notice::error("Error", format!("Could not load equipment: {e}")));
        }
        result
    }

    // ── Flows ────────────────────────────────────────────────────────

    pub async fn borrow_flow(&mut self, id: &ItemId) -> FlowOutcome {
        let item = match self.select(id, ActionKind::Borrow) {
            Ok(item) => item,
            Err(e) => return FlowOutcome::Unavailable(e),
        };

        let prompt = Prompt {
            title: format!("Borrow \"{}\"", item.name),
            label: "Borrower name".into(),
            placeholder: "Enter your name...".into(),
        };
        // A blank name keeps the prompt open; only an explicit cancel closes it.
        let command = loop {
            let Some(borrower) = self.surface.prompt_text(&prompt) else {
                self.dispatch(Intent::Cancel);
                return FlowOutcome::Cancelled;
            };
            let command = LendingCommand::Borrow {
                id: item.id.clone(),
                borrower,
            };
            match command.check_input() {
                Ok(()) => break command,
                Err(e) => {
                    debug!(item = %item.id, error = %e, "borrower name refused");
                    self.surface
                        .notify(&Notice::warning("Warning", "Please enter the borrower's name"));
                }
            }
        };

        self.save(command, "Item borrowed").await
    }

    pub async fn return_flow(&mut self, id: &ItemId) -> FlowOutcome {
        let item = match self.select(id, ActionKind::Return) {
            Ok(item) => item,
            Err(e) => return FlowOutcome::Unavailable(e),
        };

        let confirmation = Confirmation {
            title: "Confirm return?".into(),
            message: format!("Return \"{}\"?", item.name),
            confirm_label: "Yes, return it".into(),
            cancel_label: "Cancel".into(),
        };
        if !self.surface.confirm(&confirmation) {
            self.dispatch(Intent::Cancel);
            return FlowOutcome::Cancelled;
        }

        let command = LendingCommand::Return {
            id: item.id.clone(),
            confirmed: true,
        };
        self.save(command, "Item returned").await
    }

    /// Open the dialog for `action`, or explain why it cannot open.
    fn select(&mut self, id: &ItemId, action: ActionKind) -> Result<Arc<Item>, CoreError> {
        let before = self.session.dialog.clone();
        let intent = match action {
            ActionKind::Borrow => Intent::SelectBorrow(id.clone()),
            ActionKind::Return => Intent::SelectReturn(id.clone()),
        };

        let opened = match &self.dispatch(intent).dialog {
            Dialog::BorrowPrompt { item } | Dialog::ReturnConfirm { item }
                if before == Dialog::Closed =>
            {
                Some(Arc::clone(item))
            }
            _ => None,
        };

        opened.ok_or_else(|| {
            let err = selection_error(&before, id, action, &self.lending.catalog().snapshot());
            debug!(item = %id, %action, error = %err, "selection refused");
            self.surface.notify(&Notice::error("Unavailable", err.to_string()));
            err
        })
    }

    async fn save(&mut self, command: LendingCommand, done: &str) -> FlowOutcome {
        self.dispatch(Intent::BeginSaving);
        self.surface.show_progress(SAVING);
        let result = self.lending.execute(command).await;
        self.surface.dismiss_progress();
        self.dispatch(Intent::Finish);

        match result {
            Ok(outcome) if outcome.is_confirmed() => {
                self.surface.notify(&Notice::success("Success", done));
                FlowOutcome::Completed(outcome)
            }
            Ok(outcome) => {
                let found = outcome
                    .observed
                    .map_or_else(|| "no such item".to_owned(), |s| s.to_string());
                self.surface.notify(&Notice::warning(
                    "Not confirmed",
                    format!(
                        "The store did not record the {} (item {} is now {found})",
                        outcome.action, outcome.item_id
                    ),
                ));
                FlowOutcome::Completed(outcome)
            }
            Err(e) => {
                self.surface.notify(&Notice::error("Error", e.to_string()));
                if e.is_local() {
                    FlowOutcome::Rejected(e)
                } else {
                    FlowOutcome::Failed(e)
                }
            }
        }
    }
}
