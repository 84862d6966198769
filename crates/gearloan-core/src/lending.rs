// ── Lending state machine ──
//
// Owns the store client and the catalog. Writes are fire-and-forget:
// submit, then re-read everything. The catalog only ever changes through
// `refresh`, so a failed write leaves nothing to roll back.

use std::sync::Arc;

use gearloan_api::StoreClient;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Snapshot};
use crate::command::{LendingCommand, TransitionOutcome};
use crate::config::{StatusLabels, StoreConfig};
use crate::convert::items_from_raw;
use crate::error::CoreError;
use crate::model::ItemId;

/// Borrow/return engine for one record store.
///
/// Cheaply cloneable; clones share the same catalog. There is no lock
/// around writes: two clients borrowing the same item at once both get
/// their request sent, and the store keeps whichever lands last.
#[derive(Clone)]
pub struct Lending {
    client: StoreClient,
    catalog: Arc<Catalog>,
    labels: StatusLabels,
}

impl Lending {
    pub fn new(config: &StoreConfig) -> Result<Self, CoreError> {
        let client = StoreClient::new(config.endpoint.clone(), &config.transport())?;
        Ok(Self::with_client(client, config.labels.clone()))
    }

    pub fn with_client(client: StoreClient, labels: StatusLabels) -> Self {
        Self {
            client,
            catalog: Arc::new(Catalog::new()),
            labels,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn labels(&self) -> &StatusLabels {
        &self.labels
    }

    /// Fetch every record and install a new snapshot. On failure the
    /// previous snapshot stays in place.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, CoreError> {
        let raw = self.client.fetch_all().await?;
        let items = items_from_raw(&raw, &self.labels)?;
        let snapshot = self.catalog.replace(items)?;

        let counts = snapshot.counts();
        debug!(
            items = snapshot.len(),
            ready = counts.ready,
            borrowed = counts.borrowed,
            "catalog refreshed"
        );
        Ok(snapshot)
    }

    /// The name is trimmed before it is sent, so the stored borrower may
    /// differ from `borrower` by surrounding whitespace.
    pub async fn borrow(
        &self,
        id: &ItemId,
        borrower: &str,
    ) -> Result<TransitionOutcome, CoreError> {
        self.execute(LendingCommand::Borrow {
            id: id.clone(),
            borrower: borrower.to_owned(),
        })
        .await
    }

    /// `confirmed` is the user's answer to "return this item?".
    pub async fn return_item(
        &self,
        id: &ItemId,
        confirmed: bool,
    ) -> Result<TransitionOutcome, CoreError> {
        self.execute(LendingCommand::Return {
            id: id.clone(),
            confirmed,
        })
        .await
    }

    /// Check guards, submit once, then refresh and report what the store
    /// now says about the item.
    pub async fn execute(&self, command: LendingCommand) -> Result<TransitionOutcome, CoreError> {
        let item = command.check(&self.catalog.snapshot())?;
        let action = command.to_action();

        debug!(item = %item.id, action = action.verb(), "submitting");
        self.client.submit_action(&action).await?;

        let snapshot = self.refresh().await?;
        let outcome = TransitionOutcome::observe(&command, &snapshot);

        if outcome.is_confirmed() {
            info!(item = %outcome.item_id, action = %outcome.action, "transition confirmed");
        } else {
            warn!(
                item = %outcome.item_id,
                action = %outcome.action,
                expected = %outcome.expected,
                observed = ?outcome.observed,
                "store did not reflect the requested transition"
            );
        }
        Ok(outcome)
    }
}
