// ── Item catalog ──
//
// Holds the most recent full snapshot fetched from the store. Snapshots
// are immutable; a refresh builds a new one and swaps it in whole, so
// readers never observe a half-merged catalog.

mod filter;

use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;
use tokio::sync::watch;

use crate::error::CoreError;
use crate::model::{Item, ItemId, ItemStatus};

pub use filter::StatusFilter;

/// Per-status item counts for a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub ready: usize,
    pub borrowed: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.ready + self.borrowed
    }
}

/// One immutable view of the store, in the order the store returned it.
#[derive(Debug, Default)]
pub struct Snapshot {
    items: IndexMap<ItemId, Arc<Item>>,
    fetched_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Build a snapshot from a fetch. Duplicate ids make the fetch malformed.
    pub fn from_items(items: Vec<Item>) -> Result<Self, CoreError> {
        let mut map = IndexMap::with_capacity(items.len());
        for item in items {
            match map.entry(item.id.clone()) {
                Entry::Occupied(e) => {
                    return Err(CoreError::malformed(format!(
                        "duplicate item id {}",
                        e.key()
                    )));
                }
                Entry::Vacant(e) => {
                    e.insert(Arc::new(item));
                }
            }
        }
        Ok(Self {
            items: map,
            fetched_at: Some(Utc::now()),
        })
    }

    pub fn get(&self, id: &ItemId) -> Option<&Arc<Item>> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// When this snapshot was fetched. `None` before the first load.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Item>> {
        self.items.values()
    }

    pub fn counts(&self) -> StatusCounts {
        self.iter()
            .fold(StatusCounts::default(), |mut acc, item| {
                match item.status() {
                    ItemStatus::Ready => acc.ready += 1,
                    ItemStatus::Borrowed => acc.borrowed += 1,
                }
                acc
            })
    }

    /// Items whose name contains `search` (case-insensitive) and whose
    /// status passes `status`. Store order is preserved.
    pub fn filter(&self, search: &str, status: StatusFilter) -> Vec<Arc<Item>> {
        let needle = filter::normalize_term(search);
        self.iter()
            .filter(|item| status.admits(item.status()) && filter::name_matches(item, &needle))
            .cloned()
            .collect()
    }
}

/// Atomically replaceable holder of the current [`Snapshot`].
pub struct Catalog {
    current: ArcSwap<Snapshot>,
    version: watch::Sender<u64>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        Self {
            current: ArcSwap::from_pointee(Snapshot::default()),
            version,
        }
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Replace the whole catalog. On error the previous snapshot stays.
    pub fn replace(&self, items: Vec<Item>) -> Result<Arc<Snapshot>, CoreError> {
        let next = Arc::new(Snapshot::from_items(items)?);
        self.current.store(Arc::clone(&next));
        self.version.send_modify(|v| *v += 1);
        Ok(next)
    }

    pub fn filter(&self, search: &str, status: StatusFilter) -> Vec<Arc<Item>> {
        self.snapshot().filter(search, status)
    }

    /// Bumped once per installed snapshot.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }
}
