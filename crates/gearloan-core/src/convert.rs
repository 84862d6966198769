// ── Store record → domain conversion ──
//
// The only door from wire records into the catalog. A record either
// becomes a well-formed `Item` or the whole fetch fails; nothing
// half-defined is ever installed.

use gearloan_api::RawItem;
use gearloan_api::models::RawScalar;
use tracing::debug;
use url::Url;

use crate::config::StatusLabels;
use crate::error::CoreError;
use crate::model::{Availability, Item, ItemId, ItemStatus, Loan};

fn text(field: Option<&RawScalar>) -> Option<String> {
    field.and_then(RawScalar::to_text)
}

/// Validate one raw record and convert it into an [`Item`].
pub fn item_from_raw(raw: &RawItem, labels: &StatusLabels) -> Result<Item, CoreError> {
    let id = text(raw.id.as_ref())
        .map(ItemId::from)
        .ok_or_else(|| CoreError::malformed("record without an id"))?;

    let name = text(raw.name.as_ref())
        .ok_or_else(|| CoreError::malformed(format!("record {id} has no name")))?;

    let raw_status = text(raw.status.as_ref()).unwrap_or_default();
    let status = labels.parse(&raw_status).ok_or_else(|| {
        CoreError::malformed(format!("record {id} has unknown status {raw_status:?}"))
    })?;

    let borrower = text(raw.borrower.as_ref());
    let borrowed_on = text(raw.borrow_date.as_ref());

    let availability = match status {
        ItemStatus::Ready => {
            if borrower.is_some() || borrowed_on.is_some() {
                debug!(item = %id, "dropping leftover loan fields on a ready record");
            }
            Availability::Ready
        }
        ItemStatus::Borrowed => {
            let borrower = borrower.ok_or_else(|| {
                CoreError::malformed(format!("borrowed record {id} has no borrower"))
            })?;
            let borrowed_on = borrowed_on.ok_or_else(|| {
                CoreError::malformed(format!("borrowed record {id} has no borrow date"))
            })?;
            Availability::Borrowed(Loan {
                borrower,
                borrowed_on,
            })
        }
    };

    let image = text(raw.image.as_ref()).and_then(|s| Url::parse(&s).ok());

    Ok(Item {
        id,
        name,
        kind: text(raw.kind.as_ref()).unwrap_or_default(),
        image,
        availability,
    })
}

/// Convert a full fetch. The first malformed record fails the batch.
pub fn items_from_raw(raw: &[RawItem], labels: &StatusLabels) -> Result<Vec<Item>, CoreError> {
    raw.iter().map(|r| item_from_raw(r, labels)).collect()
}
