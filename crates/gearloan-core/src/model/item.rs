// ── Item domain types ──

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::item_id::ItemId;

/// Shown in place of an item image that is missing or unreachable.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x300?text=No+Image";

/// Lending status as seen by the client.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemStatus {
    Ready,
    Borrowed,
}

/// Who holds a borrowed item and since when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub borrower: String,
    /// Timestamp as written by the store. Kept verbatim; the store's clock
    /// is authoritative and its format is not under our control.
    pub borrowed_on: String,
}

impl Loan {
    /// Best-effort parse of `borrowed_on` (RFC 3339 or a bare `YYYY-MM-DD`).
    pub fn borrowed_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.borrowed_on.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

/// Availability of an item. A loan exists exactly when the item is borrowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Availability {
    Ready,
    Borrowed(Loan),
}

/// One piece of lendable equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Free-form category (`type` on the wire).
    pub kind: String,
    pub image: Option<Url>,
    #[serde(flatten)]
    pub availability: Availability,
}

impl Item {
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        kind: impl Into<String>,
        availability: Availability,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            image: None,
            availability,
        }
    }

    pub fn status(&self) -> ItemStatus {
        match self.availability {
            Availability::Ready => ItemStatus::Ready,
            Availability::Borrowed(_) => ItemStatus::Borrowed,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.availability, Availability::Ready)
    }

    pub fn loan(&self) -> Option<&Loan> {
        match &self.availability {
            Availability::Borrowed(loan) => Some(loan),
            Availability::Ready => None,
        }
    }

    pub fn borrower(&self) -> Option<&str> {
        self.loan().map(|l| l.borrower.as_str())
    }

    pub fn image_or_placeholder(&self) -> &str {
        self.image.as_ref().map_or(PLACEHOLDER_IMAGE, Url::as_str)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    fn borrowed(date: &str) -> Item {
        Item::new(
            "E1",
            "Projector",
            "AV",
            Availability::Borrowed(Loan {
                borrower: "Alice".into(),
                borrowed_on: date.into(),
            }),
        )
    }

    #[test]
    fn status_follows_availability() {
        let ready = Item::new("E1", "Projector", "AV", Availability::Ready);
        assert_eq!(ready.status(), ItemStatus::Ready);
        assert_eq!(borrowed("2024-01-01").status(), ItemStatus::Borrowed);
        assert_eq!(borrowed("2024-01-01").borrower(), Some("Alice"));
    }

    #[test]
    fn ready_item_has_no_loan() {
        let item = Item::new("E1", "Projector", "AV", Availability::Ready);
        assert!(item.loan().is_none());
        assert!(item.borrower().is_none());
    }

    #[test]
    fn placeholder_when_image_missing() {
        let mut item = Item::new("E1", "Projector", "AV", Availability::Ready);
        assert_eq!(item.image_or_placeholder(), PLACEHOLDER_IMAGE);

        item.image = Some(Url::parse("https://img.example/p.png").unwrap());
        assert_eq!(item.image_or_placeholder(), "https://img.example/p.png");
    }

    #[test]
    fn borrowed_at_parses_common_formats() {
        let day = borrowed("2024-01-01").loan().unwrap().borrowed_at().unwrap();
        assert_eq!((day.year(), day.month(), day.day()), (2024, 1, 1));

        let ts = borrowed("2024-03-05T08:30:00.000Z")
            .loan()
            .unwrap()
            .borrowed_at()
            .unwrap();
        assert_eq!(ts.month(), 3);

        assert!(borrowed("5/3/2024 8:30").loan().unwrap().borrowed_at().is_none());
    }

    #[test]
    fn serializes_flat_with_status_tag() {
        let value = serde_json::to_value(borrowed("2024-01-01")).unwrap();
        assert_eq!(value["status"], json!("borrowed"));
        assert_eq!(value["borrower"], json!("Alice"));
        assert_eq!(value["borrowed_on"], json!("2024-01-01"));

        let tripod = Item::new("E2", "Tripod", "Photo", Availability::Ready);
        let ready = serde_json::to_value(tripod).unwrap();
        assert_eq!(ready["status"], json!("ready"));
        assert!(ready.get("borrower").is_none());
    }
}
