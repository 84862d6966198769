use serde::{Deserialize, Serialize};

use crate::model::{Item, ItemStatus};

/// Status facet of the catalog view.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    #[strum(serialize = "all")]
    #[serde(rename = "all")]
    All,
    #[strum(serialize = "ready")]
    #[serde(rename = "ready")]
    ReadyOnly,
    #[strum(serialize = "borrowed")]
    #[serde(rename = "borrowed")]
    BorrowedOnly,
}

impl StatusFilter {
    pub fn admits(self, status: ItemStatus) -> bool {
        match self {
            Self::All => true,
            Self::ReadyOnly => status == ItemStatus::Ready,
            Self::BorrowedOnly => status == ItemStatus::Borrowed,
        }
    }
}

/// Case-insensitive substring match on the item name. A blank term
/// matches everything.
pub(crate) fn name_matches(item: &Item, needle: &str) -> bool {
    needle.is_empty() || item.name.to_lowercase().contains(needle)
}

/// Lower-case the search term once per view computation.
pub(crate) fn normalize_term(term: &str) -> String {
    term.to_lowercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Availability, Loan};
    use strum::IntoEnumIterator;

    fn item(name: &str) -> Item {
        Item::new("E1", name, "AV", Availability::Ready)
    }

    #[test]
    fn parses_cli_spellings() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("ready".parse::<StatusFilter>().unwrap(), StatusFilter::ReadyOnly);
        assert_eq!("borrowed".parse::<StatusFilter>().unwrap(), StatusFilter::BorrowedOnly);
        assert!("lost".parse::<StatusFilter>().is_err());
        assert_eq!(StatusFilter::BorrowedOnly.to_string(), "borrowed");
    }

    #[test]
    fn all_admits_every_status() {
        for status in [ItemStatus::Ready, ItemStatus::Borrowed] {
            assert!(StatusFilter::All.admits(status));
        }
        assert_eq!(StatusFilter::iter().count(), 3);
    }

    #[test]
    fn facets_are_exclusive() {
        assert!(StatusFilter::ReadyOnly.admits(ItemStatus::Ready));
        assert!(!StatusFilter::ReadyOnly.admits(ItemStatus::Borrowed));
        assert!(StatusFilter::BorrowedOnly.admits(ItemStatus::Borrowed));
        assert!(!StatusFilter::BorrowedOnly.admits(ItemStatus::Ready));
    }

    #[test]
    fn name_match_ignores_case() {
        let projector = item("Projector Epson");
        assert!(name_matches(&projector, &normalize_term("proj")));
        assert!(name_matches(&projector, &normalize_term("EPSON")));
        assert!(name_matches(&projector, ""));
        assert!(!name_matches(&projector, &normalize_term("tripod")));
    }

    #[test]
    fn name_match_ignores_other_fields() {
        let mut borrowed = item("Camera");
        borrowed.kind = "Projector".into();
        borrowed.availability = Availability::Borrowed(Loan {
            borrower: "Projector Fan".into(),
            borrowed_on: "2024-01-01".into(),
        });
        assert!(!name_matches(&borrowed, &normalize_term("projector")));
    }
}
