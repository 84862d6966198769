// Record store wire types
//
// The store is a spreadsheet-backed script, so field presence and JSON
// types drift with whoever last edited the sheet. Every field is optional
// here and scalar values are accepted as text or numbers; the semantic
// schema check happens in gearloan-core before anything reaches the catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Scalars ──────────────────────────────────────────────────────────

/// A cell value as the store serializes it.
///
/// Sheet cells holding digits come back as JSON numbers, so an id of
/// `1001` and `"1001"` must decode to the same thing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawScalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl RawScalar {
    /// The scalar rendered as trimmed text, or `None` when blank.
    pub fn to_text(&self) -> Option<String> {
        let text = self.to_string();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    }
}

impl fmt::Display for RawScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

// ── Item ─────────────────────────────────────────────────────────────

/// One equipment record from `GET <endpoint>`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawItem {
    #[serde(default)]
    pub id: Option<RawScalar>,
    #[serde(default)]
    pub name: Option<RawScalar>,
    #[serde(default, rename = "type")]
    pub kind: Option<RawScalar>,
    #[serde(default)]
    pub image: Option<RawScalar>,
    #[serde(default)]
    pub status: Option<RawScalar>,
    #[serde(default)]
    pub borrower: Option<RawScalar>,
    #[serde(default, rename = "borrowDate")]
    pub borrow_date: Option<RawScalar>,
    /// Catch-all for extra sheet columns.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Actions ──────────────────────────────────────────────────────────

/// A state-change request sent with `POST <endpoint>`.
///
/// ```json
/// { "action": "borrow", "equipmentId": "E1", "borrowerName": "Alice" }
/// { "action": "return", "equipmentId": "E1" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    Borrow {
        #[serde(rename = "equipmentId")]
        equipment_id: String,
        #[serde(rename = "borrowerName")]
        borrower_name: String,
    },
    Return {
        #[serde(rename = "equipmentId")]
        equipment_id: String,
    },
}

impl Action {
    pub fn equipment_id(&self) -> &str {
        match self {
            Self::Borrow { equipment_id, .. } | Self::Return { equipment_id } => equipment_id,
        }
    }

    /// Short verb used in logs.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Borrow { .. } => "borrow",
            Self::Return { .. } => "return",
        }
    }
}

/// Transport-level acknowledgement of a write.
///
/// Says only that the store answered with a success status. Whether the
/// action was applied is unknown until the next full read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    pub status: u16,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn borrow_action_wire_shape() {
        let action = Action::Borrow {
            equipment_id: "E1".into(),
            borrower_name: "Alice".into(),
        };
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({ "action": "borrow", "equipmentId": "E1", "borrowerName": "Alice" })
        );
    }

    #[test]
    fn return_action_wire_shape() {
        let action = Action::Return {
            equipment_id: "E1".into(),
        };
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({ "action": "return", "equipmentId": "E1" })
        );
    }

    #[test]
    fn numeric_id_decodes_as_text() {
        let raw: RawItem = serde_json::from_value(json!({ "id": 1001, "name": "Tripod" })).unwrap();
        assert_eq!(raw.id.unwrap().to_text().as_deref(), Some("1001"));
    }

    #[test]
    fn blank_scalar_is_none() {
        assert_eq!(RawScalar::Text("   ".into()).to_text(), None);
    }

    #[test]
    fn unknown_columns_land_in_extra() {
        let raw: RawItem =
            serde_json::from_value(json!({ "id": "E1", "location": "Room 2" })).unwrap();
        assert_eq!(raw.extra.get("location"), Some(&json!("Room 2")));
    }
}
