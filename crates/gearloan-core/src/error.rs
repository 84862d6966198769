// ── Core error types ──
//
// User-facing errors from gearloan-core. Consumers never see HTTP status
// codes or JSON parse failures directly: every `gearloan_api::Error`
// collapses into `Transport`, which is what the UI reports.

use thiserror::Error;

use crate::command::ActionKind;
use crate::model::{ItemId, ItemStatus};

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Local checks (never reach the network) ───────────────────────
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Item not found: {item_id}")]
    NotFound { item_id: ItemId },

    #[error("Cannot {action} item {item_id}: it is currently {status}")]
    InvalidTransition {
        item_id: ItemId,
        status: ItemStatus,
        action: ActionKind,
    },

    // ── Store errors ─────────────────────────────────────────────────
    #[error("Record store error: {message}")]
    Transport {
        message: String,
        /// HTTP status code, if the store answered at all.
        status: Option<u16>,
    },

    #[error(
        "Record store did not apply {action} on {item_id}: expected {expected}, found {}",
        describe_observed(.observed.as_ref())
    )]
    BackendRejection {
        item_id: ItemId,
        action: ActionKind,
        expected: ItemStatus,
        observed: Option<ItemStatus>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

fn describe_observed(observed: Option<&ItemStatus>) -> String {
    observed.map_or_else(|| "no such item".into(), ToString::to_string)
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Transport {
            message: format!("malformed response: {}", message.into()),
            status: None,
        }
    }

    /// Detected locally, before any request was made.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::NotFound { .. } | Self::InvalidTransition { .. }
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<gearloan_api::Error> for CoreError {
    fn from(err: gearloan_api::Error) -> Self {
        let status = err.status();
        let message = match err {
            gearloan_api::Error::Transport(ref e) if e.is_timeout() => {
                "request to the record store timed out".to_owned()
            }
            gearloan_api::Error::Transport(ref e) if e.is_connect() => {
                let url = e.url().map_or_else(|| "<unknown>".into(), ToString::to_string);
                format!("cannot connect to record store at {url}")
            }
            gearloan_api::Error::Status { status, .. } => {
                format!("record store answered HTTP {status}")
            }
            gearloan_api::Error::Deserialization { message, .. } => {
                format!("malformed response: {message}")
            }
            gearloan_api::Error::InvalidUrl(e) => {
                return Self::Config {
                    message: format!("invalid endpoint URL: {e}"),
                };
            }
            gearloan_api::Error::Tls(message) => {
                return Self::Config {
                    message: format!("TLS setup failed: {message}"),
                };
            }
            other => other.to_string(),
        };
        Self::Transport { message, status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_keeps_code() {
        let err = CoreError::from(gearloan_api::Error::Status {
            status: 502,
            body: String::new(),
        });
        match err {
            CoreError::Transport { status, message } => {
                assert_eq!(status, Some(502));
                assert!(message.contains("502"));
            }
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    #[test]
    fn deserialization_maps_to_transport() {
        let err = CoreError::from(gearloan_api::Error::Deserialization {
            message: "expected a sequence".into(),
            body: "{}".into(),
        });
        assert!(err.is_transport());
        assert!(!err.is_local());
    }

    #[test]
    fn rejection_message_names_observed_state() {
        let err = CoreError::BackendRejection {
            item_id: ItemId::from("E1"),
            action: ActionKind::Borrow,
            expected: ItemStatus::Borrowed,
            observed: Some(ItemStatus::Ready),
        };
        assert_eq!(
            err.to_string(),
            "Record store did not apply borrow on E1: expected borrowed, found ready"
        );
    }
}
