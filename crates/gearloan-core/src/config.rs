// ── Runtime store configuration ──
//
// These types describe *how* to reach the record store and how to read
// its status column. They never touch disk: the CLI builds a
// `StoreConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use gearloan_api::transport::{TlsMode, TransportConfig};
use url::Url;

use crate::model::ItemStatus;

/// Display strings the store writes into the status column.
///
/// The store speaks in human labels rather than codes, so the mapping to
/// [`ItemStatus`] is configuration, not protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLabels {
    pub ready: String,
    pub borrowed: String,
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            ready: "พร้อมให้ยืม".into(),
            borrowed: "ถูกยืม".into(),
        }
    }
}

impl StatusLabels {
    /// Map a raw status cell to a status, ignoring surrounding whitespace.
    pub fn parse(&self, raw: &str) -> Option<ItemStatus> {
        let raw = raw.trim();
        if raw == self.ready.trim() {
            Some(ItemStatus::Ready)
        } else if raw == self.borrowed.trim() {
            Some(ItemStatus::Borrowed)
        } else {
            None
        }
    }

    pub fn label(&self, status: ItemStatus) -> &str {
        match status {
            ItemStatus::Ready => &self.ready,
            ItemStatus::Borrowed => &self.borrowed,
        }
    }
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for one record store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Read/write endpoint (e.g. a deployed script URL).
    pub endpoint: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout. `None` leaves in-flight requests unbounded.
    pub timeout: Option<Duration>,
    /// Status column vocabulary.
    pub labels: StatusLabels,
}

impl StoreConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            tls: TlsVerification::default(),
            timeout: None,
            labels: StatusLabels::default(),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        }
    }
}
