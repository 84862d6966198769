// Record store HTTP client
//
// Wraps `reqwest::Client` with the store's two operations: a full read and
// an opaque write. Writes go out as `text/plain` so browsers in front of the
// same script never need a CORS preflight; we keep the same wire contract.

use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{Ack, Action, RawItem};
use crate::transport::TransportConfig;

const PLAIN_TEXT: &str = "text/plain;charset=utf-8";

/// Raw HTTP client for the equipment record store.
///
/// A single endpoint serves both reads (`GET`) and writes (`POST`).
/// The client holds no state beyond the connection pool; it knows
/// nothing about catalogs or UI.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl StoreClient {
    /// Create a new store client from a `TransportConfig`.
    pub fn new(endpoint: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, endpoint })
    }

    /// Create a store client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// Parse `endpoint` and wrap a pre-built `reqwest::Client`.
    pub fn from_reqwest(endpoint: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self::with_client(http, Url::parse(endpoint)?))
    }

    /// The record store endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Retrieve every item record.
    ///
    /// `GET <endpoint>` → JSON array. All-or-nothing: a failed request,
    /// a non-success status, or a body that is not an array of records
    /// yields an error and no items.
    pub async fn fetch_all(&self) -> Result<Vec<RawItem>, Error> {
        debug!("GET {}", self.endpoint);

        let resp = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(Error::Transport)?;

        let body = Self::success_body(resp).await?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Send a single state-change request.
    ///
    /// The response body is drained and ignored. A success status does not
    /// mean the store applied the action. Never retried here: there is no
    /// idempotency key, so a second attempt may apply twice.
    pub async fn submit_action(&self, action: &Action) -> Result<Ack, Error> {
        let body = serde_json::to_string(action).map_err(Error::Encode)?;
        debug!(
            action = action.verb(),
            equipment_id = action.equipment_id(),
            "POST {}",
            self.endpoint
        );

        let resp = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, PLAIN_TEXT)
            .body(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status().as_u16();
        Self::success_body(resp).await?;
        Ok(Ack { status })
    }

    // ── Response helpers ─────────────────────────────────────────────

    /// Read the body, turning non-success statuses into `Error::Status`.
    async fn success_body(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(Error::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}
