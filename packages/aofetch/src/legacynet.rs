//! Legacy AO network transport over HTTP.
//!
//! Speaks the legacy compute-unit/messenger-unit protocol:
//!
//! - dry-run: `POST {service_url}/dry-run?process-id={pid}` with an unsigned
//!   JSON message envelope, returning `{ Messages, ... }`
//! - result: `GET {service_url}/result/{message_id}?process-id={pid}`,
//!   returning `{ Messages, ... }`
//! - message: `POST {messenger_url}/` with the signed item bytes, returning
//!   `{ id }`
//!
//! Signing stays behind the [`Signer`] trait; this module submits whatever
//! bytes the signer produced and never touches key material.

use std::sync::OnceLock;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::location::ProcessId;
use crate::transport::{SignedMessage, Signer, Transport, TransportError};
use crate::types::{MessageSet, Tag};

/// Default messenger-unit endpoint for mutating sends.
pub const DEFAULT_MESSENGER_URL: &str = "https://mu.ao-testnet.xyz";

/// Placeholder sender identity for unsigned dry-run evaluation; the compute
/// unit requires the field but does not verify it.
const DRY_RUN_SENDER: &str = "0000000000000000000000000000000000000000000";

/// The shared HTTP connection handle. Initialized once, read-only after.
fn http_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(Client::new)
}

/// Unsigned message envelope posted to the compute unit for evaluation.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DryRunMessage<'a> {
    id: &'a str,
    target: &'a str,
    owner: &'a str,
    anchor: &'a str,
    data: &'a str,
    tags: &'a [Tag],
}

/// Acknowledgement returned by the messenger unit for an accepted item.
#[derive(Deserialize)]
struct MessengerReceipt {
    #[serde(default)]
    id: Option<String>,
}

/// [`Transport`] implementation over the legacy CU/MU HTTP protocol.
#[derive(Debug)]
pub struct LegacyNet {
    client: Client,
    service_url: Url,
    messenger_url: Url,
}

impl LegacyNet {
    /// Connects to a compute unit, with the default messenger unit for
    /// mutating sends.
    pub fn new(service_url: &str) -> Result<Self, TransportError> {
        Self::with_messenger(service_url, DEFAULT_MESSENGER_URL)
    }

    pub fn with_messenger(service_url: &str, messenger_url: &str) -> Result<Self, TransportError> {
        Ok(Self {
            client: http_client().clone(),
            service_url: parse_endpoint(service_url, "service url")?,
            messenger_url: parse_endpoint(messenger_url, "messenger url")?,
        })
    }

    fn service_endpoint(&self, path: &str, process: &ProcessId) -> Result<Url, TransportError> {
        let mut url = self.service_url.join(path).map_err(|e| {
            TransportError::new(format!("invalid service endpoint '{}': {}", path, e))
        })?;
        url.query_pairs_mut()
            .append_pair("process-id", process.as_str());
        Ok(url)
    }

    async fn fetch_message_set(
        &self,
        request: reqwest::RequestBuilder,
        operation: &str,
    ) -> Result<MessageSet, TransportError> {
        let response = request
            .send()
            .await
            .map_err(|e| TransportError::new(format!("{} request failed: {}", operation, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(format!(
                "{} returned HTTP {}",
                operation, status
            )));
        }

        response
            .json::<MessageSet>()
            .await
            .map_err(|e| TransportError::new(format!("{} response was not valid JSON: {}", operation, e)))
    }
}

#[async_trait]
impl Transport for LegacyNet {
    async fn dry_run(
        &self,
        process: &ProcessId,
        tags: &[Tag],
    ) -> Result<MessageSet, TransportError> {
        let url = self.service_endpoint("dry-run", process)?;
        debug!(url = %url, "posting dry-run");

        let envelope = DryRunMessage {
            id: DRY_RUN_SENDER,
            target: process.as_str(),
            owner: DRY_RUN_SENDER,
            anchor: "0",
            data: "",
            tags,
        };

        self.fetch_message_set(self.client.post(url).json(&envelope), "dry-run")
            .await
    }

    async fn send_message(
        &self,
        process: &ProcessId,
        tags: &[Tag],
        signer: &dyn Signer,
    ) -> Result<String, TransportError> {
        let SignedMessage { id, raw } = signer.sign(process, tags, b"").await?;
        debug!(url = %self.messenger_url, item = %id, "posting signed message");

        let response = self
            .client
            .post(self.messenger_url.clone())
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(raw)
            .send()
            .await
            .map_err(|e| TransportError::new(format!("message send failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(format!(
                "messenger unit returned HTTP {}",
                status
            )));
        }

        // The messenger echoes the accepted item id; fall back to the
        // signer's own id when the response body carries none.
        let receipt = response
            .json::<MessengerReceipt>()
            .await
            .unwrap_or(MessengerReceipt { id: None });
        Ok(receipt.id.unwrap_or(id))
    }

    async fn await_result(
        &self,
        process: &ProcessId,
        message_id: &str,
    ) -> Result<MessageSet, TransportError> {
        let url = self.service_endpoint(&format!("result/{}", message_id), process)?;
        debug!(url = %url, "fetching result");

        self.fetch_message_set(self.client.get(url), "result").await
    }
}

fn parse_endpoint(url: &str, label: &str) -> Result<Url, TransportError> {
    Url::parse(url).map_err(|e| TransportError::new(format!("invalid {} '{}': {}", label, url, e)))
}
