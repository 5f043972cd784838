//! Transport seam between the fetch pipeline and the network.
//!
//! The pipeline never talks to the network directly; it calls the operations
//! on this trait. Implementations can speak a real protocol (see the
//! `legacynet` module) or return canned message sets for testing.

use async_trait::async_trait;

use crate::location::ProcessId;
use crate::types::{MessageSet, Tag};

/// Error raised at the transport boundary.
///
/// Carries a human-readable message only; the pipeline re-wraps it into
/// [`crate::Error::CallFailed`] without inspecting it.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Network round trips consumed by the fetch pipeline.
///
/// # Object Safety
///
/// This trait is object-safe: the client holds an `Arc<dyn Transport>`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Read-only evaluation against a process. No signature required.
    async fn dry_run(
        &self,
        process: &ProcessId,
        tags: &[Tag],
    ) -> Result<MessageSet, TransportError>;

    /// Send a signed message to a process, returning the message identifier
    /// the network assigned to the send.
    async fn send_message(
        &self,
        process: &ProcessId,
        tags: &[Tag],
        signer: &dyn Signer,
    ) -> Result<String, TransportError>;

    /// Await the settled result of a previously sent message.
    async fn await_result(
        &self,
        process: &ProcessId,
        message_id: &str,
    ) -> Result<MessageSet, TransportError>;
}

/// A credential-backed capability that produces authenticated messages.
///
/// Key material and signature schemes live entirely behind this trait; the
/// crate never inspects them. Callers supply a signer explicitly through the
/// call options — there is no ambient credential lookup.
#[async_trait]
pub trait Signer: Send + Sync {
    /// Produce a signed message item for `target` carrying `tags` and `data`.
    async fn sign(
        &self,
        target: &ProcessId,
        tags: &[Tag],
        data: &[u8],
    ) -> Result<SignedMessage, TransportError>;
}

/// Output of [`Signer::sign`]: the item identifier plus the raw bytes to
/// submit to the network.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedMessage {
    pub id: String,
    pub raw: Vec<u8>,
}
