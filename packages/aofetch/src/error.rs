use crate::transport::TransportError;

/// Errors surfaced by a fetch call.
///
/// `InvalidProcessId` and `InvalidMethod` are raised before any network
/// interaction. Transport-layer failures of any origin are re-wrapped into
/// `CallFailed` with the inner message preserved.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The text before the first `/` in a location is not 43 characters.
    #[error("invalid process ID length {length}, must be 43 characters")]
    InvalidProcessId { length: usize },

    /// The verb is not `GET` or `POST`.
    #[error("invalid method: {method}")]
    InvalidMethod { method: String },

    /// No message in the result set carries the response marker tag.
    #[error("No response message received")]
    NoResponseFound,

    /// A mutating call produced no message identifier.
    #[error("failed to send message")]
    SendFailed,

    /// Awaiting a mutating call's settlement produced no result set.
    #[error("failed to get result")]
    ResultFailed,

    /// A mutating call was made without a signer in the options.
    #[error("POST requires a signer")]
    MissingSigner,

    /// No default transport is compiled in and none was injected.
    #[error("no transport available: enable the `legacynet` feature or inject one with AoClient::with_transport")]
    MissingTransport,

    /// Any other internal or transport failure.
    #[error("aofetch failed: {message}")]
    CallFailed { message: String },
}

impl From<TransportError> for Error {
    fn from(error: TransportError) -> Self {
        Error::CallFailed {
            message: error.to_string(),
        }
    }
}
