//! Call orchestration: encode, round-trip, correlate, normalize.

use std::sync::Arc;

use tracing::debug;

use crate::error::Error;
use crate::location::Location;
use crate::options::FetchOptions;
use crate::request::encode_route_call;
use crate::response::{find_response, normalize, FetchResponse};
use crate::transport::Transport;
use crate::types::Method;

/// Runs one fetch call against an explicit transport.
///
/// The location is validated before any network interaction; the rest of the
/// pipeline is a single round trip with no retry policy.
pub async fn fetch_with(
    transport: &dyn Transport,
    location: &str,
    options: FetchOptions,
) -> Result<FetchResponse, Error> {
    let location = Location::parse(location)?;
    debug!(
        process = %location.process,
        route = %location.route,
        method = %options.method,
        "dispatching route call"
    );

    let tags = encode_route_call(&location.route, options.method, &options.body);

    match options.method {
        Method::GET => {
            let result = transport.dry_run(&location.process, &tags).await?;
            let message = find_response(&result.messages)?;
            Ok(normalize(message))
        }
        Method::POST => {
            let signer = options.signer.as_deref().ok_or(Error::MissingSigner)?;

            let id = transport
                .send_message(&location.process, &tags, signer)
                .await?;
            if id.is_empty() {
                return Err(Error::SendFailed);
            }
            debug!(message_id = %id, "message accepted, awaiting result");

            let result = transport.await_result(&location.process, &id).await?;
            if result.messages.is_empty() {
                return Err(Error::ResultFailed);
            }

            // The caller learns the mutation's own transaction id, not any
            // id embedded in the response message itself.
            let mut message = find_response(&result.messages)?.clone();
            message.id = Some(id);
            Ok(normalize(&message))
        }
    }
}

/// A fetch client bound to one transport.
///
/// Cheap to clone; concurrent calls are independent.
#[derive(Clone)]
pub struct AoClient {
    transport: Arc<dyn Transport>,
}

impl AoClient {
    /// Builds a client over the default `legacynet` transport against
    /// [`crate::DEFAULT_SERVICE_URL`].
    ///
    /// Fails with [`Error::MissingTransport`] when the crate was compiled
    /// without the `legacynet` feature.
    #[cfg(feature = "legacynet")]
    pub fn new() -> Result<Self, Error> {
        Self::with_service_url(crate::options::DEFAULT_SERVICE_URL)
    }

    #[cfg(not(feature = "legacynet"))]
    pub fn new() -> Result<Self, Error> {
        Err(Error::MissingTransport)
    }

    /// Builds a client over the default transport against a specific
    /// compute-unit endpoint.
    #[cfg(feature = "legacynet")]
    pub fn with_service_url(service_url: &str) -> Result<Self, Error> {
        let transport = crate::legacynet::LegacyNet::new(service_url)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Builds a client over an injected transport implementation.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Invokes `"<processId>/<route>"` on the bound transport.
    pub async fn fetch(
        &self,
        location: &str,
        options: FetchOptions,
    ) -> Result<FetchResponse, Error> {
        fetch_with(self.transport.as_ref(), location, options).await
    }
}

/// Invokes `"<processId>/<route>"` with the default transport, honouring
/// `options.service_url`.
///
/// ```ignore
/// use aofetch::{aofetch, FetchOptions};
///
/// let response = aofetch(
///     "3GxCscS3FWn6MQ4RfCxHdIOknPXwX3_99XNUmDvtGYw/name",
///     FetchOptions::get(),
/// )
/// .await?;
/// assert_eq!(response.status, 200);
/// ```
#[cfg(feature = "legacynet")]
pub async fn aofetch(location: &str, options: FetchOptions) -> Result<FetchResponse, Error> {
    let transport = crate::legacynet::LegacyNet::new(&options.service_url)?;
    fetch_with(&transport, location, options).await
}

/// Without the `legacynet` feature there is no default transport; use
/// [`AoClient::with_transport`] instead.
#[cfg(not(feature = "legacynet"))]
pub async fn aofetch(_location: &str, _options: FetchOptions) -> Result<FetchResponse, Error> {
    Err(Error::MissingTransport)
}
