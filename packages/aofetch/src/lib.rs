//! # aofetch
//!
//! HTTP-style fetch calls against AO processes.
//!
//! A process is an addressable remote computation unit identified by a
//! 43-character id. Processes following the aoxpress convention dispatch on
//! a route string plus verb, like a tiny HTTP server reached over the
//! message network. This crate hides the message-oriented round trip (send
//! tags, await a correlated result, extract tags) behind one fetch call.
//!
//! ## Calling a route
//!
//! ```ignore
//! use aofetch::{aofetch, FetchOptions};
//!
//! // Read-only: evaluated as a dry run, no signature needed.
//! let res = aofetch(
//!     "3GxCscS3FWn6MQ4RfCxHdIOknPXwX3_99XNUmDvtGYw/name",
//!     FetchOptions::get(),
//! )
//! .await?;
//! println!("{} {}", res.status, res.text);
//!
//! // Mutating: sent as a signed message, settled on the network.
//! let res = aofetch(
//!     "3GxCscS3FWn6MQ4RfCxHdIOknPXwX3_99XNUmDvtGYw/name",
//!     FetchOptions::post()
//!         .with_body_field("name", "bob")
//!         .with_signer(my_signer),
//! )
//! .await?;
//! println!("sent as {}", res.id);
//! ```
//!
//! ## Injecting a transport
//!
//! The network round trip sits behind the [`Transport`] trait. The default
//! `legacynet` feature ships an HTTP implementation; tests and alternative
//! networks inject their own:
//!
//! ```ignore
//! use std::sync::Arc;
//! use aofetch::{AoClient, FetchOptions};
//!
//! let client = AoClient::with_transport(Arc::new(my_transport));
//! let res = client.fetch("…/name", FetchOptions::get()).await?;
//! ```
//!
//! Each call is a single best-effort round trip: no retries, no timeouts
//! beyond what the transport itself applies.

pub mod client;
pub mod error;
pub mod location;
pub mod options;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

#[cfg(feature = "legacynet")]
pub mod legacynet;

pub use client::{aofetch, fetch_with, AoClient};
pub use error::Error;
pub use location::{Location, ProcessId, PROCESS_ID_LENGTH};
pub use options::{FetchOptions, DEFAULT_SERVICE_URL};
pub use request::encode_route_call;
pub use response::{find_response, normalize, FetchResponse, STATUS_UNSET};
pub use transport::{SignedMessage, Signer, Transport, TransportError};
pub use types::{Body, BodyValue, Message, MessageSet, Method, Tag};
