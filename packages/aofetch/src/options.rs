//! Call options with schema defaults.

use std::fmt;
use std::sync::Arc;

use crate::transport::Signer;
use crate::types::{Body, BodyValue, Method};

/// Default compute-unit endpoint for read-only evaluation.
pub const DEFAULT_SERVICE_URL: &str = "https://cu.ardrive.io";

/// Options for one fetch call. All fields have defaults; `FetchOptions::default()`
/// is a plain GET with an empty body against the default service endpoint.
///
/// The signer is consumed only by POST calls, which fail with
/// [`crate::Error::MissingSigner`] when it is absent.
#[derive(Clone)]
pub struct FetchOptions {
    pub method: Method,
    pub body: Body,
    pub signer: Option<Arc<dyn Signer>>,
    pub service_url: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: Body::new(),
            signer: None,
            service_url: DEFAULT_SERVICE_URL.to_string(),
        }
    }
}

impl FetchOptions {
    /// Options for a read-only call.
    pub fn get() -> Self {
        Self::default()
    }

    /// Options for a mutating call. A signer must still be attached with
    /// [`FetchOptions::with_signer`].
    pub fn post() -> Self {
        Self {
            method: Method::POST,
            ..Self::default()
        }
    }

    /// Adds one body field. Emitted on the wire as an `X-Body-<key>` tag.
    pub fn with_body_field(mut self, key: impl Into<String>, value: impl Into<BodyValue>) -> Self {
        self.body.insert(key.into(), value.into());
        self
    }

    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Overrides the compute-unit endpoint used by the default transport.
    /// Ignored when a transport was injected explicitly.
    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("method", &self.method)
            .field("body", &self.body)
            .field("signer", &self.signer.as_ref().map(|_| "<signer>"))
            .field("service_url", &self.service_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_a_plain_get() {
        let options = FetchOptions::default();
        assert_eq!(options.method, Method::GET);
        assert!(options.body.is_empty());
        assert!(options.signer.is_none());
        assert_eq!(options.service_url, DEFAULT_SERVICE_URL);
    }

    #[test]
    fn builder_collects_body_fields() {
        let options = FetchOptions::post()
            .with_body_field("name", "bob")
            .with_body_field("age", 42i64)
            .with_body_field("admin", false);

        assert_eq!(options.method, Method::POST);
        assert_eq!(options.body.len(), 3);
        assert_eq!(options.body["name"], BodyValue::from("bob"));
        assert_eq!(options.body["admin"], BodyValue::from(false));
    }

    #[test]
    fn service_url_override() {
        let options = FetchOptions::get().with_service_url("http://localhost:4004");
        assert_eq!(options.service_url, "http://localhost:4004");
    }
}
