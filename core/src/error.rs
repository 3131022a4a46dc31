//! Error types for the OncoKB client.
//!
//! # Design
//! The accessors never interpret transport failures, so nothing here wraps
//! an HTTP status. `RequestError` covers the few requests whose body has to
//! be serialized to JSON, `ConfigError` covers loading base-URL fragments,
//! and `TransportError` belongs to the bundled transports only: it travels
//! inside their pending handles and is handed back to the caller untouched.

use thiserror::Error;

/// Errors raised while loading or validating a `ClientConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid {name}: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while building an outbound request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures reported by the bundled transports.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A fixture path was dispatched but the transport has no origin to
    /// resolve it against.
    #[error("request target {0} is relative and no fixture origin is configured")]
    RelativeTarget(String),

    #[error("invalid request target {target}: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },

    #[cfg(feature = "ureq")]
    #[error("HTTP transport error: {0}")]
    Ureq(#[from] ureq::Error),

    #[cfg(feature = "async")]
    #[error("HTTP transport error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// A wire tag that does not name any known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {tag}")]
pub struct UnknownTag {
    pub kind: &'static str,
    pub tag: String,
}
