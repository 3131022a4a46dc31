//! Client-side accessors for the OncoKB curation backends.
//!
//! # Overview
//! Each accessor maps its inputs onto one outbound HTTP request against the
//! primary API, the curation service or the OncoTree taxonomy service, then
//! hands it to a caller-supplied transport and returns the transport's
//! pending handle untouched.
//!
//! # Design
//! - `ClientConfig` carries the three base URLs and is injected, never global.
//! - `RequestBuilder` is pure: `build_*` methods produce `HttpRequest` data.
//! - `OncoKbClient` pairs a builder with a `Transport` and dispatches.
//! - Query strings drop absent or empty values; form bodies keep every key.
//! - Reads with a static-file variant take a `Source` instead of coming in
//!   remote/file method pairs.

pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod params;
pub mod serialize;
pub mod transport;
pub mod types;

pub use builder::RequestBuilder;
pub use client::OncoKbClient;
pub use config::ClientConfig;
pub use error::{ConfigError, RequestError, TransportError, UnknownTag};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use params::{ParamBag, ParamValue};
pub use types::{CacheCommand, Source, TumorTypeQuery, TumorTypeSearch, UtilsKind};

#[cfg(feature = "async")]
pub use transport::ReqwestTransport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
