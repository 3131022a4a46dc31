//! Ready-made `Transport` implementations.
//!
//! `UreqTransport` (feature `ureq`) executes requests on the calling thread
//! and its pending handle is a plain `Result`. `ReqwestTransport` (feature
//! `async`) returns a boxed future that has not been polled yet. Both hand
//! non-2xx responses back as data; deciding what a 404 means is the
//! caller's job.
//!
//! Fixture reads carry a relative path such as `data/gene.json`. A transport
//! resolves it against its fixture origin, and refuses it when none is set.

use url::Url;

use crate::error::TransportError;
use crate::http::HttpRequest;

/// Parse `origin` as a base for fixture paths, forcing a trailing `/` so
/// that joining keeps the last path segment.
fn fixture_origin(origin: &str) -> Result<Url, TransportError> {
    let mut url = Url::parse(origin).map_err(|source| TransportError::InvalidTarget {
        target: origin.to_string(),
        source,
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn resolve_target(origin: Option<&Url>, request: &HttpRequest) -> Result<Url, TransportError> {
    let invalid = |source| TransportError::InvalidTarget {
        target: request.path.clone(),
        source,
    };
    if !request.is_relative() {
        return Url::parse(&request.path).map_err(invalid);
    }
    let origin = origin.ok_or_else(|| TransportError::RelativeTarget(request.path.clone()))?;
    origin.join(&request.path).map_err(invalid)
}

#[cfg(feature = "ureq")]
pub use blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use url::Url;

    use super::{fixture_origin, resolve_target};
    use crate::error::TransportError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

    /// Blocking transport backed by a shared `ureq::Agent`.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
        fixture_origin: Option<Url>,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self {
                agent,
                fixture_origin: None,
            }
        }

        /// Resolve relative fixture paths against `origin`.
        pub fn with_fixture_origin(mut self, origin: &str) -> Result<Self, TransportError> {
            self.fixture_origin = Some(fixture_origin(origin)?);
            Ok(self)
        }

        fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let url = resolve_target(self.fixture_origin.as_ref(), &request)?;

            let mut response = match request.method {
                HttpMethod::Get => {
                    let mut builder = self.agent.get(url.as_str());
                    for (name, value) in &request.headers {
                        builder = builder.header(name.as_str(), value.as_str());
                    }
                    builder.call()?
                }
                HttpMethod::Post => {
                    let mut builder = self.agent.post(url.as_str());
                    for (name, value) in &request.headers {
                        builder = builder.header(name.as_str(), value.as_str());
                    }
                    match &request.body {
                        Some(body) => builder.send(body.as_bytes())?,
                        None => builder.send_empty()?,
                    }
                }
            };

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response.body_mut().read_to_string()?;

            Ok(HttpResponse { status, headers, body })
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for UreqTransport {
        type Pending = Result<HttpResponse, TransportError>;

        fn execute(&self, request: HttpRequest) -> Self::Pending {
            self.send(request)
        }
    }
}

#[cfg(feature = "async")]
pub use nonblocking::ReqwestTransport;

#[cfg(feature = "async")]
mod nonblocking {
    use futures::future::{BoxFuture, FutureExt};
    use url::Url;

    use super::{fixture_origin, resolve_target};
    use crate::error::TransportError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

    /// Non-blocking transport backed by a shared `reqwest::Client`.
    ///
    /// `execute` only builds the future; nothing goes on the wire until the
    /// caller polls it.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
        fixture_origin: Option<Url>,
    }

    impl ReqwestTransport {
        pub fn new(client: reqwest::Client) -> Self {
            Self {
                client,
                fixture_origin: None,
            }
        }

        pub fn with_fixture_origin(mut self, origin: &str) -> Result<Self, TransportError> {
            self.fixture_origin = Some(fixture_origin(origin)?);
            Ok(self)
        }
    }

    impl Transport for ReqwestTransport {
        type Pending = BoxFuture<'static, Result<HttpResponse, TransportError>>;

        fn execute(&self, request: HttpRequest) -> Self::Pending {
            let client = self.client.clone();
            let target = resolve_target(self.fixture_origin.as_ref(), &request);

            async move {
                let method = match request.method {
                    HttpMethod::Get => reqwest::Method::GET,
                    HttpMethod::Post => reqwest::Method::POST,
                };
                let mut builder = client.request(method, target?);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                if let Some(body) = request.body {
                    builder = builder.body(body);
                }

                let response = builder.send().await?;
                let status = response.status().as_u16();
                let headers = response
                    .headers()
                    .iter()
                    .filter_map(|(name, value)| {
                        value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
                    })
                    .collect();
                let body = response.text().await?;

                Ok::<_, TransportError>(HttpResponse { status, headers, body })
            }
            .boxed()
        }
    }
}
