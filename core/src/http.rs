//! HTTP request/response types and the transport seam.
//!
//! # Design
//! Requests are plain data. `RequestBuilder` produces them without touching
//! the network, and a `Transport` supplied by the caller executes them. The
//! transport decides what a "pending response" is: a future, a `Result`, a
//! channel receiver. The client returns that value as-is and never looks
//! inside it, so status interpretation, retries and timeouts all stay with
//! the transport or its caller.

use std::sync::Arc;

use url::{ParseError, Url};

pub const CONTENT_TYPE: &str = "content-type";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `path` is either an absolute URL or, for fixture reads, a path relative
/// to wherever the host serves its static data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// POST with an `application/x-www-form-urlencoded` body.
    pub fn post_form(path: impl Into<String>, body: String) -> Self {
        Self::post(path).with_header(CONTENT_TYPE, FORM_CONTENT_TYPE).with_body(body)
    }

    /// POST with an `application/json` body.
    pub fn post_json(path: impl Into<String>, body: String) -> Self {
        Self::post(path).with_header(CONTENT_TYPE, JSON_CONTENT_TYPE).with_body(body)
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// True when `path` carries no scheme and must be resolved by the host.
    pub fn is_relative(&self) -> bool {
        matches!(Url::parse(&self.path), Err(ParseError::RelativeUrlWithoutBase))
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes an `HttpRequest` and hands back an opaque pending handle.
pub trait Transport {
    type Pending;

    fn execute(&self, request: HttpRequest) -> Self::Pending;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Pending = T::Pending;

    fn execute(&self, request: HttpRequest) -> Self::Pending {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    type Pending = T::Pending;

    fn execute(&self, request: HttpRequest) -> Self::Pending {
        (**self).execute(request)
    }
}
