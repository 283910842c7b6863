//! HTTP transport types for the build/send/classify pipeline.
//!
//! # Design
//! These types describe requests and responses as plain data. The builder
//! produces `HttpRequest` values, a `Transport` turns them into
//! `TransportResponse` values, and the classifiers in `response` interpret
//! those without ever touching the network themselves.
//!
//! Response fields are `Option`al because a transport may legitimately hand
//! back a response with no status or no body bytes; the classifiers assign
//! distinct error codes to each case.

use std::fmt;

use bytes::Bytes;
use url::Url;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    /// The method token as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transport-ready HTTP request.
///
/// Built by `RequestDescription::build`. A fresh value is produced for every
/// call and handed to the transport by value.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// What a transport returned for a request that reached the other side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportResponse {
    /// HTTP status, if the transport could discover one.
    pub status: Option<u16>,
    pub headers: Vec<(String, String)>,
    /// Raw body bytes, `None` when the transport delivered no data at all.
    pub body: Option<Bytes>,
}

impl TransportResponse {
    /// A response carrying a status and a body.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status: Some(status),
            headers: Vec::new(),
            body: Some(body.into()),
        }
    }

    /// A response carrying a status and no body bytes.
    pub fn status_only(status: u16) -> Self {
        Self {
            status: Some(status),
            headers: Vec::new(),
            body: None,
        }
    }
}
