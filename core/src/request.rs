//! Declarative request descriptions and the builder that turns them into
//! `HttpRequest` values.
//!
//! # Design
//! `RequestDescription` is plain data: the caller states host, endpoint,
//! query items, JSON body fields, headers and method, and `build` maps that
//! deterministically onto a wire-level request. Maps are `BTreeMap`s so the
//! same description always produces byte-identical output. Body fields are
//! `serde_json::Value`s, which keeps heterogeneous payloads typed without an
//! open "any" type.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde_json::{Map, Value};
use tracing::{trace, warn};
use url::Url;

use crate::error::NetError;
use crate::http::{HttpMethod, HttpRequest};

/// Everything needed to issue one call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescription {
    /// Scheme and authority, e.g. `https://api.example.com`.
    pub host: String,
    /// Path appended verbatim to `host`.
    pub endpoint: String,
    pub query_parameters: BTreeMap<String, String>,
    pub body_parameters: Map<String, Value>,
    pub headers: BTreeMap<String, String>,
    pub method: HttpMethod,
}

impl RequestDescription {
    pub fn new(host: impl Into<String>, endpoint: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            host: host.into(),
            endpoint: endpoint.into(),
            query_parameters: BTreeMap::new(),
            body_parameters: Map::new(),
            headers: BTreeMap::new(),
            method,
        }
    }

    pub fn get(host: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new(host, endpoint, HttpMethod::Get)
    }

    pub fn post(host: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new(host, endpoint, HttpMethod::Post)
    }

    pub fn patch(host: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new(host, endpoint, HttpMethod::Patch)
    }

    pub fn delete(host: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new(host, endpoint, HttpMethod::Delete)
    }

    /// Add a query item. A repeated key replaces the earlier value.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_parameters.insert(key.into(), value.into());
        self
    }

    /// Add a top-level field to the JSON body.
    pub fn body_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body_parameters.insert(key.into(), value.into());
        self
    }

    /// Set a header. Names are case-insensitive and stored lowercased, so
    /// setting the same name twice in any case replaces the earlier value.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Shorthand for the `Content-Type: application/json` header, which is
    /// never set implicitly.
    pub fn json(self) -> Self {
        self.header("Content-Type", "application/json")
    }

    /// Build the transport-ready request.
    ///
    /// Fails only when `host + endpoint` is not an absolute URL. A body that
    /// cannot be serialized is dropped rather than failing the build.
    pub fn build(&self) -> Result<HttpRequest, NetError> {
        let url = self.url()?;

        let body = if self.body_parameters.is_empty() {
            None
        } else {
            match serde_json::to_vec(&self.body_parameters) {
                Ok(bytes) => Some(Bytes::from(bytes)),
                Err(err) => {
                    warn!(%err, "body parameters did not serialize, sending without a body");
                    None
                }
            }
        };

        // `headers` is a public field and may hold names that differ only in
        // case. Fold them so each name goes out once; in key order the
        // lowercase spelling sorts last and wins.
        let headers: BTreeMap<String, String> = self
            .headers
            .iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
            .collect();
        let headers = headers.into_iter().collect();

        trace!(method = %self.method, %url, "built request");

        Ok(HttpRequest {
            method: self.method,
            url,
            headers,
            body,
        })
    }

    fn url(&self) -> Result<Url, NetError> {
        let raw = format!("{}{}", self.host, self.endpoint);
        let mut url = match Url::parse(&raw) {
            Ok(url) if !url.cannot_be_a_base() => url,
            Ok(_) => {
                trace!(url = %raw, "url cannot carry a path");
                return Err(NetError::request_not_created());
            }
            Err(err) => {
                trace!(url = %raw, %err, "url did not parse");
                return Err(NetError::request_not_created());
            }
        };

        if !self.query_parameters.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query_parameters.iter());
        }

        Ok(url)
    }
}
