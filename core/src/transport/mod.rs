//! The transport seam and its backends.
//!
//! `Transport` is the only thing the executor knows about the network. Any
//! HTTP library can sit behind it; tests substitute scripted fakes.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpRequest, TransportResponse};

#[cfg(feature = "reqwest-transport")]
mod reqwest_transport;
#[cfg(feature = "reqwest-transport")]
pub use reqwest_transport::ReqwestTransport;

#[cfg(feature = "ureq-transport")]
mod ureq_transport;
#[cfg(feature = "ureq-transport")]
pub use ureq_transport::UreqTransport;

/// Sends one request and reports what came back.
///
/// Implementations must not interpret status codes: a 404 is a successful
/// exchange as far as the transport is concerned. `Err` is reserved for
/// exchanges that produced no usable response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<TransportResponse, TransportError>;
}
