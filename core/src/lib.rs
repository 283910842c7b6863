//! Declarative HTTP calls over a shared transport.
//!
//! # Overview
//! A caller describes a call as a `RequestDescription` (host, endpoint,
//! query items, JSON body fields, headers, method). The `Executor` builds it
//! into an `HttpRequest`, sends it over one long-lived `Transport`, and
//! reports exactly one outcome: a decoded value, a bare success, or a
//! `NetError`.
//!
//! # Design
//! - Building and classifying are pure (`request`, `response`); only the
//!   executor and the transports do I/O.
//! - Local failures use negative sentinel codes, remote ones the HTTP status.
//! - The transport is a trait object injected at construction, so tests and
//!   embedders can swap it.
//! - Decode failures on typed calls are lenient by default; `DecodePolicy`
//!   is the one switch that makes them hard failures.

pub mod config;
pub mod error;
pub mod executor;
pub mod http;
mod logging;
pub mod request;
pub mod response;
pub mod transport;

pub use config::{ClientConfig, DecodePolicy};
pub use error::{ConfigError, NetError, TransportError};
pub use executor::Executor;
pub use http::{HttpMethod, HttpRequest, TransportResponse};
pub use request::RequestDescription;
pub use response::Outcome;
pub use transport::Transport;

#[cfg(feature = "reqwest-transport")]
pub use transport::ReqwestTransport;
#[cfg(feature = "ureq-transport")]
pub use transport::UreqTransport;
