//! Classification of transport results into caller-facing outcomes.
//!
//! # Design
//! These functions are pure: they take what the transport produced and
//! decide which single outcome the caller sees. Keeping them apart from the
//! executor means every branch of the taxonomy can be tested without a
//! runtime or a network.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::DecodePolicy;
use crate::error::{NetError, TransportError};
use crate::http::TransportResponse;

pub type TransportResult = Result<TransportResponse, TransportError>;

/// Exactly one result of a call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// A typed call finished; the value is absent when the body did not decode.
    Decoded(Option<T>),
    /// An empty-result call received HTTP 200.
    Completed,
    Failed(NetError),
}

impl<T> Outcome<T> {
    pub fn from_typed(result: Result<Option<T>, NetError>) -> Self {
        match result {
            Ok(value) => Outcome::Decoded(value),
            Err(err) => Outcome::Failed(err),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn error(&self) -> Option<&NetError> {
        match self {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl Outcome<()> {
    pub fn from_empty(result: Result<(), NetError>) -> Self {
        match result {
            Ok(()) => Outcome::Completed,
            Err(err) => Outcome::Failed(err),
        }
    }
}

/// Classify the result of a typed call.
///
/// The HTTP status is not consulted: any response with body bytes is handed
/// to the decoder.
pub fn parse_typed<T: DeserializeOwned>(
    result: TransportResult,
    policy: DecodePolicy,
) -> Result<Option<T>, NetError> {
    let response = result?;
    let Some(body) = response.body else {
        return Err(NetError::data_not_received());
    };
    decode(&body, policy)
}

/// Classify the result of a call that expects no payload.
pub fn parse_empty(result: TransportResult) -> Result<(), NetError> {
    let response = result?;
    match response.status {
        None => Err(NetError::response_not_received()),
        Some(200) => Ok(()),
        Some(status) => Err(NetError::unexpected_status(status)),
    }
}

/// The one place where a decode failure is turned into an outcome.
fn decode<T: DeserializeOwned>(body: &[u8], policy: DecodePolicy) -> Result<Option<T>, NetError> {
    match serde_json::from_slice(body) {
        Ok(value) => Ok(Some(value)),
        Err(err) => match policy {
            DecodePolicy::Lenient => {
                debug!(%err, len = body.len(), "response body did not decode, no value");
                Ok(None)
            }
            DecodePolicy::Strict => {
                warn!(%err, len = body.len(), "response body did not decode");
                Err(NetError::data_not_decoded(&err.to_string()))
            }
        },
    }
}
