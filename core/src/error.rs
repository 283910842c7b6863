//! Error types for the request pipeline.
//!
//! # Design
//! Every failure a caller sees is a `NetError` carrying a numeric code and a
//! message. Local failures use stable negative sentinel codes so they can
//! never collide with a real HTTP status, which is always non-negative.
//! `TransportError` exists only at the transport seam and is folded into a
//! `NetError` by the classifiers.

use thiserror::Error;

/// The request could not be constructed (bad URL).
pub const REQUEST_NOT_CREATED: i32 = -1;
/// The transport succeeded but delivered no body bytes.
pub const DATA_NOT_RECEIVED: i32 = -2;
/// The transport succeeded but reported no HTTP status.
pub const RESPONSE_NOT_RECEIVED: i32 = -3;
/// The body could not be decoded under `DecodePolicy::Strict`.
pub const DATA_NOT_DECODED: i32 = -4;
/// The call was dropped before it finished, e.g. because its runtime shut
/// down or the transport panicked.
pub const REQUEST_CANCELLED: i32 = -5;

/// A failed call, surfaced exactly once through `on_failure` or an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[NetError {code}]: {message}")]
pub struct NetError {
    pub code: i32,
    pub message: String,
}

impl NetError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn request_not_created() -> Self {
        Self::new(REQUEST_NOT_CREATED, "Request not created")
    }

    pub fn data_not_received() -> Self {
        Self::new(DATA_NOT_RECEIVED, "Data not received")
    }

    pub fn response_not_received() -> Self {
        Self::new(RESPONSE_NOT_RECEIVED, "Response not received")
    }

    pub fn data_not_decoded(reason: &str) -> Self {
        Self::new(DATA_NOT_DECODED, format!("Data could not be decoded: {reason}"))
    }

    pub fn request_cancelled() -> Self {
        Self::new(REQUEST_CANCELLED, "Request cancelled")
    }

    /// A response arrived with a status other than 200.
    pub fn unexpected_status(status: u16) -> Self {
        Self::new(i32::from(status), "Something went wrong with the request")
    }

    /// True for the negative sentinel codes raised by this crate.
    pub fn is_local(&self) -> bool {
        self.code < 0
    }

    /// The HTTP status behind this error, if there was one.
    pub fn status(&self) -> Option<u16> {
        u16::try_from(self.code).ok()
    }
}

/// The transport failed before producing a usable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Status of a partial response, when the transport saw one.
    pub status: Option<u16>,
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl From<TransportError> for NetError {
    fn from(err: TransportError) -> Self {
        let code = err.status.map_or(REQUEST_NOT_CREATED, i32::from);
        NetError::new(code, err.message)
    }
}

/// Invalid client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("failed to build transport: {0}")]
    Transport(String),

    #[error("no tokio runtime is running on this thread")]
    NoRuntime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_codes_are_stable() {
        assert_eq!(NetError::request_not_created().code, -1);
        assert_eq!(NetError::data_not_received().code, -2);
        assert_eq!(NetError::response_not_received().code, -3);
        assert_eq!(NetError::data_not_decoded("eof").code, -4);
        assert_eq!(NetError::request_cancelled().code, -5);
    }

    #[test]
    fn display_includes_code_and_message() {
        let err = NetError::request_not_created();
        assert_eq!(err.to_string(), "[NetError -1]: Request not created");
    }

    #[test]
    fn unexpected_status_keeps_status_as_code() {
        let err = NetError::unexpected_status(404);
        assert_eq!(err.code, 404);
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_local());
        assert_eq!(err.message, "Something went wrong with the request");
    }

    #[test]
    fn local_errors_have_no_status() {
        let err = NetError::data_not_received();
        assert!(err.is_local());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn transport_error_without_status_maps_to_minus_one() {
        let err: NetError = TransportError::new("connection refused").into();
        assert_eq!(err.code, -1);
        assert_eq!(err.message, "connection refused");
    }

    #[test]
    fn transport_error_with_status_keeps_it() {
        let err: NetError = TransportError::with_status(502, "bad gateway").into();
        assert_eq!(err.code, 502);
        assert_eq!(err.message, "bad gateway");
    }
}
