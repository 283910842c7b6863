//! Sends built requests over the shared transport and completes each call
//! exactly once.
//!
//! # Design
//! An `Executor` holds one transport for its whole lifetime and a tokio
//! `Handle` to dispatch on. Cloning is cheap and every clone shares the same
//! transport, so a composition root can build one executor and hand clones
//! out. Calls come in two shapes:
//!
//! - typed: the body is decoded into `T` (`fetch`, `run`, `execute`);
//! - empty: only HTTP 200 counts as success (`send`, `run_empty`,
//!   `execute_empty`).
//!
//! The callback forms return immediately. A request that cannot be built
//! fails on the caller's thread without reaching the transport; everything
//! else completes on a runtime worker, and callers that need a particular
//! thread must hop there themselves.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::runtime::Handle;
use tracing::{debug_span, Instrument, Span};

use crate::config::DecodePolicy;
use crate::error::{ConfigError, NetError};
use crate::http::HttpRequest;
use crate::logging;
use crate::request::RequestDescription;
use crate::response::{parse_empty, parse_typed, Outcome, TransportResult};
use crate::transport::Transport;

#[derive(Clone)]
pub struct Executor {
    transport: Arc<dyn Transport>,
    runtime: Handle,
    decode_policy: DecodePolicy,
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("decode_policy", &self.decode_policy)
            .finish_non_exhaustive()
    }
}

impl Executor {
    pub fn new(transport: Arc<dyn Transport>, runtime: Handle) -> Self {
        Self {
            transport,
            runtime,
            decode_policy: DecodePolicy::default(),
        }
    }

    /// Bind to the runtime the caller is currently running on.
    pub fn on_current_runtime(transport: Arc<dyn Transport>) -> Result<Self, ConfigError> {
        let runtime = Handle::try_current().map_err(|_| ConfigError::NoRuntime)?;
        Ok(Self::new(transport, runtime))
    }

    /// An executor over a [`crate::ReqwestTransport`] built from `config`.
    #[cfg(feature = "reqwest-transport")]
    pub fn from_config(
        config: &crate::config::ClientConfig,
        runtime: Handle,
    ) -> Result<Self, ConfigError> {
        let transport = crate::transport::ReqwestTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), runtime).with_decode_policy(config.decode_policy))
    }

    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = policy;
        self
    }

    pub fn decode_policy(&self) -> DecodePolicy {
        self.decode_policy
    }

    /// Issue a typed call and decode the body into `T`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        description: &RequestDescription,
    ) -> Result<Option<T>, NetError> {
        let (request, span) = prepare(description)?;
        self.complete_typed(request).instrument(span).await
    }

    /// Issue a call that expects no payload.
    pub async fn send(&self, description: &RequestDescription) -> Result<(), NetError> {
        let (request, span) = prepare(description)?;
        self.complete_empty(request).instrument(span).await
    }

    pub async fn run<T: DeserializeOwned>(&self, description: &RequestDescription) -> Outcome<T> {
        Outcome::from_typed(self.fetch(description).await)
    }

    pub async fn run_empty(&self, description: &RequestDescription) -> Outcome<()> {
        Outcome::from_empty(self.send(description).await)
    }

    /// Callback form of [`Executor::fetch`]. Exactly one callback runs.
    pub fn execute<T, S, F>(&self, description: RequestDescription, on_success: S, on_failure: F)
    where
        T: DeserializeOwned + Send + 'static,
        S: FnOnce(Option<T>) + Send + 'static,
        F: FnOnce(NetError) + Send + 'static,
    {
        let (request, span) = match prepare(&description) {
            Ok(prepared) => prepared,
            Err(err) => return on_failure(err),
        };

        let executor = self.clone();
        let on_failure = FailureGuard::new(on_failure);
        self.runtime.spawn(
            async move {
                match executor.complete_typed::<T>(request).await {
                    Ok(value) => {
                        on_failure.disarm();
                        on_success(value)
                    }
                    Err(err) => on_failure.fail(err),
                }
            }
            .instrument(span),
        );
    }

    /// Callback form of [`Executor::send`]. Exactly one callback runs.
    pub fn execute_empty<S, F>(&self, description: RequestDescription, on_success: S, on_failure: F)
    where
        S: FnOnce() + Send + 'static,
        F: FnOnce(NetError) + Send + 'static,
    {
        let (request, span) = match prepare(&description) {
            Ok(prepared) => prepared,
            Err(err) => return on_failure(err),
        };

        let executor = self.clone();
        let on_failure = FailureGuard::new(on_failure);
        self.runtime.spawn(
            async move {
                match executor.complete_empty(request).await {
                    Ok(()) => {
                        on_failure.disarm();
                        on_success()
                    }
                    Err(err) => on_failure.fail(err),
                }
            }
            .instrument(span),
        );
    }

    async fn complete_typed<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<Option<T>, NetError> {
        let result = self.dispatch(request).await;
        let parsed = parse_typed(result, self.decode_policy);
        match &parsed {
            Ok(value) => logging::decoded(value.is_some()),
            Err(err) => logging::failed(err),
        }
        parsed
    }

    async fn complete_empty(&self, request: HttpRequest) -> Result<(), NetError> {
        let result = self.dispatch(request).await;
        let parsed = parse_empty(result);
        match &parsed {
            Ok(()) => logging::completed(),
            Err(err) => logging::failed(err),
        }
        parsed
    }

    async fn dispatch(&self, request: HttpRequest) -> TransportResult {
        logging::request(&request);
        let result = self.transport.send(request).await;
        logging::response(&result);
        result
    }
}

/// Holds a call's `on_failure` until the call settles.
///
/// The guard is moved into the spawned task, so it is dropped with the task
/// even when the task never runs to completion (runtime shut down before or
/// during the call, or a panic in the transport). Dropping it armed reports
/// `REQUEST_CANCELLED`, keeping the one-callback-per-call contract.
struct FailureGuard<F: FnOnce(NetError)> {
    on_failure: Option<F>,
}

impl<F: FnOnce(NetError)> FailureGuard<F> {
    fn new(on_failure: F) -> Self {
        Self {
            on_failure: Some(on_failure),
        }
    }

    fn fail(mut self, err: NetError) {
        if let Some(on_failure) = self.on_failure.take() {
            on_failure(err);
        }
    }

    fn disarm(mut self) {
        self.on_failure = None;
    }
}

impl<F: FnOnce(NetError)> Drop for FailureGuard<F> {
    fn drop(&mut self) {
        if let Some(on_failure) = self.on_failure.take() {
            let err = NetError::request_cancelled();
            logging::failed(&err);
            on_failure(err);
        }
    }
}

/// Build the request and open the span the call runs under.
fn prepare(description: &RequestDescription) -> Result<(HttpRequest, Span), NetError> {
    let span = debug_span!(
        "request",
        method = %description.method,
        endpoint = %description.endpoint
    );
    match description.build() {
        Ok(request) => Ok((request, span)),
        Err(err) => {
            span.in_scope(|| logging::failed(&err));
            Err(err)
        }
    }
}
