//! Ureq-based transport.
//!
//! ureq is blocking, so every exchange runs on tokio's blocking pool and the
//! calling task only awaits the join handle.

use std::io::Read as _;

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::error::{ConfigError, TransportError};
use crate::http::{HttpRequest, TransportResponse};

use super::Transport;

/// A [`Transport`] backed by a shared [`ureq::Agent`].
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    user_agent: Option<String>,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            // Status interpretation belongs to the classifiers.
            .http_status_as_error(false)
            .build()
            .new_agent();

        Ok(Self {
            agent,
            user_agent: config.user_agent.clone(),
        })
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: HttpRequest) -> Result<TransportResponse, TransportError> {
        let agent = self.agent.clone();
        let user_agent = self.user_agent.clone();

        tokio::task::spawn_blocking(move || run(&agent, request, user_agent.as_deref()))
            .await
            .map_err(|err| TransportError::new(format!("transport task failed: {err}")))?
    }
}

fn run(
    agent: &ureq::Agent,
    request: HttpRequest,
    user_agent: Option<&str>,
) -> Result<TransportResponse, TransportError> {
    let mut builder = ureq::http::Request::builder()
        .method(request.method.as_str())
        .uri(request.url.as_str());

    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(user_agent) = user_agent {
        if request.header("user-agent").is_none() {
            builder = builder.header("User-Agent", user_agent);
        }
    }

    let result = match request.body {
        Some(body) => {
            let req = builder
                .body(body.to_vec())
                .map_err(|err| TransportError::new(err.to_string()))?;
            agent.run(req)
        }
        None => {
            let req = builder
                .body(())
                .map_err(|err| TransportError::new(err.to_string()))?;
            agent.run(req)
        }
    };

    let response = result.map_err(map_ureq_error)?;
    let (parts, body) = response.into_parts();
    let status = parts.status.as_u16();

    let mut bytes = Vec::new();
    body.into_reader()
        .read_to_end(&mut bytes)
        .map_err(|err| TransportError::with_status(status, err.to_string()))?;

    let headers = parts
        .headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();

    Ok(TransportResponse {
        status: Some(status),
        headers,
        body: Some(bytes.into()),
    })
}

fn map_ureq_error(err: ureq::Error) -> TransportError {
    match &err {
        ureq::Error::StatusCode(status) => TransportError::with_status(*status, err.to_string()),
        _ => TransportError::new(err.to_string()),
    }
}
