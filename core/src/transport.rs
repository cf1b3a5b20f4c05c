//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! The `Transport` trait is the only place I/O happens. `UreqTransport`
//! runs ureq's blocking call on tokio's blocking pool so the caller's task
//! is suspended without stalling the thread it runs on. Status codes are
//! never treated as errors here: 4xx/5xx come back as ordinary
//! `HttpResponse` data and the `RecordClient` interprets them.

use std::future::Future;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Failure to obtain any HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The server could not be reached or the exchange was cut short.
    #[error("could not reach server: {0}")]
    Unreachable(String),

    /// The request was rejected locally before it was sent.
    #[error("{0}")]
    Request(String),
}

/// Performs one HTTP round-trip.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, TransportError>>;
}

impl<T: Transport> Transport for &T {
    fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, TransportError>> {
        (**self).execute(request)
    }
}

/// `Transport` backed by a shared ureq agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // 4xx/5xx must reach the client as data, not as `Err`.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, TransportError>> {
        let agent = self.agent.clone();
        async move {
            tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
                .await
                .map_err(|e| TransportError::Unreachable(e.to_string()))?
        }
    }
}

/// Reason phrase used when the status code has no registered one.
pub const UNKNOWN_STATUS_TEXT: &str = "Unknown Status";

fn execute_blocking(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, TransportError> {
    let result = match req.method {
        HttpMethod::Get => with_headers(agent.get(&req.path), &req.headers).call(),
        HttpMethod::Delete => with_headers(agent.delete(&req.path), &req.headers).call(),
        HttpMethod::Post => send_body(with_headers(agent.post(&req.path), &req.headers), req.body),
        HttpMethod::Put => send_body(with_headers(agent.put(&req.path), &req.headers), req.body),
    };

    let mut response = result.map_err(classify)?;

    let status = response.status();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| TransportError::Unreachable(e.to_string()))?;

    // ureq does not surface the phrase the server sent, only the code.
    let status_text = status.canonical_reason().unwrap_or(UNKNOWN_STATUS_TEXT);

    Ok(HttpResponse {
        status: status.as_u16(),
        status_text: status_text.to_string(),
        headers,
        body,
    })
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_body(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: Option<String>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

/// Errors raised while preparing the request are client-side; anything else
/// means no usable response arrived.
fn classify(e: ureq::Error) -> TransportError {
    match e {
        ureq::Error::BadUri(_) | ureq::Error::Http(_) => TransportError::Request(e.to_string()),
        other => TransportError::Unreachable(other.to_string()),
    }
}
