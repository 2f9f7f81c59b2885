use std::fmt;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;
use ureq::{Agent, RequestBuilder};

use crate::config::ClientConfig;
use crate::error::WorkflowError;
use crate::payload::WorkflowPayload;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Vec<u8>>,
}

/// Status and body exactly as the server sent them. Non-2xx is not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.body)
    }
}

/// Sends one request and returns the raw response.
pub trait Transport {
    fn send(&self, request: ApiRequest) -> Result<ApiResponse, WorkflowError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: ApiRequest) -> Result<ApiResponse, WorkflowError> {
        (**self).send(request)
    }
}

/// Blocking transport over a ureq agent with default timeouts.
pub struct UreqTransport {
    agent: Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }

    #[cfg(test)]
    fn with_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

fn with_headers<B>(
    mut builder: RequestBuilder<B>,
    headers: &[(&'static str, String)],
) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(*name, value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn send(&self, request: ApiRequest) -> Result<ApiResponse, WorkflowError> {
        let ApiRequest {
            method,
            url,
            headers,
            body,
        } = request;
        let network = |source: ureq::Error| WorkflowError::Network {
            method: method.as_str(),
            url: url.clone(),
            source: Box::new(source),
        };

        let bytes = body.unwrap_or_default();
        let result = match method {
            Method::Get => with_headers(self.agent.get(&url), &headers).call(),
            Method::Delete => with_headers(self.agent.delete(&url), &headers).call(),
            Method::Post => with_headers(self.agent.post(&url), &headers).send(&bytes),
            Method::Patch => with_headers(self.agent.patch(&url), &headers).send(&bytes),
        };
        let mut resp = result.map_err(network)?;

        // Unbounded and lossy: whatever the server sent gets printed.
        let status = resp.status().as_u16();
        let bytes = resp
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(network)?;
        Ok(ApiResponse {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

/// CRUD operations on the workflows collection.
pub struct WorkflowsClient<T> {
    config: ClientConfig,
    transport: T,
}

impl<T> fmt::Debug for WorkflowsClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowsClient")
            .field("config", &self.config)
            .finish()
    }
}

impl<T: Transport> WorkflowsClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    fn request(&self, method: Method, url: String, body: Option<Vec<u8>>) -> Result<ApiResponse> {
        debug!(%method, %url, "sending request");
        let resp = self.transport.send(ApiRequest {
            method,
            url,
            headers: self.config.headers(),
            body,
        })?;
        debug!(status = resp.status, bytes = resp.body.len(), "received response");
        Ok(resp)
    }

    fn send_json(&self, method: Method, url: String, body: &impl Serialize) -> Result<ApiResponse> {
        let bytes = serde_json::to_vec(body).context("failed to serialize request")?;
        self.request(method, url, Some(bytes))
    }

    pub fn create(&self, payload: &WorkflowPayload) -> Result<ApiResponse> {
        self.send_json(Method::Post, self.config.collection_url(), payload)
    }

    pub fn read(&self, workflow_id: &str) -> Result<ApiResponse> {
        self.request(Method::Get, self.config.item_url(workflow_id), None)
    }

    pub fn list(&self) -> Result<ApiResponse> {
        self.request(Method::Get, self.config.collection_url(), None)
    }

    pub fn update(&self, workflow_id: &str, payload: &WorkflowPayload) -> Result<ApiResponse> {
        self.send_json(Method::Patch, self.config.item_url(workflow_id), payload)
    }

    pub fn delete(&self, workflow_id: &str) -> Result<ApiResponse> {
        self.request(Method::Delete, self.config.item_url(workflow_id), None)
    }
}
