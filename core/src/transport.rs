//! Executing `HttpRequest`s.
//!
//! # Design
//! `Transport` is the one seam between the pure components and the network.
//! `UreqTransport` is the blocking implementation; any
//! `Fn(HttpRequest) -> Result<HttpResponse, TransportError>` is a transport
//! too, which is how tests script a server. `EmployeeApi` pairs a transport
//! with an `EmployeeClient` so each operation is a single call.

use tracing::debug;

use crate::client::EmployeeClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Employee, EmployeeId, EmployeePayload};

/// The request could not be completed; no status code is available.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(String),

    #[error("could not read response body: {0}")]
    Body(String),
}

pub trait Transport {
    /// Perform one round-trip. Non-2xx statuses are responses, not errors.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(HttpRequest) -> Result<HttpResponse, TransportError>,
{
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Status interpretation belongs to `EmployeeClient`, so 4xx/5xx must
        // come back as responses.
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
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;
        debug!(%method, %path, "sending request");

        let result = match method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&path);
                for (name, value) in &headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post | HttpMethod::Put => {
                let mut builder = if method == HttpMethod::Post {
                    self.agent.post(&path)
                } else {
                    self.agent.put(&path)
                };
                for (name, value) in &headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Body(e.to_string()))?;
        debug!(status, "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// The four API operations as direct calls.
#[derive(Debug, Clone)]
pub struct EmployeeApi<T = UreqTransport> {
    client: EmployeeClient,
    transport: T,
}

impl EmployeeApi<UreqTransport> {
    pub fn connect(base_url: &str) -> Self {
        Self::new(EmployeeClient::new(base_url), UreqTransport::new())
    }
}

impl<T: Transport> EmployeeApi<T> {
    pub fn new(client: EmployeeClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &EmployeeClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        let response = self.transport.execute(self.client.build_list_employees())?;
        self.client.parse_list_employees(response)
    }

    pub fn get_employee(&self, id: EmployeeId) -> Result<Employee, ApiError> {
        let response = self.transport.execute(self.client.build_get_employee(id))?;
        self.client.parse_get_employee(response)
    }

    pub fn create_employee(&self, draft: &EmployeePayload) -> Result<Employee, ApiError> {
        let request = self.client.build_create_employee(draft)?;
        let response = self.transport.execute(request)?;
        self.client.parse_create_employee(response)
    }

    pub fn update_employee(
        &self,
        id: EmployeeId,
        draft: &EmployeePayload,
    ) -> Result<Employee, ApiError> {
        let request = self.client.build_update_employee(id, draft)?;
        let response = self.transport.execute(request)?;
        self.client.parse_update_employee(response)
    }
}
