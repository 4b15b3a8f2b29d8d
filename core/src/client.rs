//! Stateless request builder and response parser for the employee API.
//!
//! # Design
//! `EmployeeClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. Any 2xx status counts as success; everything
//! else collapses into a single user-facing message per operation.

use serde::Deserialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Employee, EmployeeId, EmployeePayload};

/// Path of the employee resource, relative to the base URL.
pub const RESOURCE_PATH: &str = "/api/employees";

const CREATE_FAILED: &str = "Failed to create";
const UPDATE_FAILED: &str = "Failed to update";

/// Synchronous, stateless client for the employee API.
#[derive(Debug, Clone)]
pub struct EmployeeClient {
    base_url: String,
}

impl EmployeeClient {
    /// `base_url` is the origin the resource is served from; an empty string
    /// yields origin-relative paths such as `/api/employees`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection(&self) -> String {
        format!("{}{RESOURCE_PATH}", self.base_url)
    }

    fn member(&self, id: EmployeeId) -> String {
        format!("{}{RESOURCE_PATH}/{id}", self.base_url)
    }

    pub fn build_list_employees(&self) -> HttpRequest {
        HttpRequest::get(self.collection())
    }

    pub fn build_get_employee(&self, id: EmployeeId) -> HttpRequest {
        HttpRequest::get(self.member(id))
    }

    pub fn build_create_employee(&self, draft: &EmployeePayload) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::json(HttpMethod::Post, self.collection(), body))
    }

    pub fn build_update_employee(
        &self,
        id: EmployeeId,
        draft: &EmployeePayload,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::json(HttpMethod::Put, self.member(id), body))
    }

    /// Records come back in server order; nothing is re-sorted here.
    pub fn parse_list_employees(&self, response: HttpResponse) -> Result<Vec<Employee>, ApiError> {
        if !response.is_success() {
            return Err(ApiError::FetchFailed {
                status: response.status,
            });
        }
        decode(&response.body)
    }

    pub fn parse_get_employee(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        if !response.is_success() {
            return Err(ApiError::NotFound {
                status: response.status,
            });
        }
        decode(&response.body)
    }

    pub fn parse_create_employee(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        check_save(&response, CREATE_FAILED)?;
        decode(&response.body)
    }

    pub fn parse_update_employee(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        check_save(&response, UPDATE_FAILED)?;
        decode(&response.body)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Strings are shown as-is, numbers and booleans as their JSON text.
    fn message(self) -> Option<String> {
        match self.error? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Map a non-2xx save response to `Rejected`, preferring the server's own
/// `error` message over `fallback`.
fn check_save(response: &HttpResponse, fallback: &str) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(ErrorBody::message)
        .unwrap_or_else(|| fallback.to_string());
    Err(ApiError::Rejected {
        status: response.status,
        message,
    })
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
