//! Employee records client core.
//!
//! # Overview
//! A record list, a create/update form and a thin API client for the
//! `/api/employees` REST resource. None of the components perform I/O:
//! they hand out `HttpRequest` values and take `HttpResponse` values back,
//! so a UI event loop, a test, or the blocking `EmployeeApi` can sit in
//! between.
//!
//! # Design
//! - `EmployeeClient` is stateless and holds only `base_url`; every
//!   operation is a `build_*`/`parse_*` pair.
//! - `EmployeeForm` is an explicit state machine (`FormState`) over an
//!   all-text `EmployeeDraft`; the draft's identifier alone picks create or
//!   update.
//! - `EmployeeList` always reloads after a save instead of merging the saved
//!   record into its rows.
//! - `Page` wires a standalone create form to the list.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod list;
pub mod page;
pub mod transport;
pub mod types;
pub mod validation;

pub use client::EmployeeClient;
pub use error::ApiError;
pub use form::{EmployeeForm, FormState, SaveKind, SubmitError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::{EmployeeList, ListState, Row};
pub use page::{Page, PageRequest, Target};
pub use transport::{EmployeeApi, Transport, TransportError, UreqTransport};
pub use types::{Employee, EmployeeDraft, EmployeeId, EmployeePayload, Field};
pub use validation::ValidationError;
