//! Create/update form for a single employee.
//!
//! # Design
//! The form is a state machine over an `EmployeeDraft`. Whether a submit
//! creates or updates is decided by the draft alone: no identifier means
//! create. The network sits outside: `submit` hands back the request to run
//! and `complete` takes the response. `save` does both through a
//! `Transport` for hosts that are happy to block.

use tracing::{debug, warn};

use crate::client::EmployeeClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Employee, EmployeeDraft, EmployeeId, Field};
use crate::validation::{self, ValidationError};

/// Which API operation a submission goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Create,
    Update(EmployeeId),
}

/// Where the form is in its submit cycle.
///
/// A pending save never carries an error; an error is cleared as soon as the
/// next submit passes validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// Accepting input.
    Editing,
    /// A save request is out; the draft is frozen.
    Submitting(SaveKind),
    /// Accepting input, with the last failure shown above the fields.
    Error(String),
}

/// Why `submit` produced no request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("a save is already in progress")]
    Busy,

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone)]
pub struct EmployeeForm {
    client: EmployeeClient,
    draft: EmployeeDraft,
    state: FormState,
}

impl EmployeeForm {
    /// An empty form in create mode.
    pub fn new(client: EmployeeClient) -> Self {
        Self {
            client,
            draft: EmployeeDraft::default(),
            state: FormState::Editing,
        }
    }

    /// A form pre-filled with `record`, in update mode.
    pub fn for_record(client: EmployeeClient, record: &Employee) -> Self {
        let mut form = Self::new(client);
        form.load(Some(record));
        form
    }

    pub fn draft(&self) -> &EmployeeDraft {
        &self.draft
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FormState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, FormState::Submitting(_))
    }

    /// Editing an empty draft with nothing to report.
    pub fn is_idle(&self) -> bool {
        self.state == FormState::Editing && self.draft.is_empty()
    }

    /// The operation the next submit would issue.
    pub fn save_kind(&self) -> SaveKind {
        match self.draft.id {
            Some(id) => SaveKind::Update(id),
            None => SaveKind::Create,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.save_kind() {
            SaveKind::Create => "Create Employee",
            SaveKind::Update(_) => "Update Employee",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (&self.state, self.save_kind()) {
            (FormState::Submitting(_), _) => "Saving...",
            (_, SaveKind::Create) => "Create",
            (_, SaveKind::Update(_)) => "Update",
        }
    }

    /// Replace the whole draft with `record`, or with an empty draft for
    /// `None`, and drop any error.
    ///
    /// A save already in flight is not cancelled: the form stays in
    /// `Submitting` and the eventual `complete` still applies.
    pub fn load(&mut self, record: Option<&Employee>) {
        self.draft = record.map(EmployeeDraft::from).unwrap_or_default();
        if !self.is_submitting() {
            self.state = FormState::Editing;
        }
        debug!(id = ?self.draft.id, "form loaded");
    }

    /// Set one input. Returns `false` and changes nothing while submitting.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.draft.set(field, value);
        true
    }

    /// Validate the draft and produce the create or update request.
    ///
    /// On a validation failure the message becomes the form's error and no
    /// request is produced.
    pub fn submit(&mut self) -> Result<HttpRequest, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::Busy);
        }
        self.state = FormState::Editing;

        if let Err(err) = validation::validate(&self.draft) {
            debug!(error = %err, "draft rejected locally");
            self.state = FormState::Error(err.to_string());
            return Err(err.into());
        }

        let kind = self.save_kind();
        let payload = self.draft.to_payload();
        let built = match kind {
            SaveKind::Create => self.client.build_create_employee(&payload),
            SaveKind::Update(id) => self.client.build_update_employee(id, &payload),
        };
        let request = built.inspect_err(|err| self.state = FormState::Error(err.message()))?;

        debug!(?kind, "submitting");
        self.state = FormState::Submitting(kind);
        Ok(request)
    }

    /// Apply the response to the request returned by `submit`.
    ///
    /// On success the draft is cleared and the saved record returned for the
    /// owner to act on. On failure the message is shown and the draft kept.
    pub fn complete(&mut self, response: HttpResponse) -> Option<Employee> {
        let FormState::Submitting(kind) = self.state else {
            warn!(status = response.status, "response arrived with no save pending");
            return None;
        };
        self.resolve(kind, response).ok()
    }

    /// Record a failure for the pending save, e.g. when the host could not
    /// reach the server at all. Ignored when no save is pending.
    pub fn fail(&mut self, err: ApiError) {
        if !self.is_submitting() {
            warn!(error = %err, "failure arrived with no save pending");
            return;
        }
        warn!(error = %err, "save failed");
        self.state = FormState::Error(err.message());
    }

    /// Submit and run the request through `transport`, blocking until the
    /// response arrives.
    pub fn save<T: Transport + ?Sized>(&mut self, transport: &T) -> Result<Employee, SubmitError> {
        let kind = self.save_kind();
        let request = self.submit()?;
        let response = match transport.execute(request) {
            Ok(response) => response,
            Err(err) => {
                let err = ApiError::from(err);
                self.fail(err.clone());
                return Err(err.into());
            }
        };
        Ok(self.resolve(kind, response)?)
    }

    fn resolve(&mut self, kind: SaveKind, response: HttpResponse) -> Result<Employee, ApiError> {
        let result = match kind {
            SaveKind::Create => self.client.parse_create_employee(response),
            SaveKind::Update(_) => self.client.parse_update_employee(response),
        };
        match result {
            Ok(saved) => {
                debug!(id = %saved.id, "saved");
                self.draft = EmployeeDraft::default();
                self.state = FormState::Editing;
                Ok(saved)
            }
            Err(err) => {
                self.fail(err.clone());
                Err(err)
            }
        }
    }
}
