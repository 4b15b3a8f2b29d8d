//! The employee table and its edit selection.
//!
//! # Design
//! The list never patches its rows locally. Every successful save, whether
//! from its own edit form or from elsewhere, ends in a full reload so the
//! table always shows what the server returned last.

use tracing::{debug, warn};

use crate::client::EmployeeClient;
use crate::error::ApiError;
use crate::form::{EmployeeForm, SubmitError};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Employee, EmployeeId};

/// Load status of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Loaded,
    Error(String),
}

/// One table row, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub position: String,
    pub salary: String,
    pub hired: String,
}

impl From<&Employee> for Row {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.full_name(),
            email: employee.email.clone(),
            position: employee.position.clone(),
            salary: employee.salary.map(|s| s.to_string()).unwrap_or_default(),
            hired: employee.hired_date.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmployeeList {
    client: EmployeeClient,
    employees: Vec<Employee>,
    state: ListState,
    editing: Option<Employee>,
    // Outlives the selection so a save still in flight after a cancel or a
    // reselect resolves here and still triggers its reload.
    editor: EmployeeForm,
}

impl EmployeeList {
    /// Create the list in `Loading` along with the initial fetch.
    pub fn mount(client: EmployeeClient) -> (Self, HttpRequest) {
        let mut list = Self {
            editor: EmployeeForm::new(client.clone()),
            client,
            employees: Vec::new(),
            state: ListState::Loading,
            editing: None,
        };
        let request = list.reload();
        (list, request)
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ListState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ListState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Records from the last successful load, in server order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn rows(&self) -> Vec<Row> {
        self.employees.iter().map(Row::from).collect()
    }

    /// Enter `Loading`, dropping any previous error, and return the fetch.
    pub fn reload(&mut self) -> HttpRequest {
        debug!("reloading employees");
        self.state = ListState::Loading;
        self.client.build_list_employees()
    }

    /// Apply the response to a fetch from `mount` or `reload`.
    pub fn complete_load(&mut self, response: HttpResponse) {
        match self.client.parse_list_employees(response) {
            Ok(employees) => {
                debug!(count = employees.len(), "employees loaded");
                self.employees = employees;
                self.state = ListState::Loaded;
            }
            Err(err) => self.fail_load(err),
        }
    }

    pub fn fail_load(&mut self, err: ApiError) {
        warn!(error = %err, "loading employees failed");
        self.state = ListState::Error(err.message());
    }

    /// Reload through `transport`, blocking until the list settles.
    pub fn refresh<T: Transport + ?Sized>(&mut self, transport: &T) {
        let request = self.reload();
        match transport.execute(request) {
            Ok(response) => self.complete_load(response),
            Err(err) => self.fail_load(err.into()),
        }
    }

    /// The record currently being edited.
    pub fn editing(&self) -> Option<&Employee> {
        self.editing.as_ref()
    }

    /// The edit form, shown only while a record is selected.
    pub fn form(&self) -> Option<&EmployeeForm> {
        self.editing.as_ref().map(|_| &self.editor)
    }

    pub fn form_mut(&mut self) -> Option<&mut EmployeeForm> {
        self.editing.as_ref()?;
        Some(&mut self.editor)
    }

    /// Whether an edit save is still waiting for its response, selected or
    /// not.
    pub fn save_pending(&self) -> bool {
        self.editor.is_submitting()
    }

    /// Start editing `record`. The rows are left as they are.
    pub fn select(&mut self, record: Employee) {
        debug!(id = %record.id, "editing employee");
        self.editor.load(Some(&record));
        self.editing = Some(record);
    }

    /// Start editing the loaded record with `id`. Returns `false` when no
    /// such row is loaded.
    pub fn select_id(&mut self, id: EmployeeId) -> bool {
        match self.employees.iter().find(|e| e.id == id).cloned() {
            Some(record) => {
                self.select(record);
                true
            }
            None => false,
        }
    }

    /// Drop the selection. A pending save is not aborted.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.editor.load(None);
    }

    /// React to a successful save of the edit form: clear the selection and
    /// return the reload request.
    pub fn saved(&mut self, saved: &Employee) -> HttpRequest {
        debug!(id = %saved.id, "employee saved");
        self.editing = None;
        self.reload()
    }

    /// Hand the edit form its save response. Returns the reload request when
    /// the save went through, even if the selection changed meanwhile.
    pub fn complete_save(&mut self, response: HttpResponse) -> Option<HttpRequest> {
        let saved = self.editor.complete(response)?;
        Some(self.saved(&saved))
    }

    /// The edit save never got a response.
    pub fn fail_save(&mut self, err: ApiError) {
        self.editor.fail(err);
    }

    /// Save the edit form and reload through `transport`. Without a
    /// selection this is a no-op returning `Ok(None)`.
    pub fn save_edit<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
    ) -> Result<Option<Employee>, SubmitError> {
        if self.editing.is_none() {
            return Ok(None);
        }
        let saved = self.editor.save(transport)?;
        self.editing = None;
        self.refresh(transport);
        Ok(Some(saved))
    }
}
