//! The employee management screen: a create form above the record list.
//!
//! The page owns both components and tags every request it hands out with
//! the component waiting for the answer, so a host can run requests in any
//! order and route each response back with `handle`.

use tracing::debug;

use crate::client::EmployeeClient;
use crate::form::{EmployeeForm, SubmitError};
use crate::http::{HttpRequest, HttpResponse};
use crate::list::EmployeeList;
use crate::transport::{Transport, TransportError};
use crate::types::EmployeeId;

pub const TITLE: &str = "Employee Management";

/// Which component a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    ListLoad,
    CreateSave,
    EditSave,
}

/// A request together with the component that awaits its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub target: Target,
    pub request: HttpRequest,
}

impl PageRequest {
    fn new(target: Target, request: HttpRequest) -> Self {
        Self { target, request }
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    create_form: EmployeeForm,
    list: EmployeeList,
}

impl Page {
    /// Build the page and the list's initial fetch.
    pub fn mount(client: EmployeeClient) -> (Self, PageRequest) {
        let (list, request) = EmployeeList::mount(client.clone());
        let page = Self {
            create_form: EmployeeForm::new(client),
            list,
        };
        (page, PageRequest::new(Target::ListLoad, request))
    }

    pub fn create_form(&self) -> &EmployeeForm {
        &self.create_form
    }

    pub fn create_form_mut(&mut self) -> &mut EmployeeForm {
        &mut self.create_form
    }

    pub fn list(&self) -> &EmployeeList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut EmployeeList {
        &mut self.list
    }

    pub fn reload(&mut self) -> PageRequest {
        PageRequest::new(Target::ListLoad, self.list.reload())
    }

    pub fn select(&mut self, id: EmployeeId) -> bool {
        self.list.select_id(id)
    }

    pub fn cancel_edit(&mut self) {
        self.list.cancel_edit();
    }

    pub fn submit_create(&mut self) -> Result<PageRequest, SubmitError> {
        let request = self.create_form.submit()?;
        Ok(PageRequest::new(Target::CreateSave, request))
    }

    /// Submit the list's edit form. `None` when nothing is selected.
    pub fn submit_edit(&mut self) -> Option<Result<PageRequest, SubmitError>> {
        let form = self.list.form_mut()?;
        Some(
            form.submit()
                .map(|request| PageRequest::new(Target::EditSave, request)),
        )
    }

    /// Route `response` to `target`. Returns the follow-up request, which is
    /// always a list reload after a successful save.
    pub fn handle(&mut self, target: Target, response: HttpResponse) -> Option<PageRequest> {
        debug!(?target, status = response.status, "routing response");
        let reload = match target {
            Target::ListLoad => {
                self.list.complete_load(response);
                None
            }
            Target::CreateSave => {
                let saved = self.create_form.complete(response)?;
                debug!(id = %saved.id, "employee created");
                // A row edit in progress is unrelated to the new record.
                Some(self.list.reload())
            }
            Target::EditSave => self.list.complete_save(response),
        };
        reload.map(|request| PageRequest::new(Target::ListLoad, request))
    }

    /// Route a request that never got a response.
    pub fn handle_failure(&mut self, target: Target, err: TransportError) {
        match target {
            Target::ListLoad => self.list.fail_load(err.into()),
            Target::CreateSave => self.create_form.fail(err.into()),
            Target::EditSave => self.list.fail_save(err.into()),
        }
    }

    /// Execute `request` and every follow-up it causes, one after another.
    pub fn run<T: Transport + ?Sized>(&mut self, request: PageRequest, transport: &T) {
        let mut next = Some(request);
        while let Some(PageRequest { target, request }) = next.take() {
            next = match transport.execute(request) {
                Ok(response) => self.handle(target, response),
                Err(err) => {
                    self.handle_failure(target, err);
                    None
                }
            };
        }
    }
}
