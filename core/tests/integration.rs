//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port and drives the API, the form, the
//! list and the page over real HTTP with `UreqTransport`. Validates request
//! building and response parsing against the actual server schema.

use employee_core::{
    ApiError, EmployeeApi, EmployeeClient, EmployeeForm, EmployeeId, EmployeeList, Field,
    ListState, Page, SubmitError, Transport, UreqTransport,
};

/// Start a mock server on a random port and return its base URL.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn fill(form: &mut EmployeeForm, first: &str, last: &str, email: &str) {
    form.set_field(Field::FirstName, first);
    form.set_field(Field::LastName, last);
    form.set_field(Field::Email, email);
}

#[test]
fn api_lifecycle() {
    let api = EmployeeApi::connect(&spawn_server());

    // Step 1: list — should be empty.
    assert!(api.list_employees().unwrap().is_empty());

    // Step 2: create through a form draft with no salary.
    let mut form = EmployeeForm::new(api.client().clone());
    fill(&mut form, "Ann", "Lee", "ann@example.com");
    form.set_field(Field::HiredDate, "2021-03-01");
    let created = api.create_employee(&form.draft().to_payload()).unwrap();
    assert_eq!(created.first_name, "Ann");
    assert!(created.salary.is_none());

    // Step 3: get.
    let fetched = api.get_employee(created.id).unwrap();
    assert_eq!(fetched, created);

    // Step 4: duplicate email surfaces the server message.
    let err = api.create_employee(&form.draft().to_payload()).unwrap_err();
    assert_eq!(err.message(), "duplicate email");

    // Step 5: update salary.
    let mut draft = employee_core::EmployeeDraft::from(&created);
    draft.set(Field::Salary, "72000");
    let updated = api.update_employee(created.id, &draft.to_payload()).unwrap();
    assert_eq!(updated.salary, Some(72000.0));

    // Step 6: missing records.
    let err = api.get_employee(EmployeeId(404)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound { status: 404 }));
    let err = api
        .update_employee(EmployeeId(404), &draft.to_payload())
        .unwrap_err();
    assert_eq!(err.message(), "employee not found");
}

#[test]
fn list_edit_cycle_reloads_from_server() {
    let base = spawn_server();
    let transport = UreqTransport::new();
    let api = EmployeeApi::connect(&base);

    let mut seed = EmployeeForm::new(EmployeeClient::new(&base));
    fill(&mut seed, "Ann", "Lee", "ann@example.com");
    let ann = seed.save(&transport).unwrap();
    fill(&mut seed, "Bo", "Park", "bo@example.com");
    seed.save(&transport).unwrap();

    let (mut list, initial) = EmployeeList::mount(EmployeeClient::new(&base));
    list.complete_load(transport.execute(initial).unwrap());
    assert_eq!(list.state(), &ListState::Loaded);
    assert_eq!(list.rows().len(), 2);

    // Select then cancel: rows untouched.
    let before = list.rows();
    assert!(list.select_id(ann.id));
    list.cancel_edit();
    assert!(list.editing().is_none());
    assert_eq!(list.rows(), before);

    // Edit and save: the list re-fetches.
    assert!(list.select_id(ann.id));
    list.form_mut()
        .unwrap()
        .set_field(Field::Position, "Lead");
    let saved = list.save_edit(&transport).unwrap().unwrap();
    assert_eq!(saved.id, ann.id);
    assert!(list.editing().is_none());
    assert_eq!(list.employees()[0].position, "Lead");
    assert_eq!(api.get_employee(ann.id).unwrap().position, "Lead");
}

#[test]
fn form_errors_from_server_and_locally() {
    let base = spawn_server();
    let transport = UreqTransport::new();

    let mut form = EmployeeForm::new(EmployeeClient::new(&base));
    fill(&mut form, "Ann", "Lee", "ann@example.com");
    form.save(&transport).unwrap();

    fill(&mut form, "Ann", "Again", "ann@example.com");
    let err = form.save(&transport).unwrap_err();
    assert!(matches!(err, SubmitError::Api(ApiError::Rejected { status: 409, .. })));
    assert_eq!(form.error(), Some("duplicate email"));
    assert_eq!(form.draft().last_name, "Again");

    form.set_field(Field::FirstName, "x".repeat(901));
    let err = form.save(&transport).unwrap_err();
    assert!(matches!(err, SubmitError::Invalid(_)));
    assert_eq!(form.error(), Some("firstName must be at most 900 characters"));
}

#[test]
fn page_create_refreshes_list() {
    let base = spawn_server();
    let transport = UreqTransport::new();

    let (mut page, initial) = Page::mount(EmployeeClient::new(&base));
    page.run(initial, &transport);
    assert!(page.list().employees().is_empty());

    fill(page.create_form_mut(), "Cy", "Ng", "cy@example.com");
    let request = page.submit_create().unwrap();
    page.run(request, &transport);

    assert!(page.create_form().is_idle());
    assert_eq!(page.list().rows()[0].name, "Cy Ng");
}

#[test]
fn unreachable_server_is_reported() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = EmployeeApi::connect(&format!("http://{addr}"));
    let err = api.list_employees().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
