use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

mod config;

pub use config::{Config, ConfigError};

const MAX_FIRST_NAME: usize = 900;
const MAX_LAST_NAME: usize = 150;
const MAX_POSITION: usize = 200;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
    pub salary: Option<f64>,
    pub hired_date: String,
}

/// Body of a create or update. Any `id` in the body is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub hired_date: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("employee not found")]
    NotFound,

    #[error("{0}")]
    Invalid(String),

    #[error("duplicate email")]
    DuplicateEmail,
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match self {
            StoreError::NotFound => StatusCode::NOT_FOUND,
            StoreError::Invalid(_) => StatusCode::BAD_REQUEST,
            StoreError::DuplicateEmail => StatusCode::CONFLICT,
        };
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

/// In-memory records in insertion order.
#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    employees: Vec<Employee>,
}

impl Store {
    pub fn list(&self) -> &[Employee] {
        &self.employees
    }

    pub fn get(&self, id: u64) -> Result<&Employee, StoreError> {
        self.employees
            .iter()
            .find(|e| e.id == id)
            .ok_or(StoreError::NotFound)
    }

    pub fn create(&mut self, input: EmployeeInput) -> Result<Employee, StoreError> {
        self.check(&input, None)?;
        self.next_id += 1;
        let employee = build(self.next_id, input);
        self.employees.push(employee.clone());
        Ok(employee)
    }

    pub fn update(&mut self, id: u64, input: EmployeeInput) -> Result<Employee, StoreError> {
        self.get(id)?;
        self.check(&input, Some(id))?;
        let slot = self
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StoreError::NotFound)?;
        *slot = build(id, input);
        Ok(slot.clone())
    }

    fn check(&self, input: &EmployeeInput, id: Option<u64>) -> Result<(), StoreError> {
        let required = [
            ("firstName", &input.first_name),
            ("lastName", &input.last_name),
            ("email", &input.email),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(StoreError::Invalid(format!("{name} is required")));
            }
        }
        let limited = [
            ("firstName", input.first_name.as_str(), MAX_FIRST_NAME),
            ("lastName", input.last_name.as_str(), MAX_LAST_NAME),
            ("position", input.position.as_deref().unwrap_or_default(), MAX_POSITION),
        ];
        for (name, value, max) in limited {
            if value.chars().count() > max {
                return Err(StoreError::Invalid(format!(
                    "{name} must be at most {max} characters"
                )));
            }
        }
        let taken = self
            .employees
            .iter()
            .any(|e| Some(e.id) != id && e.email.eq_ignore_ascii_case(input.email.trim()));
        if taken {
            return Err(StoreError::DuplicateEmail);
        }
        Ok(())
    }
}

fn build(id: u64, input: EmployeeInput) -> Employee {
    Employee {
        id,
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email.trim().to_string(),
        position: input.position.unwrap_or_default(),
        salary: input.salary,
        hired_date: input.hired_date.unwrap_or_default(),
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/employees", get(list_employees).post(create_employee))
        .route("/api/employees/{id}", get(get_employee).put(update_employee))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_employees(State(db): State<Db>) -> Json<Vec<Employee>> {
    Json(db.read().await.list().to_vec())
}

async fn create_employee(
    State(db): State<Db>,
    Json(input): Json<EmployeeInput>,
) -> Result<(StatusCode, Json<Employee>), StoreError> {
    let employee = db.write().await.create(input)?;
    info!(id = employee.id, "employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn get_employee(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Employee>, StoreError> {
    db.read().await.get(id).cloned().map(Json)
}

async fn update_employee(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<EmployeeInput>,
) -> Result<Json<Employee>, StoreError> {
    let employee = db.write().await.update(id, input)?;
    info!(id, "employee updated");
    Ok(Json(employee))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(first: &str, email: &str) -> EmployeeInput {
        serde_json::from_value(serde_json::json!({
            "firstName": first,
            "lastName": "Lee",
            "email": email,
        }))
        .unwrap()
    }

    #[test]
    fn employee_serializes_camel_case() {
        let employee = Employee {
            id: 1,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
            position: String::new(),
            salary: None,
            hired_date: "2021-03-01".to_string(),
        };
        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["firstName"], "Ann");
        assert_eq!(json["hiredDate"], "2021-03-01");
        assert!(json["salary"].is_null());
    }

    #[test]
    fn input_tolerates_nulls_and_ignores_id() {
        let input: EmployeeInput = serde_json::from_str(
            r#"{"id":99,"firstName":"Ann","lastName":"Lee","email":"a@x","position":null,"salary":null}"#,
        )
        .unwrap();
        assert!(input.position.is_none());
        assert!(input.salary.is_none());
    }

    #[test]
    fn ids_are_sequential_and_order_is_kept() {
        let mut store = Store::default();
        let a = store.create(input("Ann", "ann@example.com")).unwrap();
        let b = store.create(input("Bo", "bo@example.com")).unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        let names: Vec<&str> = store.list().iter().map(|e| e.first_name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Bo"]);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let mut store = Store::default();
        store.create(input("Ann", "ann@example.com")).unwrap();
        let err = store.create(input("Other", "ANN@example.com")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[test]
    fn update_may_keep_own_email() {
        let mut store = Store::default();
        let ann = store.create(input("Ann", "ann@example.com")).unwrap();
        let updated = store.update(ann.id, input("Anne", "ann@example.com")).unwrap();
        assert_eq!(updated.first_name, "Anne");
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn required_and_length_rules() {
        let mut store = Store::default();
        let err = store.create(input("", "x@example.com")).unwrap_err();
        assert_eq!(err.to_string(), "firstName is required");

        let mut long = input("Ann", "ann@example.com");
        long.position = Some("p".repeat(201));
        let err = store.create(long).unwrap_err();
        assert_eq!(err.to_string(), "position must be at most 200 characters");
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = Store::default();
        let err = store.update(7, input("Ann", "ann@example.com")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
