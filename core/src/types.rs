//! Domain DTOs for the employee API.
//!
//! # Design
//! Three shapes of the same entity live here:
//! - `Employee` is a persisted record exactly as the server returns it.
//! - `EmployeeDraft` is what the form edits: every input is text, the way a
//!   controlled input holds it, plus the identifier when editing an existing
//!   record.
//! - `EmployeePayload` is the JSON body sent on create and update, produced
//!   from a draft once it has passed local validation.
//!
//! The mock-server crate defines its own copies of these types; integration
//! tests catch schema drift between the two.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned record identifier. Only persisted records carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EmployeeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A persisted employee record returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub position: String,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hired_date: String,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One editable input of the employee form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Position,
    Salary,
    HiredDate,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Position,
        Field::Salary,
        Field::HiredDate,
    ];

    /// The JSON field name, also used in validation messages.
    pub fn wire_name(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Position => "position",
            Field::Salary => "salary",
            Field::HiredDate => "hiredDate",
        }
    }

    /// Human label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::Email => "Email",
            Field::Position => "Position",
            Field::Salary => "Salary",
            Field::HiredDate => "Hired date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// The form's working copy of an employee. All inputs are held as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub id: Option<EmployeeId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
    pub salary: String,
    pub hired_date: String,
}

impl EmployeeDraft {
    /// A draft without an identifier has never been persisted.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Position => &self.position,
            Field::Salary => &self.salary,
            Field::HiredDate => &self.hired_date,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Position => &mut self.position,
            Field::Salary => &mut self.salary,
            Field::HiredDate => &mut self.hired_date,
        };
        *slot = value.into();
    }

    /// Convert to the request body. Salary text is coerced to a number; a
    /// blank or non-numeric salary becomes `null`.
    pub fn to_payload(&self) -> EmployeePayload {
        EmployeePayload {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            position: self.position.clone(),
            salary: parse_salary(&self.salary),
            hired_date: self.hired_date.clone(),
        }
    }
}

impl From<&Employee> for EmployeeDraft {
    fn from(employee: &Employee) -> Self {
        Self {
            id: Some(employee.id),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            position: employee.position.clone(),
            salary: employee.salary.map(|s| s.to_string()).unwrap_or_default(),
            hired_date: employee.hired_date.clone(),
        }
    }
}

impl From<Employee> for EmployeeDraft {
    fn from(employee: Employee) -> Self {
        Self::from(&employee)
    }
}

fn parse_salary(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|s| s.is_finite())
}

/// Request payload for creating or updating an employee.
///
/// `salary` is always present in the JSON, as `null` when absent, so the
/// server never sees zero or an empty string in its place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
    pub salary: Option<f64>,
    pub hired_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> Employee {
        Employee {
            id: EmployeeId(5),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
            position: "Engineer".to_string(),
            salary: Some(50000.0),
            hired_date: "2021-03-01".to_string(),
        }
    }

    #[test]
    fn employee_deserializes_camel_case() {
        let json = r#"{"id":5,"firstName":"Ann","lastName":"Lee","email":"ann@example.com",
            "position":"Engineer","salary":50000,"hiredDate":"2021-03-01"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee, ann());
    }

    #[test]
    fn employee_tolerates_null_and_missing_fields() {
        let json = r#"{"id":7,"firstName":"Bo","lastName":null,"salary":null,"extra":true}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, EmployeeId(7));
        assert_eq!(employee.last_name, "");
        assert_eq!(employee.position, "");
        assert!(employee.salary.is_none());
    }

    #[test]
    fn employee_without_id_is_rejected() {
        let result: Result<Employee, _> = serde_json::from_str(r#"{"firstName":"Ann"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn draft_from_record_keeps_identifier_and_formats_salary() {
        let draft = EmployeeDraft::from(&ann());
        assert_eq!(draft.id, Some(EmployeeId(5)));
        assert!(!draft.is_new());
        assert_eq!(draft.salary, "50000");
        assert_eq!(draft.get(Field::FirstName), "Ann");
    }

    #[test]
    fn default_draft_is_new_and_empty() {
        let draft = EmployeeDraft::default();
        assert!(draft.is_new());
        assert!(draft.is_empty());
    }

    #[test]
    fn empty_salary_serializes_as_null() {
        let mut draft = EmployeeDraft::default();
        draft.set(Field::FirstName, "Ann");
        let json = serde_json::to_value(draft.to_payload()).unwrap();
        assert!(json["salary"].is_null());
        assert!(json.get("id").is_none());
        assert_eq!(json["firstName"], "Ann");
    }

    #[test]
    fn salary_text_is_coerced_to_number() {
        let mut draft = EmployeeDraft::default();
        draft.set(Field::Salary, "61250.5");
        assert_eq!(draft.to_payload().salary, Some(61250.5));

        draft.set(Field::Salary, "   ");
        assert_eq!(draft.to_payload().salary, None);

        draft.set(Field::Salary, "lots");
        assert_eq!(draft.to_payload().salary, None);
    }

    #[test]
    fn payload_carries_identifier_for_updates() {
        let payload = EmployeeDraft::from(&ann()).to_payload();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["salary"], 50000.0);
        assert_eq!(json["hiredDate"], "2021-03-01");
    }

    #[test]
    fn every_field_has_a_wire_name_and_label() {
        let labels: Vec<&str> = Field::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(
            labels,
            vec!["First name", "Last name", "Email", "Position", "Salary", "Hired date"]
        );
        assert_eq!(Field::HiredDate.to_string(), "hiredDate");
    }
}
