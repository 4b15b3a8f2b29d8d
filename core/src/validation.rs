//! Client-side length checks run before any request is issued.
//!
//! Only three inputs are length-limited. The server still enforces its own
//! rules; these exist so an obviously oversized draft never leaves the form.

use crate::types::{EmployeeDraft, Field};

/// Length limits in characters, in the order they are checked.
pub const MAX_LENGTHS: [(Field, usize); 3] = [
    (Field::FirstName, 900),
    (Field::LastName, 150),
    (Field::Position, 200),
];

/// Maximum length of `field`, if it has one.
pub fn max_length(field: Field) -> Option<usize> {
    MAX_LENGTHS
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, max)| *max)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be at most {max} characters")]
    TooLong { field: Field, max: usize },
}

/// Check `draft` against the length limits. Stops at the first violation.
pub fn validate(draft: &EmployeeDraft) -> Result<(), ValidationError> {
    for (field, max) in MAX_LENGTHS {
        if draft.get(field).chars().count() > max {
            return Err(ValidationError::TooLong { field, max });
        }
    }
    Ok(())
}
