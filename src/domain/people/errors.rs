//! People CRM errors.

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeopleError {
    /// No profile exists for this user.
    NotFound(UserId),

    /// Request field failed validation.
    ValidationFailed { field: String, message: String },

    /// Storage failure.
    Infrastructure(String),

    /// A visitor lead could not be stored.
    SubmissionFailed(String),
}

impl PeopleError {
    pub fn not_found(user_id: UserId) -> Self {
        PeopleError::NotFound(user_id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PeopleError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PeopleError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PeopleError::NotFound(_) => ErrorCode::ProfileNotFound,
            PeopleError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            PeopleError::Infrastructure(_) | PeopleError::SubmissionFailed(_) => {
                ErrorCode::DatabaseError
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            PeopleError::NotFound(_) => "Person not found.".to_string(),
            PeopleError::ValidationFailed { message, .. } => message.clone(),
            PeopleError::Infrastructure(_) => "Unable to update this person right now.".to_string(),
            PeopleError::SubmissionFailed(_) => {
                "Unable to submit right now. Please try again.".to_string()
            }
        }
    }
}

impl std::fmt::Display for PeopleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PeopleError {}

impl From<DomainError> for PeopleError {
    fn from(err: DomainError) -> Self {
        PeopleError::Infrastructure(err.to_string())
    }
}

impl From<ValidationError> for PeopleError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        PeopleError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}
