use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Project not found with id: {0}")]
    ProjectNotFound(String),

    #[error("User not found with id: {0}")]
    UserNotFound(String),

    #[error("Email already in use: {0}")]
    EmailAlreadyExists(String),

    #[error("Sign in required: {0}")]
    Unauthorized(String),

    #[error("Not allowed: {0}")]
    Forbidden(String),

    #[error("Query failed: {0}")]
    QueryFailure(String),

    #[error("Write failed: {0}")]
    WriteFailure(String),

    #[error("Upstream service failed: {0}")]
    UpstreamFailure(String),
}

impl DomainError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::ProjectNotFound(_) | DomainError::UserNotFound(_)
        )
    }

    /// Message safe to show to the person who triggered the operation.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::ValidationError(msg) => msg.clone(),
            DomainError::ProjectNotFound(_) => "Project not found".to_string(),
            DomainError::UserNotFound(_) => "User not found".to_string(),
            DomainError::EmailAlreadyExists(_) => "Email already in use!".to_string(),
            DomainError::Unauthorized(msg) | DomainError::Forbidden(msg) => msg.clone(),
            DomainError::QueryFailure(_) => "Couldn't fetch data, please try again".to_string(),
            DomainError::WriteFailure(_) => "Couldn't save changes, please try again".to_string(),
            DomainError::UpstreamFailure(_) => "An external service failed, please try again".to_string(),
        }
    }
}
