use serde::{Deserialize, Serialize};

/// Profile record of someone known to the auth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}

impl User {
    pub fn new(id: String, name: String, email: String, image: Option<String>) -> Self {
        Self {
            id,
            name,
            email,
            image,
        }
    }

    pub fn validate(&self) -> Result<(), crate::DomainError> {
        if self.id.trim().is_empty() {
            return Err(crate::DomainError::ValidationError("User id cannot be empty".to_string()));
        }

        if self.name.trim().is_empty() {
            return Err(crate::DomainError::ValidationError("Name is required".to_string()));
        }

        if self.email.trim().is_empty() {
            return Err(crate::DomainError::ValidationError("Email is required".to_string()));
        }

        if !self.email.contains('@') {
            return Err(crate::DomainError::ValidationError("Invalid email format".to_string()));
        }

        Ok(())
    }
}

/// Identity attached to the current request, as reported by the auth provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentUser(Option<String>);

impl CurrentUser {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self(Some(user_id.into()))
    }

    pub fn id(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Returns the user id, or `Unauthorized` with `action` in the message.
    pub fn require(&self, action: &str) -> Result<&str, crate::DomainError> {
        self.id().ok_or_else(|| {
            crate::DomainError::Unauthorized(format!("Please sign in to {}!", action))
        })
    }
}
