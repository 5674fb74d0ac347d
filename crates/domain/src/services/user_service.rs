use crate::entities::{CurrentUser, User};
use crate::repositories::UserRepository;
use crate::errors::DomainError;
use std::sync::Arc;
use tracing::info;

/// User Service - profile records for identities issued by the auth provider
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Create the profile of the signed-in identity
    pub async fn register_profile(
        &self,
        current_user: &CurrentUser,
        name: String,
        email: String,
        image: Option<String>,
    ) -> Result<User, DomainError> {
        let user_id = current_user.require("create a profile")?;
        let user = User::new(user_id.to_string(), name.trim().to_string(), email.trim().to_string(), image);

        user.validate()?;

        if self.user_repository.find_by_id(&user.id).await?.is_some() {
            return Err(DomainError::ValidationError("Profile already exists".to_string()));
        }

        if self.user_repository.find_by_email(&user.email).await?.is_some() {
            return Err(DomainError::EmailAlreadyExists(user.email));
        }

        let saved = self.user_repository.save(&user).await?;
        info!(user_id = %saved.id, "Profile registered");
        Ok(saved)
    }

    /// Get user by ID
    pub async fn get_user(&self, id: &str) -> Result<User, DomainError> {
        match self.user_repository.find_by_id(id).await? {
            Some(user) => Ok(user),
            None => Err(DomainError::UserNotFound(id.to_string())),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.user_repository.find_by_email(email.trim()).await
    }

    pub async fn count_users(&self) -> Result<u64, DomainError> {
        self.user_repository.count().await
    }
}
