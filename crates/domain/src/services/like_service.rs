use crate::entities::{CurrentUser, LikeStatus};
use crate::errors::DomainError;
use crate::repositories::ProjectRepository;
use std::sync::Arc;
use tracing::{info, warn};

pub struct LikeService {
    project_repository: Arc<dyn ProjectRepository>,
}

impl LikeService {
    pub fn new(project_repository: Arc<dyn ProjectRepository>) -> Self {
        Self { project_repository }
    }

    /// Likes the project for the signed-in user, or removes an existing like.
    ///
    /// The membership check and counter update happen in the repository as a
    /// single atomic step, so concurrent toggles by different users are never lost.
    pub async fn toggle_like(
        &self,
        current_user: &CurrentUser,
        project_id: &str,
    ) -> Result<LikeStatus, DomainError> {
        let user_id = current_user.require("like a project")?;

        match self.project_repository.toggle_like(project_id, user_id).await {
            Ok(Some(status)) => {
                info!(
                    project_id,
                    user_id,
                    is_liked = status.is_liked,
                    like_count = status.like_count,
                    "Toggled project like"
                );
                Ok(status)
            }
            Ok(None) => Err(DomainError::ProjectNotFound(project_id.to_string())),
            Err(e) => {
                warn!(project_id, user_id, error = %e, "Like toggle failed");
                Err(e)
            }
        }
    }
}
