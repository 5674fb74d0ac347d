use crate::entities::{CurrentUser, Project, ProjectDraft};
use crate::errors::DomainError;
use crate::ports::{ImageHost, ImageUpload, UploadedImage};
use crate::repositories::ProjectRepository;
use std::sync::Arc;
use tracing::{info, warn};

/// Write side of the listings: share, edit, delete, plus poster uploads.
pub struct ProjectService {
    project_repository: Arc<dyn ProjectRepository>,
    image_host: Arc<dyn ImageHost>,
}

impl ProjectService {
    pub fn new(
        project_repository: Arc<dyn ProjectRepository>,
        image_host: Arc<dyn ImageHost>,
    ) -> Self {
        Self {
            project_repository,
            image_host,
        }
    }

    /// Create a project from a draft whose poster was already uploaded.
    pub async fn create_project(
        &self,
        current_user: &CurrentUser,
        draft: ProjectDraft,
    ) -> Result<Project, DomainError> {
        let author_id = current_user.require("create a project")?;
        let category = draft.validate()?;
        let poster = draft
            .poster_image()
            .ok_or_else(|| DomainError::ValidationError("Please provide a poster image!".to_string()))?
            .to_string();

        let project = Project::new(author_id.to_string(), &draft, category, poster);
        let saved = self.project_repository.save(&project).await?;
        info!(project_id = %saved.id, author_id, "Project shared");
        Ok(saved)
    }

    /// Upload the poster, then create. The upload is rolled back when the
    /// project cannot be stored.
    pub async fn create_project_with_upload(
        &self,
        current_user: &CurrentUser,
        mut draft: ProjectDraft,
        poster: ImageUpload,
    ) -> Result<Project, DomainError> {
        current_user.require("create a project")?;
        draft.validate()?;

        let uploaded = self.upload_image(current_user, poster).await?;
        draft.poster_image = Some(uploaded.url.clone());

        match self.create_project(current_user, draft).await {
            Ok(project) => Ok(project),
            Err(e) => {
                self.discard_upload(&uploaded).await;
                Err(e)
            }
        }
    }

    /// Owner-only edit. Identity, owner, likes and creation time are kept.
    pub async fn update_project(
        &self,
        current_user: &CurrentUser,
        project_id: &str,
        draft: ProjectDraft,
    ) -> Result<Project, DomainError> {
        let user_id = current_user.require("edit a project")?;
        let category = draft.validate()?;

        let mut project = self.owned_project(user_id, project_id).await?;
        project.apply_edit(&draft, category);

        let updated = self.project_repository.update(&project).await?;
        info!(project_id, user_id, "Project updated");
        Ok(updated)
    }

    pub async fn update_project_with_upload(
        &self,
        current_user: &CurrentUser,
        project_id: &str,
        mut draft: ProjectDraft,
        poster: ImageUpload,
    ) -> Result<Project, DomainError> {
        let user_id = current_user.require("edit a project")?;
        draft.validate()?;
        self.owned_project(user_id, project_id).await?;

        let uploaded = self.upload_image(current_user, poster).await?;
        draft.poster_image = Some(uploaded.url.clone());

        match self.update_project(current_user, project_id, draft).await {
            Ok(project) => Ok(project),
            Err(e) => {
                self.discard_upload(&uploaded).await;
                Err(e)
            }
        }
    }

    pub async fn delete_project(
        &self,
        current_user: &CurrentUser,
        project_id: &str,
    ) -> Result<(), DomainError> {
        let user_id = current_user.require("delete a project")?;
        self.owned_project(user_id, project_id).await?;

        self.project_repository.delete(project_id).await?;
        info!(project_id, user_id, "Project deleted");
        Ok(())
    }

    pub async fn upload_image(
        &self,
        current_user: &CurrentUser,
        image: ImageUpload,
    ) -> Result<UploadedImage, DomainError> {
        current_user.require("upload an image")?;
        image.validate()?;

        let file_name = image.file_name.clone();
        let uploaded = self.image_host.upload(image).await?;
        info!(file_name = %file_name, public_id = %uploaded.public_id, "Poster uploaded");
        Ok(uploaded)
    }

    async fn owned_project(&self, user_id: &str, project_id: &str) -> Result<Project, DomainError> {
        let project = self
            .project_repository
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| DomainError::ProjectNotFound(project_id.to_string()))?;

        if !project.is_owned_by(user_id) {
            warn!(project_id, user_id, "Rejected change to a project owned by someone else");
            return Err(DomainError::Forbidden(
                "Only the author can change this project".to_string(),
            ));
        }
        Ok(project)
    }

    async fn discard_upload(&self, uploaded: &UploadedImage) {
        if let Err(e) = self.image_host.delete(&uploaded.public_id).await {
            warn!(public_id = %uploaded.public_id, error = %e, "Could not remove orphaned poster");
        } else {
            warn!(public_id = %uploaded.public_id, "Removed poster of a project that failed to save");
        }
    }
}
