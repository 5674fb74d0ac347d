use domain::*;
use infrastructure::*;
use std::sync::Arc;
use tracing::{info, warn};

/// Nexus Application - wires the listing services to their stores
pub struct NexusApp {
    pub project_query_service: ProjectQueryService,
    pub like_service: LikeService,
    pub project_service: ProjectService,
    pub user_service: UserService,
}

impl NexusApp {
    pub fn new(database_path: &str) -> Result<Self, DomainError> {
        Self::new_with_config(database_path, DEFAULT_MAX_PAGE_SIZE, None)
    }

    pub fn new_with_config(
        database_path: &str,
        max_page_size: u32,
        cloudinary: Option<CloudinaryConfig>,
    ) -> Result<Self, DomainError> {
        // Infrastructure layer - database setup
        let database = Database::new(database_path)?;
        let pool = database.get_pool().clone();

        let project_repository: Arc<dyn ProjectRepository> =
            Arc::new(SqliteProjectRepository::new(pool.clone()));
        let user_repository: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool));

        let image_host: Arc<dyn ImageHost> = match cloudinary {
            Some(config) => {
                info!(cloud_name = %config.cloud_name, "Poster uploads go to Cloudinary");
                Arc::new(CloudinaryImageHost::new(config)?)
            }
            None => {
                warn!("Image hosting is not configured, poster uploads are disabled");
                Arc::new(DisabledImageHost)
            }
        };

        // Domain services
        let project_query_service = ProjectQueryService::new(
            project_repository.clone(),
            user_repository.clone(),
            max_page_size,
        );
        let like_service = LikeService::new(project_repository.clone());
        let project_service = ProjectService::new(project_repository, image_host);
        let user_service = UserService::new(user_repository);

        Ok(Self {
            project_query_service,
            like_service,
            project_service,
            user_service,
        })
    }

    /// Share a project and read it back with the author profile attached.
    pub async fn share_project(
        &self,
        current_user: &CurrentUser,
        draft: ProjectDraft,
    ) -> Result<ProjectWithAuthor, DomainError> {
        let project = self.project_service.create_project(current_user, draft).await?;
        self.project_query_service
            .get_project_with_author(&project.id)
            .await
    }
}
