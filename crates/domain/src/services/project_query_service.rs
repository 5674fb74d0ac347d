use crate::entities::{PageRequest, Project, ProjectFilter, ProjectPage, ProjectQuery, ProjectWithAuthor};
use crate::errors::DomainError;
use crate::repositories::{ProjectRepository, UserRepository};
use std::sync::Arc;
use tracing::{debug, error};

pub const DEFAULT_MAX_PAGE_SIZE: u32 = 50;

/// Read side of the project listings: filtered pages, detail views and the
/// per-author strip shown next to a project.
pub struct ProjectQueryService {
    project_repository: Arc<dyn ProjectRepository>,
    user_repository: Arc<dyn UserRepository>,
    max_page_size: u32,
}

impl ProjectQueryService {
    pub fn new(
        project_repository: Arc<dyn ProjectRepository>,
        user_repository: Arc<dyn UserRepository>,
        max_page_size: u32,
    ) -> Self {
        Self {
            project_repository,
            user_repository,
            max_page_size,
        }
    }

    /// One page of listings, newest first, with the count for the same filter.
    pub async fn list(
        &self,
        page: u32,
        page_size: u32,
        filter: ProjectFilter,
    ) -> Result<ProjectPage, DomainError> {
        let request = PageRequest::new(page, page_size, self.max_page_size)?;
        self.page_of(ProjectQuery::from(filter), request).await
    }

    /// Same contract as [`list`](Self::list), restricted to one author.
    pub async fn list_by_author(
        &self,
        author_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ProjectPage, DomainError> {
        if author_id.trim().is_empty() {
            return Err(DomainError::ValidationError("userId is required".to_string()));
        }
        let request = PageRequest::new(page, page_size, self.max_page_size)?;
        self.page_of(ProjectQuery::Author(author_id.to_string()), request)
            .await
    }

    pub async fn get_project(&self, project_id: &str) -> Result<Project, DomainError> {
        match self.project_repository.find_by_id(project_id).await? {
            Some(project) => Ok(project),
            None => Err(DomainError::ProjectNotFound(project_id.to_string())),
        }
    }

    pub async fn get_project_with_author(
        &self,
        project_id: &str,
    ) -> Result<ProjectWithAuthor, DomainError> {
        let project = self.get_project(project_id).await?;
        let author = self
            .user_repository
            .find_by_id(&project.author_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(project.author_id.clone()))?;

        Ok(ProjectWithAuthor { project, author })
    }

    /// First page of the author's other projects.
    pub async fn related_projects(
        &self,
        project_id: &str,
        limit: u32,
    ) -> Result<Vec<Project>, DomainError> {
        let project = self.get_project(project_id).await?;
        let page = self.list_by_author(&project.author_id, 1, limit).await?;

        Ok(page
            .items
            .into_iter()
            .filter(|other| other.id != project.id)
            .collect())
    }

    async fn page_of(
        &self,
        query: ProjectQuery,
        request: PageRequest,
    ) -> Result<ProjectPage, DomainError> {
        let repository = &self.project_repository;
        let result = tokio::try_join!(
            repository.count(&query),
            repository.find_many(&query, request.skip(), request.take()),
        );

        match result {
            Ok((total_count, items)) => {
                debug!(
                    ?query,
                    page = request.page,
                    returned = items.len(),
                    total_count,
                    "Listed projects"
                );
                Ok(ProjectPage { items, total_count })
            }
            Err(e) => {
                error!(?query, error = %e, "Project listing failed");
                Err(match e {
                    DomainError::QueryFailure(_) => e,
                    other => DomainError::QueryFailure(other.to_string()),
                })
            }
        }
    }
}
