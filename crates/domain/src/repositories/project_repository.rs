use crate::entities::{LikeStatus, Project, ProjectQuery};
use crate::errors::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Project>, DomainError>;

    /// Newest first, ties in insertion order.
    async fn find_many(
        &self,
        query: &ProjectQuery,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Project>, DomainError>;

    async fn count(&self, query: &ProjectQuery) -> Result<u64, DomainError>;
    async fn save(&self, project: &Project) -> Result<Project, DomainError>;

    /// Writes the editable fields. Likes and ownership are left untouched.
    async fn update(&self, project: &Project) -> Result<Project, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    /// Flips `user_id` in the liked-by set and moves the counter with it, as
    /// one atomic step. `Ok(None)` when the project does not exist.
    async fn toggle_like(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<Option<LikeStatus>, DomainError>;
}
