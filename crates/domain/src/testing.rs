//! In-memory fakes for service tests.

use crate::entities::{Category, LikeStatus, Project, ProjectQuery, User};
use crate::errors::DomainError;
use crate::ports::{ImageHost, ImageUpload, UploadedImage};
use crate::repositories::{ProjectRepository, UserRepository};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// Project created `offset_secs` after a fixed epoch.
pub fn project(id: &str, author_id: &str, category: Category, offset_secs: i64) -> Project {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(offset_secs);
    Project {
        id: id.to_string(),
        title: format!("Project {id}"),
        description: "A project used by the service tests".to_string(),
        poster_image: format!("https://img.example/{id}.png"),
        github_url: "https://github.com/example/repo".to_string(),
        website_url: "https://example.com".to_string(),
        category,
        author_id: author_id.to_string(),
        likes: 0,
        liked_by: Vec::new(),
        created_at,
        updated_at: created_at,
    }
}

#[derive(Default)]
pub struct InMemoryProjectRepository {
    rows: Mutex<Vec<(u64, Project)>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryProjectRepository {
    pub async fn insert(&self, project: Project) {
        let mut rows = self.rows.lock().await;
        let seq = rows.len() as u64;
        rows.push((seq, project));
    }

    pub async fn get(&self, id: &str) -> Option<Project> {
        let rows = self.rows.lock().await;
        rows.iter().find(|(_, p)| p.id == id).map(|(_, p)| p.clone())
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_read(&self) -> Result<(), DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::QueryFailure("store unreachable".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::WriteFailure("store rejected write".to_string()));
        }
        Ok(())
    }

    fn matches(query: &ProjectQuery, project: &Project) -> bool {
        match query {
            ProjectQuery::All => true,
            ProjectQuery::Category(label) => project.category.label() == label,
            ProjectQuery::TitleContains(text) => project
                .title
                .to_lowercase()
                .contains(&text.to_lowercase()),
            ProjectQuery::Author(author_id) => &project.author_id == author_id,
        }
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Project>, DomainError> {
        self.check_read()?;
        Ok(self.get(id).await)
    }

    async fn find_many(
        &self,
        query: &ProjectQuery,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Project>, DomainError> {
        self.check_read()?;
        let rows = self.rows.lock().await;
        let mut matching: Vec<&(u64, Project)> =
            rows.iter().filter(|(_, p)| Self::matches(query, p)).collect();
        matching.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at.cmp(&a.created_at).then(seq_a.cmp(seq_b))
        });
        Ok(matching
            .into_iter()
            .skip(skip as usize)
            .take(take as usize)
            .map(|(_, p)| p.clone())
            .collect())
    }

    async fn count(&self, query: &ProjectQuery) -> Result<u64, DomainError> {
        self.check_read()?;
        let rows = self.rows.lock().await;
        Ok(rows.iter().filter(|(_, p)| Self::matches(query, p)).count() as u64)
    }

    async fn save(&self, project: &Project) -> Result<Project, DomainError> {
        self.check_write()?;
        self.insert(project.clone()).await;
        Ok(project.clone())
    }

    async fn update(&self, project: &Project) -> Result<Project, DomainError> {
        self.check_write()?;
        let mut rows = self.rows.lock().await;
        let (_, stored) = rows
            .iter_mut()
            .find(|(_, p)| p.id == project.id)
            .ok_or_else(|| DomainError::ProjectNotFound(project.id.clone()))?;
        let likes = stored.likes;
        let liked_by = std::mem::take(&mut stored.liked_by);
        *stored = Project {
            likes,
            liked_by,
            ..project.clone()
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.check_write()?;
        self.rows.lock().await.retain(|(_, p)| p.id != id);
        Ok(())
    }

    async fn toggle_like(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<Option<LikeStatus>, DomainError> {
        self.check_write()?;
        let mut rows = self.rows.lock().await;
        let Some((_, project)) = rows.iter_mut().find(|(_, p)| p.id == project_id) else {
            return Ok(None);
        };

        let is_liked = if project.is_liked_by(user_id) {
            project.liked_by.retain(|id| id != user_id);
            project.likes = project.likes.saturating_sub(1);
            false
        } else {
            project.liked_by.push(user_id.to_string());
            project.likes += 1;
            true
        };

        Ok(Some(LikeStatus {
            is_liked,
            like_count: project.likes,
        }))
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.lock().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn save(&self, user: &User) -> Result<User, DomainError> {
        self.users.lock().await.push(user.clone());
        Ok(user.clone())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.users.lock().await.len() as u64)
    }
}

/// Records uploads and deletions; uploads fail when `fail_uploads` is set.
#[derive(Default)]
pub struct RecordingImageHost {
    pub uploaded: Mutex<Vec<String>>,
    pub deleted: Mutex<Vec<String>>,
    pub fail_uploads: AtomicBool,
}

#[async_trait]
impl ImageHost for RecordingImageHost {
    async fn upload(&self, image: ImageUpload) -> Result<UploadedImage, DomainError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(DomainError::UpstreamFailure("upload refused".to_string()));
        }
        let public_id = format!("posters/{}", image.file_name);
        self.uploaded.lock().await.push(public_id.clone());
        Ok(UploadedImage {
            url: format!("https://img.example/{}", public_id),
            public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), DomainError> {
        self.deleted.lock().await.push(public_id.to_string());
        Ok(())
    }
}
