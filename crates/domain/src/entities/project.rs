use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::entities::{Category, User};
use crate::errors::DomainError;

pub const MIN_DESCRIPTION_CHARS: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub poster_image: String,
    pub github_url: String,
    pub website_url: String,
    pub category: Category,
    pub author_id: String,
    pub likes: u32,
    pub liked_by: Vec<String>, // unique, enforced by the store
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Builds a new listing from a draft that already passed validation.
    pub fn new(
        author_id: String,
        draft: &ProjectDraft,
        category: Category,
        poster_image: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            poster_image,
            github_url: draft.github_url.trim().to_string(),
            website_url: draft.website_url.trim().to_string(),
            category,
            author_id,
            likes: 0,
            liked_by: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the editable fields. The poster is kept unless the draft has one.
    pub fn apply_edit(&mut self, draft: &ProjectDraft, category: Category) {
        self.title = draft.title.trim().to_string();
        self.description = draft.description.trim().to_string();
        self.github_url = draft.github_url.trim().to_string();
        self.website_url = draft.website_url.trim().to_string();
        self.category = category;
        if let Some(poster) = draft.poster_image() {
            self.poster_image = poster.to_string();
        }
        self.updated_at = Utc::now();
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.author_id == user_id
    }

    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.liked_by.iter().any(|id| id == user_id)
    }
}

/// Create/edit payload as submitted by the share-work and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub github_url: String,
    pub website_url: String,
    pub category: String,
    #[serde(default)]
    pub poster_image: Option<String>,
}

impl ProjectDraft {
    pub fn poster_image(&self) -> Option<&str> {
        self.poster_image
            .as_deref()
            .map(str::trim)
            .filter(|poster| !poster.is_empty())
    }

    /// Checks the form rules and returns the parsed category.
    pub fn validate(&self) -> Result<Category, DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::ValidationError("Title is required".to_string()));
        }

        if self.description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
            return Err(DomainError::ValidationError(format!(
                "Description should be at least {} characters long",
                MIN_DESCRIPTION_CHARS
            )));
        }

        validate_link("Github URL", &self.github_url)?;
        validate_link("Website URL", &self.website_url)?;

        if self.category.trim().is_empty() {
            return Err(DomainError::ValidationError("Please select a category".to_string()));
        }

        self.category.parse()
    }
}

fn validate_link(field: &str, value: &str) -> Result<(), DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::ValidationError(format!("{} is required", field)));
    }

    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        _ => Err(DomainError::ValidationError(format!("{} must be an http(s) link", field))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectWithAuthor {
    #[serde(flatten)]
    pub project: Project,
    pub author: User,
}

/// Result of flipping one user's like on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    pub is_liked: bool,
    pub like_count: u32,
}
